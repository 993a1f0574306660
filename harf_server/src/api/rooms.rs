//! Room creation and joining over HTTP.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use harf::{GameError, Player, RoomMessage};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::oneshot;

use super::{AppState, error_response};

const MAX_NAME_LEN: usize = 20;

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JoinRoomRequest {
    pub name: Option<String>,
}

/// Trimmed, 1 to 20 characters.
fn validate_name(name: Option<String>) -> Result<String, (StatusCode, Json<serde_json::Value>)> {
    let name = name.unwrap_or_default().trim().to_string();
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "ok": false,
                "code": "invalid_input",
                "message": format!("Name must be 1 to {MAX_NAME_LEN} characters"),
            })),
        ));
    }
    Ok(name)
}

/// `POST /api/rooms` - create a room and seat the caller as host.
pub async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomRequest>,
) -> impl IntoResponse {
    let name = match validate_name(request.name) {
        Ok(name) => name,
        Err(rejection) => return rejection.into_response(),
    };

    let (code, player_id) = state.registry.create_room(name).await;
    (
        StatusCode::CREATED,
        Json(json!({
            "ok": true,
            "room_code": code,
            "player_id": player_id,
        })),
    )
        .into_response()
}

/// `POST /api/rooms/{code}/join` - seat a new player in an existing room.
pub async fn join_room(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(request): Json<JoinRoomRequest>,
) -> impl IntoResponse {
    let name = match validate_name(request.name) {
        Ok(name) => name,
        Err(rejection) => return rejection.into_response(),
    };

    let Some(handle) = state.registry.get_room(&code).await else {
        return error_response(&GameError::RoomNotFound).into_response();
    };

    let player = Player::new(name);
    let player_id = player.id;
    let (tx, rx) = oneshot::channel();
    if handle
        .send(RoomMessage::Join {
            player,
            response: tx,
        })
        .await
        .is_err()
    {
        return error_response(&GameError::RoomNotFound).into_response();
    }

    match rx.await {
        Ok(Ok(())) => (
            StatusCode::OK,
            Json(json!({
                "ok": true,
                "room_code": handle.code(),
                "player_id": player_id,
            })),
        )
            .into_response(),
        Ok(Err(error)) => error_response(&error).into_response(),
        Err(_) => error_response(&GameError::Internal).into_response(),
    }
}
