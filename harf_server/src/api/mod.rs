//! HTTP/WebSocket API for the word-game server.
//!
//! # Endpoints
//!
//! - `POST /api/rooms` - Create a room and seat the host
//! - `POST /api/rooms/{code}/join` - Join an existing room
//! - `GET  /ws/{code}?player_id=<uuid>` - Real-time game connection
//! - `GET  /health` - Server health status
//!
//! Room creation and joining happen over HTTP so the client holds a
//! `player_id` before opening the WebSocket; everything in-game flows over
//! the socket.
//!
//! # CORS
//!
//! CORS is configured permissively for development. In production, configure
//! appropriate origins, methods, and headers.

pub mod rooms;
pub mod websocket;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use harf::{GameError, RoomRegistry, game::entities::ErrorKind};
use serde_json::json;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers and WebSocket
/// connections. Cheap to clone; the registry is internally shared.
#[derive(Clone)]
pub struct AppState {
    pub registry: RoomRegistry,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/rooms", post(rooms::create_room))
        .route("/api/rooms/{code}/join", post(rooms::join_room))
        .route("/ws/{code}", get(websocket::websocket_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Map a game error onto an HTTP status code and a JSON error body.
pub fn error_response(error: &GameError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match error.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::StaleState | ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Expired => StatusCode::GONE,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = json!({
        "ok": false,
        "code": error.kind(),
        "message": error.to_string(),
    });
    (status, Json(body))
}

/// Health check endpoint for monitoring and load balancers.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "rooms": state.registry.room_count().await,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    (StatusCode::OK, Json(response))
}
