//! Integration tests for the HTTP API.
//!
//! Exercises room creation, joining, validation, and error mapping through
//! the full router without binding a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use harf::Dictionary;
use harf::RoomRegistry;
use http_body_util::BodyExt;
use tokio::time::Duration;
use tower::ServiceExt; // For `oneshot` method

/// Build the router over an in-memory dictionary.
fn create_test_server() -> axum::Router {
    let dictionary = Arc::new(
        Dictionary::from_word_lists("كتب", "كتب\nلتب\nكتف").expect("test word lists are valid"),
    );
    let registry = RoomRegistry::new(dictionary, Duration::from_millis(100));
    harf_server::api::create_router(harf_server::api::AppState { registry })
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_check_reports_room_count() {
    let app = create_test_server();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["rooms"], 0);
}

#[tokio::test]
async fn create_room_returns_code_and_player_id() {
    let app = create_test_server();

    let response = app
        .oneshot(post_json("/api/rooms", serde_json::json!({"name": "Amal"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["ok"], true);
    let code = body["room_code"].as_str().unwrap();
    assert_eq!(code.len(), 4);
    assert!(body["player_id"].as_str().is_some());
}

#[tokio::test]
async fn join_room_seats_a_second_player() {
    let app = create_test_server();

    let response = app
        .clone()
        .oneshot(post_json("/api/rooms", serde_json::json!({"name": "Amal"})))
        .await
        .unwrap();
    let created = json_body(response).await;
    let code = created["room_code"].as_str().unwrap();

    let response = app
        .oneshot(post_json(
            &format!("/api/rooms/{code}/join"),
            serde_json::json!({"name": "Badr"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["room_code"], code);
    assert_ne!(body["player_id"], created["player_id"]);
}

#[tokio::test]
async fn join_is_case_insensitive_on_room_code() {
    let app = create_test_server();

    let response = app
        .clone()
        .oneshot(post_json("/api/rooms", serde_json::json!({"name": "Amal"})))
        .await
        .unwrap();
    let created = json_body(response).await;
    let code = created["room_code"].as_str().unwrap().to_lowercase();

    let response = app
        .oneshot(post_json(
            &format!("/api/rooms/{code}/join"),
            serde_json::json!({"name": "Badr"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn joining_a_missing_room_is_404() {
    let app = create_test_server();

    let response = app
        .oneshot(post_json(
            "/api/rooms/ZZZZ/join",
            serde_json::json!({"name": "Badr"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn room_caps_at_four_players() {
    let app = create_test_server();

    let response = app
        .clone()
        .oneshot(post_json("/api/rooms", serde_json::json!({"name": "Amal"})))
        .await
        .unwrap();
    let created = json_body(response).await;
    let code = created["room_code"].as_str().unwrap().to_string();

    for name in ["Badr", "Dana", "Fadi"] {
        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/api/rooms/{code}/join"),
                serde_json::json!({"name": name}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(post_json(
            &format!("/api/rooms/{code}/join"),
            serde_json::json!({"name": "Ghad"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response).await;
    assert_eq!(body["code"], "conflict");
}

#[tokio::test]
async fn blank_and_oversized_names_are_rejected() {
    let app = create_test_server();

    let response = app
        .clone()
        .oneshot(post_json("/api/rooms", serde_json::json!({"name": "   "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let long_name = "x".repeat(30);
    let response = app
        .oneshot(post_json(
            "/api/rooms",
            serde_json::json!({"name": long_name}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
