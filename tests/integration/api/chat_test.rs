//! Chat and message endpoint validation

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::{send, test_app, token_for};

#[tokio::test]
async fn test_access_chat_requires_user_id() {
    let app = test_app(&[]).await;
    let token = token_for(Uuid::new_v4());

    let (status, body) = send(&app, Method::POST, "/api/chats", Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "UserId is required");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/chats",
        Some(&token),
        Some(json!({"userId": "not-a-uuid"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid userId");
}

#[tokio::test]
async fn test_access_chat_with_self_is_rejected() {
    let app = test_app(&[]).await;
    let me = Uuid::new_v4();
    let token = token_for(me);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/chats",
        Some(&token),
        Some(json!({"userId": me.to_string()})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot start a chat with yourself");
}

#[tokio::test]
async fn test_send_message_requires_fields() {
    let app = test_app(&[]).await;
    let token = token_for(Uuid::new_v4());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/messages",
        Some(&token),
        Some(json!({"text": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "chatId and text are required");
}

#[tokio::test]
async fn test_chat_routes_without_database() {
    let app = test_app(&[]).await;
    let token = token_for(Uuid::new_v4());
    let chat_id = Uuid::new_v4();

    let (status, _) = send(&app, Method::GET, "/api/chats", Some(&token), None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let uri = format!("/api/messages/{}", chat_id);
    let (status, _) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let uri = format!("/api/chats/{}", chat_id);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
