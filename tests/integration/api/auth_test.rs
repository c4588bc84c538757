//! Auth endpoint validation, which runs before the database is needed

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{send, test_app};

#[tokio::test]
async fn test_register_missing_fields() {
    let app = test_app(&[]).await;
    let bodies = [
        json!({}),
        json!({"username": "ana", "email": "ana@example.com"}),
        json!({"username": "  ", "email": "ana@example.com", "password": "secret1"}),
    ];
    for body in bodies {
        let (status, response) = send(&app, Method::POST, "/api/auth/register", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], "Please provide all fields");
    }
}

#[tokio::test]
async fn test_register_without_database() {
    let app = test_app(&[]).await;
    let body = json!({"username": "ana", "email": "ana@example.com", "password": "secret1"});
    let (status, _) = send(&app, Method::POST, "/api/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = test_app(&[]).await;
    let (status, response) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "ana@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "Please provide email and password");
}

#[tokio::test]
async fn test_forgot_password_requires_email() {
    let app = test_app(&[]).await;
    let (status, response) =
        send(&app, Method::POST, "/api/auth/forgot-password", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "Email is required");
}

#[tokio::test]
async fn test_reset_password_too_short() {
    let app = test_app(&[]).await;
    let (status, response) = send(
        &app,
        Method::POST,
        "/api/auth/reset-password/sometoken",
        None,
        Some(json!({"password": "12345"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "Password must be at least 6 characters long");
}
