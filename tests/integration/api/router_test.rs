//! Health check, fallback, CORS and the auth guard

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::{send, test_app, token_for};

#[tokio::test]
async fn test_health_check() {
    let app = test_app(&[]).await;
    let (status, body) = send(&app, Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Chat App API is running"}));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = test_app(&[]).await;
    let (status, body) = send(&app, Method::GET, "/api/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = test_app(&[]).await;
    for uri in ["/api/auth/me", "/api/users", "/api/chats", "/api/presence"] {
        let (status, body) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["message"], "Unauthorized: No token provided");
    }
}

#[tokio::test]
async fn test_protected_route_with_bad_token() {
    let app = test_app(&[]).await;
    let (status, body) = send(&app, Method::GET, "/api/auth/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized: Invalid token");
}

#[tokio::test]
async fn test_valid_token_without_database_is_503() {
    let app = test_app(&[]).await;
    let token = token_for(Uuid::new_v4());
    let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"message": "Database not configured", "status": 503}));
}

#[tokio::test]
async fn test_presence_endpoint_starts_empty() {
    let app = test_app(&[]).await;
    let token = token_for(Uuid::new_v4());
    let (status, body) = send(&app, Method::GET, "/api/presence", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"online": []}));
}

#[tokio::test]
async fn test_cors_preflight_for_configured_origin() {
    let app = test_app(&[("CORS_ORIGINS", "https://chat.example")]).await;

    let preflight = |origin: &'static str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/auth/login")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(preflight("https://chat.example")).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://chat.example"
    );

    let response = app.oneshot(preflight("https://evil.example")).await.unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
