//! `GET /ws` authentication, checked before the upgrade

use axum::http::{Method, StatusCode};
use uuid::Uuid;

use crate::common::{send, test_app, token_for};

#[tokio::test]
async fn test_socket_requires_token_when_configured() {
    let app = test_app(&[("SOCKET_AUTH_REQUIRED", "true")]).await;

    let (status, body) = send(&app, Method::GET, "/ws", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);

    let (status, _) = send(&app, Method::GET, "/ws?token=garbage", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_socket_with_token_reaches_upgrade() {
    let app = test_app(&[("SOCKET_AUTH_REQUIRED", "true")]).await;
    let uri = format!("/ws?token={}", token_for(Uuid::new_v4()));

    // No upgrade headers, so the upgrade itself is refused, but not as 401.
    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_ne!(status, StatusCode::UNAUTHORIZED);
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_anonymous_socket_allowed_by_default() {
    let app = test_app(&[]).await;
    let (status, _) = send(&app, Method::GET, "/ws", None, None).await;
    assert_ne!(status, StatusCode::UNAUTHORIZED);
}
