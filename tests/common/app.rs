//! Router helpers: build an app from a fixed config and send requests.

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chatrelay::backend::auth::JwtKeys;
use chatrelay::backend::routes::create_router;
use chatrelay::backend::server::{create_app, AppState, ServerConfig};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-secret";

/// Config with a known JWT secret plus any overrides
pub fn test_config(overrides: &[(&str, &str)]) -> ServerConfig {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("JWT_SECRET".into(), TEST_SECRET.into());
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }
    ServerConfig::from_lookup(|key| vars.get(key).cloned()).expect("valid test config")
}

/// App without a database
pub async fn test_app(overrides: &[(&str, &str)]) -> Router {
    create_app(test_config(overrides)).await
}

/// Serves a database-less app on an ephemeral port. The returned state
/// shares its relay hub with the running server.
pub async fn spawn_server(overrides: &[(&str, &str)]) -> (SocketAddr, AppState) {
    let state = AppState::new(test_config(overrides), None);
    let app = create_router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (addr, state)
}

pub fn token_for(user_id: Uuid) -> String {
    JwtKeys::new(TEST_SECRET, 30)
        .create_token(user_id)
        .expect("token")
}

/// Sends one request and returns the status with the JSON body (`Null` when empty)
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
