//! The relay over real WebSocket connections to a served app

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use uuid::Uuid;

use crate::common::{spawn_server, token_for};

const TIMEOUT: Duration = Duration::from_secs(5);

type WsStream = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

async fn open(addr: SocketAddr, query: &str) -> WsStream {
    let (ws, _) = connect_async(format!("ws://{addr}/ws{query}"))
        .await
        .expect("websocket handshake");
    ws
}

async fn emit(ws: &mut WsStream, frame: Value) {
    ws.send(Message::text(frame.to_string())).await.expect("send");
}

/// Reads until `want` arrives, returning every event seen on the way (inclusive)
async fn recv_until(ws: &mut WsStream, want: &Value) -> Vec<Value> {
    let mut seen = Vec::new();
    loop {
        let message = timeout(TIMEOUT, ws.next())
            .await
            .expect("timed out waiting for frame")
            .expect("stream ended")
            .expect("websocket error");
        if let Message::Text(text) = message {
            let event: Value = serde_json::from_str(text.as_str()).expect("json frame");
            let done = &event == want;
            seen.push(event);
            if done {
                return seen;
            }
        }
    }
}

fn presence(user: &str, status: &str) -> Value {
    json!({"event": "presence-changed", "data": {"userId": user, "status": status}})
}

#[tokio::test]
async fn test_room_traffic_and_close_over_sockets() {
    let (addr, state) = spawn_server(&[]).await;
    let mut a = open(addr, "").await;
    let mut b = open(addr, "").await;

    // A garbage frame is dropped without closing the connection.
    a.send(Message::text("not json".to_string())).await.unwrap();
    emit(&mut a, json!({"event": "join-room", "data": "r1"})).await;
    emit(&mut a, json!({"event": "identify", "data": "u1"})).await;
    recv_until(&mut a, &presence("u1", "online")).await;

    emit(&mut b, json!({"event": "join-room", "data": "r1"})).await;
    emit(&mut b, json!({"event": "identify", "data": "u2"})).await;
    recv_until(&mut b, &presence("u2", "online")).await;
    recv_until(&mut a, &presence("u2", "online")).await;

    emit(
        &mut a,
        json!({"event": "typing-start", "data": {"roomId": "r1", "userId": "u1"}}),
    )
    .await;
    emit(
        &mut a,
        json!({"event": "relay-message", "data": {"roomId": "r1", "message": {"text": "hi"}}}),
    )
    .await;

    let typing = json!({"event": "user-typing", "data": {"userId": "u1"}});
    let received = json!({"event": "message-received", "data": {"text": "hi", "roomId": "r1"}});

    let seen_by_a = recv_until(&mut a, &received).await;
    assert!(!seen_by_a.contains(&typing), "sender got its own typing notice");

    recv_until(&mut b, &typing).await;
    recv_until(&mut b, &received).await;

    a.close(None).await.unwrap();
    recv_until(&mut b, &presence("u1", "offline")).await;

    assert_eq!(state.relay.online_users().await, vec!["u2".to_string()]);
    assert_eq!(state.relay.room_members("r1").await.len(), 1);
    assert_eq!(state.relay.connection_count().await, 1);
}

#[tokio::test]
async fn test_dropped_client_is_cleaned_up() {
    let (addr, state) = spawn_server(&[]).await;
    let mut a = open(addr, "").await;
    let mut b = open(addr, "").await;

    emit(&mut a, json!({"event": "identify", "data": "u1"})).await;
    recv_until(&mut a, &presence("u1", "online")).await;
    emit(&mut b, json!({"event": "identify", "data": "u2"})).await;
    recv_until(&mut b, &presence("u2", "online")).await;

    // No close handshake, the TCP stream just goes away.
    drop(a);
    recv_until(&mut b, &presence("u1", "offline")).await;
    assert!(!state.relay.is_online("u1").await);
}

#[tokio::test]
async fn test_token_pins_socket_identity() {
    let (addr, state) = spawn_server(&[("SOCKET_AUTH_REQUIRED", "true")]).await;
    let user_id = Uuid::new_v4().to_string();
    let query = format!("?token={}", token_for(Uuid::parse_str(&user_id).unwrap()));
    let mut ws = open(addr, &query).await;

    emit(&mut ws, json!({"event": "identify", "data": "someone-else"})).await;
    emit(&mut ws, json!({"event": "identify", "data": &user_id})).await;

    let seen = recv_until(&mut ws, &presence(&user_id, "online")).await;
    assert_eq!(seen.len(), 1);
    assert_eq!(state.relay.online_users().await, vec![user_id]);
}

#[tokio::test]
async fn test_handshake_refused_without_token_when_required() {
    let (addr, _state) = spawn_server(&[("SOCKET_AUTH_REQUIRED", "true")]).await;
    assert!(connect_async(format!("ws://{addr}/ws")).await.is_err());
}
