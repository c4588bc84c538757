//! Relay behaviour seen from two or three clients sharing one hub

use chatrelay::backend::realtime::{ConnectionPhase, RelayHub};
use chatrelay::shared::event::{ClientEvent, ServerEvent, TypingStart};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{drain, drain_json};

fn frame(value: serde_json::Value) -> String {
    value.to_string()
}

#[tokio::test]
async fn test_message_reaches_everyone_in_room() {
    let hub = RelayHub::default();
    let (a, mut rx_a) = hub.connect(None).await;
    let (b, mut rx_b) = hub.connect(None).await;
    let (c, mut rx_c) = hub.connect(None).await;

    hub.handle_frame(a, &frame(json!({"event": "identify", "data": "u1"}))).await.unwrap();
    hub.handle_frame(a, &frame(json!({"event": "join-room", "data": "r1"}))).await.unwrap();
    hub.handle_frame(b, &frame(json!({"event": "identify", "data": "u2"}))).await.unwrap();
    hub.handle_frame(b, &frame(json!({"event": "join-room", "data": "r1"}))).await.unwrap();
    drain(&mut rx_a);
    drain(&mut rx_b);
    drain(&mut rx_c);

    hub.handle_frame(
        a,
        &frame(json!({
            "event": "relay-message",
            "data": {"roomId": "r1", "message": {"text": "hi"}}
        })),
    )
    .await
    .unwrap();

    let expected = json!({"event": "message-received", "data": {"text": "hi", "roomId": "r1"}});
    assert_eq!(drain_json(&mut rx_a), vec![expected.clone()]);
    assert_eq!(drain_json(&mut rx_b), vec![expected]);
    assert!(drain_json(&mut rx_c).is_empty(), "c is not in r1");
}

#[tokio::test]
async fn test_typing_skips_sender() {
    let hub = RelayHub::default();
    let (a, mut rx_a) = hub.connect(None).await;
    let (b, mut rx_b) = hub.connect(None).await;
    hub.identify(a, "u1".into()).await.unwrap();
    hub.identify(b, "u2".into()).await.unwrap();
    hub.join(a, "r1").await;
    hub.join(b, "r1").await;
    drain(&mut rx_a);
    drain(&mut rx_b);

    hub.dispatch(
        a,
        ClientEvent::TypingStart(TypingStart {
            room_id: Some("r1".into()),
            user_id: Some("u1".into()),
            username: None,
        }),
    )
    .await
    .unwrap();

    assert!(drain(&mut rx_a).is_empty());
    assert_eq!(
        drain_json(&mut rx_b),
        vec![json!({"event": "user-typing", "data": {"userId": "u1"}})]
    );

    hub.handle_frame(
        a,
        &frame(json!({"event": "typing-stop", "data": {"roomId": "r1", "userId": "u1"}})),
    )
    .await
    .unwrap();
    assert!(drain(&mut rx_a).is_empty());
    assert_eq!(
        drain_json(&mut rx_b),
        vec![json!({"event": "user-stopped-typing", "data": {"userId": "u1"}})]
    );
}

#[tokio::test]
async fn test_disconnect_cleans_up_and_announces_offline() {
    let hub = RelayHub::default();
    let (a, _rx_a) = hub.connect(None).await;
    let (b, mut rx_b) = hub.connect(None).await;
    let (_c, mut rx_c) = hub.connect(None).await;
    hub.identify(a, "u1".into()).await.unwrap();
    hub.identify(b, "u2".into()).await.unwrap();
    hub.join(a, "r1").await;
    hub.join(b, "r1").await;
    drain(&mut rx_b);
    drain(&mut rx_c);

    assert_eq!(hub.disconnect(a).await, Some("u1".to_string()));

    assert!(!hub.is_online("u1").await);
    assert_eq!(hub.room_members("r1").await, vec![b]);
    assert_eq!(hub.phase(a).await, ConnectionPhase::Disconnected);
    assert_eq!(drain(&mut rx_b), vec![ServerEvent::offline("u1")]);
    assert_eq!(
        drain_json(&mut rx_c),
        vec![json!({"event": "presence-changed", "data": {"userId": "u1", "status": "offline"}})]
    );
}

#[tokio::test]
async fn test_last_identify_wins() {
    let hub = RelayHub::default();
    let (c1, _rx1) = hub.connect(None).await;
    let (c2, _rx2) = hub.connect(None).await;

    hub.identify(c1, "u".into()).await.unwrap();
    hub.identify(c2, "u".into()).await.unwrap();

    assert_eq!(hub.online_users().await, vec!["u".to_string()]);
    assert_eq!(hub.connection_of("u").await, Some(c2));
}

#[tokio::test]
async fn test_leave_unjoined_room_is_noop() {
    let hub = RelayHub::default();
    let (a, mut rx_a) = hub.connect(None).await;
    let (b, _rx_b) = hub.connect(None).await;
    hub.join(b, "r1").await;

    hub.handle_frame(a, &frame(json!({"event": "leave-room", "data": "r1"}))).await.unwrap();
    hub.handle_frame(a, &frame(json!({"event": "leave-room", "data": "nowhere"}))).await.unwrap();

    assert_eq!(hub.room_members("r1").await, vec![b]);
    assert!(hub.rooms_of(a).await.is_empty());
    assert!(drain(&mut rx_a).is_empty());
}

#[tokio::test]
async fn test_malformed_frame_keeps_connection_usable() {
    let hub = RelayHub::default();
    let (a, mut rx_a) = hub.connect(None).await;

    assert!(hub.handle_frame(a, "not json").await.is_err());
    assert!(hub
        .handle_frame(a, &frame(json!({"event": "seen", "data": {"messageId": "m1"}})))
        .await
        .is_err());

    hub.handle_frame(a, &frame(json!({"event": "identify", "data": "u1"}))).await.unwrap();
    assert_eq!(drain(&mut rx_a), vec![ServerEvent::online("u1")]);
}

#[tokio::test]
async fn test_broadcast_to_empty_room() {
    let hub = RelayHub::default();
    let (a, _rx) = hub.connect(None).await;
    let delivered = hub
        .broadcast_to_room("ghost", a, ServerEvent::online("u1"), false)
        .await;
    assert_eq!(delivered, 0);
}

#[tokio::test]
async fn test_slow_receiver_does_not_block_room() {
    let hub = RelayHub::new(1);
    let (a, mut rx_a) = hub.connect(None).await;
    let (b, _rx_b_never_read) = hub.connect(None).await;
    hub.join(a, "r1").await;
    hub.join(b, "r1").await;

    for text in ["one", "two", "three"] {
        hub.handle_frame(
            a,
            &frame(json!({"event": "relay-message", "data": {"roomId": "r1", "message": {"text": text}}})),
        )
        .await
        .unwrap();
        assert_eq!(drain(&mut rx_a).len(), 1);
    }
}
