//! Hub helpers

use chatrelay::backend::realtime::connection::OutboundFrame;
use chatrelay::shared::ServerEvent;
use tokio::sync::mpsc;

/// Everything queued for a connection so far, decoded
pub fn drain(rx: &mut mpsc::Receiver<OutboundFrame>) -> Vec<ServerEvent> {
    let mut events = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        events.push(serde_json::from_str(&frame).expect("server frame"));
    }
    events
}

/// Same, as raw JSON for shape assertions
pub fn drain_json(rx: &mut mpsc::Receiver<OutboundFrame>) -> Vec<serde_json::Value> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(serde_json::from_str(&frame).expect("server frame"));
    }
    frames
}
