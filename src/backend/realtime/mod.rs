//! Real-time Relay
//!
//! Live delivery over WebSocket: presence, room fan-out, typing indicators
//! and read receipts. Nothing here touches the database; messages are
//! stored over REST and then relayed by the client.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── connection.rs - per-connection state and bounded outbound queue
//! ├── presence.rs   - user id -> connection id, last connection wins
//! ├── rooms.rs      - connection <-> room index
//! ├── relay.rs      - RelayHub: the single lock around all of the above
//! ├── lifecycle.rs  - connect / identify / disconnect
//! ├── dispatch.rs   - ClientEvent -> hub operation
//! ├── socket.rs     - reader loop and writer task for one WebSocket
//! └── handlers.rs   - GET /ws and GET /api/presence
//! ```
//!
//! # Delivery
//!
//! | inbound        | outbound              | sender receives it |
//! |----------------|-----------------------|--------------------|
//! | `identify`     | `presence-changed`    | yes (everyone)     |
//! | `relay-message`| `message-received`    | yes                |
//! | `typing-start` | `user-typing`         | no                 |
//! | `typing-stop`  | `user-stopped-typing` | no                 |
//! | `seen`         | `message-seen`        | no                 |
//!
//! Frames are queued with `try_send`; a receiver whose queue is full misses
//! the frame rather than slowing down the broadcast.

pub mod connection;

pub mod presence;

pub mod rooms;

pub mod relay;

pub mod lifecycle;

pub mod dispatch;

pub mod socket;

pub mod handlers;

pub use connection::{ConnectionId, ConnectionPhase};
pub use handlers::{get_presence, handle_socket_upgrade, PresenceResponse};
pub use relay::RelayHub;
