//! Realtime routes
//!
//! - `GET /ws` - WebSocket upgrade into the relay (optional bearer token)

use axum::{routing::get, Router};

use crate::backend::realtime::handle_socket_upgrade;
use crate::backend::server::state::AppState;

pub fn configure_realtime_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/ws", get(handle_socket_upgrade))
}
