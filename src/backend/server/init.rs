/**
 * Server Initialization
 *
 * 1. Load the optional database (connect + migrate)
 * 2. Build `AppState` around a fresh relay hub
 * 3. Assemble the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

pub async fn create_app(config: ServerConfig) -> Router<()> {
    tracing::info!("[Server] Initializing chat relay backend");

    let db_pool = load_database(config.database_url.as_deref()).await;
    let app_state = AppState::new(config, db_pool);

    tracing::info!(
        "[Server] Relay hub ready (outbound queue capacity {}, socket auth required: {})",
        app_state.relay.queue_capacity(),
        app_state.config.socket_auth_required
    );

    create_router(app_state)
}
