/**
 * Application State
 *
 * `AppState` is the single state value handed to the router. Handlers pull
 * out only what they need through the `FromRef` impls below.
 *
 * - `relay` - the socket hub (presence and rooms), owned here, not global
 * - `db_pool` - `None` when the server runs without Postgres
 * - `jwt` - token signing/verification keys
 * - `mailer` - `None` when SMTP credentials are not configured
 * - `config` - the loaded `ServerConfig`
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::auth::mailer::Mailer;
use crate::backend::auth::sessions::JwtKeys;
use crate::backend::error::BackendError;
use crate::backend::realtime::RelayHub;
use crate::backend::server::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub relay: RelayHub,
    pub db_pool: Option<PgPool>,
    pub jwt: JwtKeys,
    pub mailer: Option<Mailer>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Builds state from config and an already-loaded pool.
    ///
    /// A mailer that fails to build is logged and left out, so password reset
    /// mail answers 500 while everything else keeps working.
    pub fn new(config: ServerConfig, db_pool: Option<PgPool>) -> Self {
        let mailer = match Mailer::from_config(&config.email) {
            Ok(Some(mailer)) => Some(mailer),
            Ok(None) => {
                tracing::warn!("[Server] EMAIL_USER/EMAIL_PASS not set. Password reset mail disabled.");
                None
            }
            Err(e) => {
                tracing::error!("[Server] Failed to configure mailer: {}", e);
                None
            }
        };

        Self {
            relay: RelayHub::new(config.socket_queue_capacity),
            db_pool,
            jwt: JwtKeys::new(&config.jwt_secret, config.jwt_ttl_days),
            mailer,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for RelayHub {
    fn from_ref(app_state: &AppState) -> RelayHub {
        app_state.relay.clone()
    }
}

impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Option<PgPool> {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(app_state: &AppState) -> JwtKeys {
        app_state.jwt.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Arc<ServerConfig> {
        app_state.config.clone()
    }
}

/// Unwraps the optional pool, or fails with 503 when the server has no database
pub fn require_database(db_pool: Option<PgPool>) -> Result<PgPool, BackendError> {
    db_pool.ok_or_else(|| {
        tracing::error!("[Server] Database not configured");
        BackendError::database_unavailable()
    })
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    let config = ServerConfig::from_lookup(|key| match key {
        "JWT_SECRET" => Some("test-secret".to_string()),
        _ => None,
    })
    .expect("test config");
    AppState::new(config, None)
}
