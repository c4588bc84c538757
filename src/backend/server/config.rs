/**
 * Server Configuration
 *
 * Everything is read from environment variables (after `dotenv`), with
 * defaults that suit local development. Only `JWT_SECRET` is mandatory.
 *
 * The database is optional: without `DATABASE_URL`, or when the connection
 * fails, the server still runs the socket relay and the data endpoints
 * answer 503.
 */

use sqlx::PgPool;
use thiserror::Error;

use crate::backend::realtime::relay::DEFAULT_QUEUE_CAPACITY;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_JWT_TTL_DAYS: u64 = 30;
pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://localhost:3000",
    "http://localhost:3001",
];
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// SMTP settings for password-reset mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub app_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_ttl_days: u64,
    pub cors_origins: Vec<String>,
    /// Base of the link mailed for password resets
    pub frontend_url: String,
    /// Refuse socket upgrades that carry no valid bearer token
    pub socket_auth_required: bool,
    /// Per-connection outbound queue size
    pub socket_queue_capacity: usize,
    pub email: EmailConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let cors_origins = match get("CORS_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Self {
            port: parse_or(get("PORT"), "PORT", DEFAULT_PORT)?,
            database_url: get("DATABASE_URL"),
            jwt_secret,
            jwt_ttl_days: parse_or(get("JWT_TTL_DAYS"), "JWT_TTL_DAYS", DEFAULT_JWT_TTL_DAYS)?,
            cors_origins,
            frontend_url: get("FRONTEND_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            socket_auth_required: parse_bool(get("SOCKET_AUTH_REQUIRED"), "SOCKET_AUTH_REQUIRED")?,
            socket_queue_capacity: parse_or(
                get("SOCKET_QUEUE_CAPACITY"),
                "SOCKET_QUEUE_CAPACITY",
                DEFAULT_QUEUE_CAPACITY,
            )?,
            email: EmailConfig {
                host: get("EMAIL_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
                port: parse_or(get("EMAIL_PORT"), "EMAIL_PORT", 587)?,
                user: get("EMAIL_USER"),
                password: get("EMAIL_PASS"),
                app_name: get("APP_NAME").unwrap_or_else(|| "Chat App".to_string()),
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn parse_bool(value: Option<String>, key: &'static str) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(_) => Err(ConfigError::Invalid {
            key,
            value: value.unwrap_or_default(),
        }),
    }
}

/// Database configuration result
pub type DatabaseConfig = Option<PgPool>;

/// Connects to Postgres and runs migrations.
///
/// Returns `None` when no URL is configured or the connection fails; the
/// failure is logged and the server keeps running without persistence.
pub async fn load_database(database_url: Option<&str>) -> DatabaseConfig {
    let Some(database_url) = database_url else {
        tracing::warn!("[Server] DATABASE_URL not set. Database features will be disabled.");
        return None;
    };

    tracing::info!("[Server] Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("[Server] Failed to create database connection pool: {:?}", e);
            tracing::warn!("[Server] Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("[Server] Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("[Server] Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("[Server] Failed to run database migrations: {}", e);
            tracing::warn!("[Server] Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
