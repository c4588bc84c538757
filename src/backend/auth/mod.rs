//! Authentication Module
//!
//! - **`sessions`** - JWT issue/verify (`JwtKeys`)
//! - **`users`** - user rows and queries
//! - **`password`** - bcrypt on the blocking pool
//! - **`mailer`** - SMTP mail for password resets
//! - **`handlers`** - the `/api/auth` and `/api/users` endpoints
//!
//! Passwords are stored as bcrypt hashes and never returned. Tokens carry
//! the user id in `sub` and last `JWT_TTL_DAYS` days.

/// User model and database operations
pub mod users;

/// Session management and JWT tokens
pub mod sessions;

/// Password hashing
pub mod password;

/// Password reset mail
pub mod mailer;

/// Authentication HTTP handlers
pub mod handlers;

pub use handlers::{
    forgot_password, get_me, list_users, login, register, reset_password, update_profile,
};
pub use sessions::{JwtKeys, TokenError};
