//! Authentication Handlers
//!
//! - `POST /api/auth/register` - `register`
//! - `POST /api/auth/login` - `login`
//! - `GET /api/auth/me` - `get_me`
//! - `PUT /api/auth/update` - `update_profile`
//! - `GET /api/auth/all`, `GET /api/users` - `list_users`
//! - `POST /api/auth/forgot-password` - `forgot_password`
//! - `POST /api/auth/reset-password/{token}` - `reset_password`

/// Request and response types
pub mod types;

pub mod register;

pub mod login;

pub mod me;

pub mod profile;

pub mod password_reset;

pub use login::login;
pub use me::get_me;
pub use password_reset::{forgot_password, reset_password};
pub use profile::{list_users, update_profile};
pub use register::register;
