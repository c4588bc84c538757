//! Common test utilities and helpers

pub mod app;
pub mod database;
pub mod relay;

pub use app::*;
pub use relay::*;
