//! Integration tests

pub mod database;
pub mod realtime;
