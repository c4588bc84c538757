//! Routes Module
//!
//! - **`router`** - `create_router`, CORS and the fallback
//! - **`api_routes`** - `/api/...`
//! - **`realtime_routes`** - `/ws`

/// Main router creation
pub mod router;

/// Realtime route configuration
pub mod realtime_routes;

/// API route configuration
pub mod api_routes;

pub use router::create_router;
