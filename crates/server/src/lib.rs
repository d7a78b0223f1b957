//! Moorage HTTP API server.
//!
//! Exposes the reconciliation engine's lifecycle operations to UI-level
//! callers over a small REST surface, with typed API errors, Prometheus
//! metrics, and config-driven construction of the two external clients.

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
