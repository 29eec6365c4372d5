//! # REST API
//!
//! axum handlers, extractors and routes for the ledger resources.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use extract::ValidatedJson;
pub use handlers::AppState;
pub use routes::create_router;
