//! HTTP surface of the organization directory.
//!
//! Handlers stay thin: they parse the request, run one core service call
//! inside a per-request database session, and render the result.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod state;

pub use config::{ApiKey, ConfigError, ServerConfig};
pub use error::ApiError;
pub use middleware::API_KEY_HEADER;
pub use routes::{build_router, API_PREFIX};
pub use state::AppState;
