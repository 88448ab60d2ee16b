//! API middleware components

pub mod admin_auth;
pub mod logging;
pub mod metrics;
pub mod security;

pub use admin_auth::{authenticate_session, session_token, RequireAdmin};
pub use logging::logging_middleware;
pub use metrics::metrics_middleware;
pub use security::{security_headers_middleware, MAX_BODY_SIZE};
