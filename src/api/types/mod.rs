//! HTTP request/response types
//!
//! Every response is wrapped in a `success` envelope.

pub mod error;
pub mod json;
pub mod response;

pub use error::{ApiError, ApiErrorCode, ApiErrorResponse, INTERNAL_ERROR_MESSAGE};
pub use json::Json;
pub use response::{AdminResponse, ApiResponse, PlayerResponse, TeamResponse};
