//! Authentication infrastructure module
//!
//! Signed session tokens for admin authentication.

mod session;

pub use session::{
    generate_secret, token_from_cookie_header, SessionClaims, SessionConfig, SessionIdentity,
    SessionService, DEFAULT_SESSION_TTL_HOURS, MAX_SESSION_TTL_HOURS, SESSION_COOKIE,
};
