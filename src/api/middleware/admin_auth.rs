//! Admin session extractor
//!
//! Accepts a session token from either:
//! - `Authorization: Bearer <token>`
//! - the `admin_session` cookie

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::infrastructure::auth::{token_from_cookie_header, SessionIdentity};

const AUTH_REQUIRED: &str = "Authentication required";

/// Extractor that requires a valid admin session
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub SessionIdentity);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match authenticate_session(&parts.headers, state).await? {
            Some(identity) => {
                debug!(admin_id = %identity.admin_id, "Admin access via session");
                Ok(RequireAdmin(identity))
            }
            None => Err(ApiError::unauthorized(AUTH_REQUIRED)),
        }
    }
}

/// Resolve the session carried by a request, if any
///
/// A token whose admin no longer exists is treated as absent. Storage
/// failures during the lookup are surfaced as errors.
pub async fn authenticate_session(
    headers: &HeaderMap,
    state: &AppState,
) -> Result<Option<SessionIdentity>, ApiError> {
    let Some(token) = session_token(headers) else {
        return Ok(None);
    };

    let Some(identity) = state.session_service.verify(token) else {
        return Ok(None);
    };

    let admin = state
        .admin_service
        .get_by_username(&identity.username)
        .await
        .map_err(ApiError::from)?;

    match admin {
        Some(admin) if admin.id().as_str() == identity.admin_id => Ok(Some(identity)),
        _ => {
            debug!(username = %identity.username, "Session refers to an unknown admin");
            Ok(None)
        }
    }
}

/// Extract the session token, preferring the bearer header over the cookie
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    bearer.or_else(|| {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(token_from_cookie_header)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_token_from_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));

        assert_eq!(session_token(&headers), Some("abc.def"));
    }

    #[test]
    fn test_session_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; admin_session=tok123"),
        );

        assert_eq!(session_token(&headers), Some("tok123"));
    }

    #[test]
    fn test_bearer_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        headers.insert(header::COOKIE, HeaderValue::from_static("admin_session=from-cookie"));

        assert_eq!(session_token(&headers), Some("from-header"));
    }

    #[test]
    fn test_no_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));

        assert_eq!(session_token(&headers), None);
    }
}
