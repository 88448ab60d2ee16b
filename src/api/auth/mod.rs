//! Admin session endpoints
//!
//! Login issues a signed session token both in the body and as an HttpOnly
//! cookie. Logout only clears the cookie; tokens are not revoked server-side.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::api::middleware::authenticate_session;
use crate::api::state::AppState;
use crate::api::types::{AdminResponse, ApiError, ApiResponse, Json};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/verify", get(verify))
        .route("/logout", post(logout))
}

/// Login request; missing fields are treated as blank
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminResponse,
    pub expires_at: String,
}

#[derive(Debug, Serialize)]
pub struct SessionAdmin {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<SessionAdmin>,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = state
        .admin_service
        .authenticate(&request.username, &request.password)
        .await?;

    let token = state.session_service.issue(&admin)?;
    let cookie = state.session_service.session_cookie(&token);
    let expires_at = Utc::now() + Duration::seconds(state.session_service.ttl_seconds());

    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiResponse::ok(LoginResponse {
            token,
            admin: AdminResponse::from(&admin),
            expires_at: expires_at.to_rfc3339(),
        }),
    ))
}

/// GET /api/auth/verify
///
/// Always 200; the body reports whether the presented session is valid.
pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiResponse<VerifyResponse>, ApiError> {
    let identity = authenticate_session(&headers, &state).await?;

    Ok(ApiResponse::ok(VerifyResponse {
        authenticated: identity.is_some(),
        admin: identity.map(|identity| SessionAdmin {
            id: identity.admin_id,
            username: identity.username,
        }),
    }))
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, state.session_service.clear_cookie())],
        ApiResponse::ok(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}
