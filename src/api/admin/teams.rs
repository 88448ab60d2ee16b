//! Registration review endpoints for the operator

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json, TeamResponse};
use crate::domain::team::VerificationFilter;
use crate::infrastructure::team::RegistrationStats;

/// Query string for listing registrations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTeamsQuery {
    #[serde(default)]
    pub filter: Option<String>,
}

/// Request to toggle verification
#[derive(Debug, Clone, Deserialize)]
pub struct SetVerifiedRequest {
    pub verified: bool,
}

/// GET /api/admin/teams?filter=all|verified|pending
pub async fn list_teams(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<ListTeamsQuery>,
) -> Result<ApiResponse<Vec<TeamResponse>>, ApiError> {
    let filter: VerificationFilter = query.filter.as_deref().unwrap_or_default().parse()?;

    debug!(admin = %admin.username, ?filter, "Admin listing teams");

    let teams = state.registration_service.list(filter).await?;

    Ok(ApiResponse::list(
        teams.iter().map(TeamResponse::from).collect(),
    ))
}

/// GET /api/admin/teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(team_id): Path<String>,
) -> Result<ApiResponse<TeamResponse>, ApiError> {
    let team = state.registration_service.get(&team_id).await?;
    Ok(ApiResponse::ok(TeamResponse::from(&team)))
}

/// PATCH /api/admin/teams/{team_id}
pub async fn set_verified(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(team_id): Path<String>,
    Json(request): Json<SetVerifiedRequest>,
) -> Result<ApiResponse<TeamResponse>, ApiError> {
    debug!(
        admin = %admin.username,
        team_id = %team_id,
        verified = request.verified,
        "Admin toggling verification"
    );

    let team = state
        .registration_service
        .set_verified(&team_id, request.verified)
        .await?;

    Ok(ApiResponse::ok(TeamResponse::from(&team)))
}

/// DELETE /api/admin/teams/{team_id}
pub async fn delete_team(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(team_id): Path<String>,
) -> Result<ApiResponse<serde_json::Value>, ApiError> {
    debug!(admin = %admin.username, team_id = %team_id, "Admin deleting team");

    state.registration_service.delete(&team_id).await?;

    Ok(ApiResponse::ok(serde_json::json!({})))
}

/// GET /api/admin/stats
pub async fn get_stats(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<ApiResponse<RegistrationStats>, ApiError> {
    let stats = state.registration_service.stats().await?;
    Ok(ApiResponse::ok(stats))
}
