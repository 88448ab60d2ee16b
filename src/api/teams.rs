//! Public registration endpoints

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json, TeamResponse};
use crate::domain::admission::AdmissionStatus;
use crate::domain::team::{Player, RegistrationCandidate};

/// Create the public registration router
pub fn create_public_router() -> Router<AppState> {
    Router::new()
        .route("/teams", post(submit_team))
        .route("/registration/status", get(registration_status))
}

/// Player as submitted by the registration form
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_captain: bool,
}

/// Registration form body. Every field is optional here so that missing
/// values are reported by domain validation in a fixed order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTeamRequest {
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub players: Vec<PlayerRequest>,
    #[serde(default)]
    pub payment_screenshot: Option<String>,
    #[serde(default)]
    pub captain_phone: Option<String>,
}

impl From<SubmitTeamRequest> for RegistrationCandidate {
    fn from(request: SubmitTeamRequest) -> Self {
        Self {
            team_name: request.team_name,
            players: request
                .players
                .into_iter()
                .map(|p| Player::new(p.name, p.is_captain))
                .collect(),
            payment_screenshot: request.payment_screenshot,
            captain_phone: request.captain_phone,
        }
    }
}

/// POST /api/teams
pub async fn submit_team(
    State(state): State<AppState>,
    Json(request): Json<SubmitTeamRequest>,
) -> Result<ApiResponse<TeamResponse>, ApiError> {
    debug!(players = request.players.len(), "Registration submitted");

    let team = state
        .registration_service
        .submit(RegistrationCandidate::from(request))
        .await?;

    Ok(ApiResponse::created(TeamResponse::from(&team)))
}

/// GET /api/registration/status
pub async fn registration_status(
    State(state): State<AppState>,
) -> Result<ApiResponse<AdmissionStatus>, ApiError> {
    let status = state.registration_service.status().await?;
    Ok(ApiResponse::ok(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_camel_case() {
        let request: SubmitTeamRequest = serde_json::from_str(
            r#"{
                "teamName": "  Falcons ",
                "players": [{"name": " Ann ", "isCaptain": true}, {"name": "Bo"}],
                "paymentScreenshot": "data:image/png;base64,aGk=",
                "captainPhone": "0123456789"
            }"#,
        )
        .unwrap();

        let candidate = RegistrationCandidate::from(request);

        assert_eq!(candidate.team_name.as_deref(), Some("  Falcons "));
        assert_eq!(candidate.players.len(), 2);
        assert_eq!(candidate.players[0].name(), "Ann");
        assert!(candidate.players[0].is_captain());
        assert!(!candidate.players[1].is_captain());
        assert_eq!(candidate.captain_phone.as_deref(), Some("0123456789"));
    }

    #[test]
    fn test_empty_body_deserializes() {
        let request: SubmitTeamRequest = serde_json::from_str("{}").unwrap();
        let candidate = RegistrationCandidate::from(request);

        assert!(candidate.team_name.is_none());
        assert!(candidate.players.is_empty());
        assert!(candidate.payment_screenshot.is_none());
    }
}
