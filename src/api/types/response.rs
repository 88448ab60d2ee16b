//! Success envelope and resource representations

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::json::Json;
use crate::domain::{Admin, Team};

/// Success envelope: `{"success": true, "data": ..., "count": n}`
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            count: None,
            status: StatusCode::OK,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::ok(data)
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    pub fn list(data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            count: Some(count),
            ..Self::ok(data)
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Player as exposed over HTTP
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub name: String,
    pub is_captain: bool,
}

/// Registered team as exposed over HTTP
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: String,
    pub team_name: String,
    pub players: Vec<PlayerResponse>,
    pub payment_screenshot: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captain_phone: Option<String>,
    pub verified: bool,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().as_str().to_string(),
            team_name: team.team_name().to_string(),
            players: team
                .players()
                .iter()
                .map(|p| PlayerResponse {
                    name: p.name().to_string(),
                    is_captain: p.is_captain(),
                })
                .collect(),
            payment_screenshot: team.payment_screenshot().to_string(),
            captain_phone: team.captain_phone().map(String::from),
            verified: team.is_verified(),
            status: team.status().to_string(),
            created_at: team.created_at().to_rfc3339(),
            updated_at: team.updated_at().to_rfc3339(),
        }
    }
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self::from(&team)
    }
}

/// Admin identity as exposed over HTTP; never carries the password hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
}

impl From<&Admin> for AdminResponse {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id().as_str().to_string(),
            username: admin.username().to_string(),
            last_login_at: admin.last_login_at().map(|t| t.to_rfc3339()),
        }
    }
}
