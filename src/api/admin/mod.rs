//! Admin API endpoints for reviewing registrations

pub mod teams;

use axum::{routing::get, Router};

use super::state::AppState;

/// Create admin API router
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/teams", get(teams::list_teams))
        .route(
            "/teams/{team_id}",
            get(teams::get_team)
                .patch(teams::set_verified)
                .delete(teams::delete_team),
        )
        .route("/stats", get(teams::get_stats))
}
