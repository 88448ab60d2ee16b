//! Registration service: admission, verification and deletion of teams

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::admission::{AdmissionPolicy, AdmissionStatus};
use crate::domain::team::{
    RegistrationCandidate, Team, TeamId, TeamQuery, TeamRepository, VerificationFilter,
};
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_registration, RegistrationOutcome};

/// Registration counts for the operator dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistrationStats {
    pub total: usize,
    pub verified: usize,
    pub pending: usize,
    pub capacity: usize,
}

/// Registration service for managing teams
#[derive(Debug)]
pub struct RegistrationService<R: TeamRepository> {
    repository: Arc<R>,
    policy: AdmissionPolicy,
    max_screenshot_bytes: usize,
}

impl<R: TeamRepository> RegistrationService<R> {
    pub fn new(repository: Arc<R>, policy: AdmissionPolicy, max_screenshot_bytes: usize) -> Self {
        Self {
            repository,
            policy,
            max_screenshot_bytes,
        }
    }

    /// Validate and admit a new team
    ///
    /// Validation runs first, so a malformed submission is reported as such
    /// even once registration has closed.
    pub async fn submit(&self, candidate: RegistrationCandidate) -> Result<Team, DomainError> {
        let team = match Team::register(candidate, self.max_screenshot_bytes) {
            Ok(team) => team,
            Err(e) => {
                debug!(error = %e, "Registration rejected by validation");
                record_registration(RegistrationOutcome::RejectedValidation);
                return Err(DomainError::validation(e.to_string()));
            }
        };

        let team_name = team.team_name().to_string();

        match self
            .repository
            .create_within_capacity(team, self.policy.capacity())
            .await?
        {
            Some(team) => {
                info!(id = %team.id(), team_name = %team_name, "Team registered");
                record_registration(RegistrationOutcome::Accepted);
                Ok(team)
            }
            None => {
                warn!(
                    team_name = %team_name,
                    capacity = self.policy.capacity(),
                    "Registration rejected, capacity reached"
                );
                record_registration(RegistrationOutcome::RejectedCapacity);
                Err(DomainError::capacity_reached(self.policy.capacity()))
            }
        }
    }

    /// Get a team by ID
    pub async fn get(&self, id: &str) -> Result<Team, DomainError> {
        let team_id = parse_id(id)?;

        self.repository
            .get(&team_id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// List teams, newest first
    pub async fn list(&self, filter: VerificationFilter) -> Result<Vec<Team>, DomainError> {
        self.repository
            .list(&TeamQuery::new().with_filter(filter))
            .await
    }

    /// Set the verification flag of a team
    ///
    /// Setting the value a team already has is a successful no-op.
    pub async fn set_verified(&self, id: &str, verified: bool) -> Result<Team, DomainError> {
        let team_id = parse_id(id)?;

        let mut team = self
            .repository
            .get(&team_id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if !team.set_verified(verified) {
            debug!(id = %id, verified, "Verification unchanged");
            return Ok(team);
        }

        info!(id = %id, status = %team.status(), "Team verification updated");
        self.repository.update(team).await
    }

    /// Delete a team
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let team_id = parse_id(id)?;

        if !self.repository.delete(&team_id).await? {
            return Err(not_found(id));
        }

        info!(id = %id, "Team deleted");
        Ok(())
    }

    /// Read-only capacity check against the live count
    pub async fn can_admit(&self) -> Result<bool, DomainError> {
        let registered = self.repository.count(&TeamQuery::new()).await?;
        Ok(self.policy.can_admit(registered))
    }

    /// Current state of the registration window
    pub async fn status(&self) -> Result<AdmissionStatus, DomainError> {
        let registered = self.repository.count(&TeamQuery::new()).await?;
        Ok(self.policy.status(registered))
    }

    pub async fn stats(&self) -> Result<RegistrationStats, DomainError> {
        let teams = self.repository.list(&TeamQuery::new()).await?;
        let verified = teams.iter().filter(|t| t.is_verified()).count();

        Ok(RegistrationStats {
            total: teams.len(),
            verified,
            pending: teams.len() - verified,
            capacity: self.policy.capacity(),
        })
    }
}

fn parse_id(id: &str) -> Result<TeamId, DomainError> {
    TeamId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))
}

fn not_found(id: &str) -> DomainError {
    DomainError::not_found(format!("Team '{}' not found", id))
}
