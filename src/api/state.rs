//! Application state for shared services

use std::sync::Arc;

use crate::domain::admin::AdminRepository;
use crate::domain::admission::AdmissionStatus;
use crate::domain::team::{RegistrationCandidate, TeamRepository, VerificationFilter};
use crate::domain::{Admin, DomainError, Team};
use crate::infrastructure::admin::{AdminService, PasswordHasher};
use crate::infrastructure::auth::SessionService;
use crate::infrastructure::team::{RegistrationService, RegistrationStats};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub registration_service: Arc<dyn RegistrationServiceTrait>,
    pub admin_service: Arc<dyn AdminServiceTrait>,
    pub session_service: Arc<SessionService>,
}

impl AppState {
    pub fn new(
        registration_service: Arc<dyn RegistrationServiceTrait>,
        admin_service: Arc<dyn AdminServiceTrait>,
        session_service: Arc<SessionService>,
    ) -> Self {
        Self {
            registration_service,
            admin_service,
            session_service,
        }
    }
}

/// Trait for registration service operations
#[async_trait::async_trait]
pub trait RegistrationServiceTrait: Send + Sync {
    async fn submit(&self, candidate: RegistrationCandidate) -> Result<Team, DomainError>;
    async fn get(&self, id: &str) -> Result<Team, DomainError>;
    async fn list(&self, filter: VerificationFilter) -> Result<Vec<Team>, DomainError>;
    async fn set_verified(&self, id: &str, verified: bool) -> Result<Team, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
    async fn status(&self) -> Result<AdmissionStatus, DomainError>;
    async fn stats(&self) -> Result<RegistrationStats, DomainError>;
}

/// Trait for admin credential operations
#[async_trait::async_trait]
pub trait AdminServiceTrait: Send + Sync {
    async fn provision(&self, username: &str, password: &str) -> Result<Admin, DomainError>;
    async fn authenticate(&self, username: &str, password: &str) -> Result<Admin, DomainError>;
    async fn get_by_username(&self, username: &str) -> Result<Option<Admin>, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R: TeamRepository + 'static> RegistrationServiceTrait for RegistrationService<R> {
    async fn submit(&self, candidate: RegistrationCandidate) -> Result<Team, DomainError> {
        RegistrationService::submit(self, candidate).await
    }

    async fn get(&self, id: &str) -> Result<Team, DomainError> {
        RegistrationService::get(self, id).await
    }

    async fn list(&self, filter: VerificationFilter) -> Result<Vec<Team>, DomainError> {
        RegistrationService::list(self, filter).await
    }

    async fn set_verified(&self, id: &str, verified: bool) -> Result<Team, DomainError> {
        RegistrationService::set_verified(self, id, verified).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        RegistrationService::delete(self, id).await
    }

    async fn status(&self) -> Result<AdmissionStatus, DomainError> {
        RegistrationService::status(self).await
    }

    async fn stats(&self) -> Result<RegistrationStats, DomainError> {
        RegistrationService::stats(self).await
    }
}

#[async_trait::async_trait]
impl<R, H> AdminServiceTrait for AdminService<R, H>
where
    R: AdminRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn provision(&self, username: &str, password: &str) -> Result<Admin, DomainError> {
        AdminService::provision(self, username, password).await
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<Admin, DomainError> {
        AdminService::authenticate(self, username, password).await
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<Admin>, DomainError> {
        AdminService::get_by_username(self, username).await
    }
}
