//! Admin service for provisioning and credential checks

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::domain::admin::{validate_password, validate_username, Admin, AdminRepository};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Message shared by every failed credential check
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Hashed once and verified against when the username is unknown
const DUMMY_PASSWORD: &str = "no-such-admin-placeholder";

/// Admin service for authentication and provisioning
#[derive(Debug)]
pub struct AdminService<R: AdminRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
    dummy_hash: OnceCell<String>,
}

impl<R: AdminRepository, H: PasswordHasher> AdminService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            repository,
            hasher,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Create the single admin account
    ///
    /// Fails with a conflict once any admin exists, so provisioning can only
    /// happen once per deployment.
    pub async fn provision(&self, username: &str, password: &str) -> Result<Admin, DomainError> {
        let username = username.trim();

        validate_username(username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(password).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.count().await? > 0 {
            return Err(DomainError::conflict("Admin already exists"));
        }

        let password_hash = self.hasher.hash(password)?;
        let admin = self.repository.create(Admin::new(username, password_hash)).await?;

        info!(username = %admin.username(), id = %admin.id(), "Admin provisioned");
        Ok(admin)
    }

    /// Check a username/password pair
    ///
    /// An unknown username and a wrong password produce the same error, and
    /// both pay for a full hash verification.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Admin, DomainError> {
        let username = username.trim();

        if username.is_empty() || password.is_empty() {
            return Err(DomainError::validation("Username and password are required"));
        }

        let Some(mut admin) = self.repository.get_by_username(username).await? else {
            let dummy = self
                .dummy_hash
                .get_or_try_init(|| self.hasher.hash(DUMMY_PASSWORD))?;
            let _ = self.hasher.verify(password, dummy);

            warn!(username = %username, "Login failed");
            return Err(DomainError::unauthorized(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify(password, admin.password_hash()) {
            warn!(username = %username, "Login failed");
            return Err(DomainError::unauthorized(INVALID_CREDENTIALS));
        }

        admin.record_login();
        let admin = self.repository.update(&admin).await?;

        info!(username = %admin.username(), "Admin logged in");
        Ok(admin)
    }

    /// Look up an admin by username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<Admin>, DomainError> {
        self.repository.get_by_username(username).await
    }
}
