//! Admin repository trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::entity::Admin;
use crate::domain::DomainError;

/// Repository trait for admin storage
#[async_trait]
pub trait AdminRepository: Send + Sync + Debug {
    /// Get an admin by username (for login)
    async fn get_by_username(&self, username: &str) -> Result<Option<Admin>, DomainError>;

    /// Create a new admin, failing with a conflict if the username is taken
    async fn create(&self, admin: Admin) -> Result<Admin, DomainError>;

    /// Update an existing admin
    async fn update(&self, admin: &Admin) -> Result<Admin, DomainError>;

    /// Number of provisioned admins
    async fn count(&self) -> Result<usize, DomainError>;
}


#[cfg(test)]
mod tests {
    use super::mock::MockAdminRepository;
    use super::*;

    #[tokio::test]
    async fn test_mock_create_and_lookup() {
        let repo = MockAdminRepository::new();
        repo.create(Admin::new("admin", "hash")).await.unwrap();

        let found = repo.get_by_username("admin").await.unwrap();
        assert_eq!(found.unwrap().username(), "admin");
        assert!(repo.get_by_username("other").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_mock_duplicate_username() {
        let repo = MockAdminRepository::new();
        repo.create(Admin::new("admin", "hash")).await.unwrap();

        let result = repo.create(Admin::new("admin", "hash2")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let repo = MockAdminRepository::new();
        repo.set_should_fail(true).await;

        assert!(repo.count().await.is_err());
    }
}
