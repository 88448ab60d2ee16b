//! Storage-backed admin repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::admin::{Admin, AdminRecord, AdminRepository};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Admin repository on top of the generic storage
///
/// Admins are few, so username lookups scan the collection.
#[derive(Debug)]
pub struct StorageAdminRepository {
    storage: Arc<dyn Storage<AdminRecord>>,
}

impl StorageAdminRepository {
    pub fn new(storage: Arc<dyn Storage<AdminRecord>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl AdminRepository for StorageAdminRepository {
    async fn get_by_username(&self, username: &str) -> Result<Option<Admin>, DomainError> {
        let records = self.storage.list().await?;

        Ok(records
            .into_iter()
            .find(|r| r.username() == username)
            .map(Admin::from))
    }

    async fn create(&self, admin: Admin) -> Result<Admin, DomainError> {
        if self.get_by_username(admin.username()).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Admin '{}' already exists",
                admin.username()
            )));
        }

        self.storage
            .create(AdminRecord::from(admin))
            .await
            .map(Admin::from)
    }

    async fn update(&self, admin: &Admin) -> Result<Admin, DomainError> {
        self.storage
            .update(AdminRecord::from(admin.clone()))
            .await
            .map(Admin::from)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    fn create_repo() -> StorageAdminRepository {
        StorageAdminRepository::new(Arc::new(InMemoryStorage::<AdminRecord>::new()))
    }

    #[tokio::test]
    async fn test_create_and_lookup_keeps_hash() {
        let repo = create_repo();
        repo.create(Admin::new("admin", "$argon2id$hash")).await.unwrap();

        let admin = repo.get_by_username("admin").await.unwrap().unwrap();
        assert_eq!(admin.password_hash(), "$argon2id$hash");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_lookup_is_exact_match() {
        let repo = create_repo();
        repo.create(Admin::new("admin", "hash")).await.unwrap();

        assert!(repo.get_by_username("Admin").await.unwrap().is_none());
        assert!(repo.get_by_username("admin ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let repo = create_repo();
        repo.create(Admin::new("admin", "hash")).await.unwrap();

        let result = repo.create(Admin::new("admin", "other")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_records_login() {
        let repo = create_repo();
        let mut admin = repo.create(Admin::new("admin", "hash")).await.unwrap();

        admin.record_login();
        repo.update(&admin).await.unwrap();

        let fetched = repo.get_by_username("admin").await.unwrap().unwrap();
        assert!(fetched.last_login_at().is_some());
    }
}
