//! Storage-backed team repository implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::storage::Storage;
use crate::domain::team::{Team, TeamId, TeamQuery, TeamRepository, VerificationFilter};
use crate::domain::DomainError;

/// Storage-backed implementation of TeamRepository
#[derive(Debug)]
pub struct StorageTeamRepository {
    storage: Arc<dyn Storage<Team>>,
}

impl StorageTeamRepository {
    pub fn new(storage: Arc<dyn Storage<Team>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl TeamRepository for StorageTeamRepository {
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        self.storage.get(id).await
    }

    async fn create_within_capacity(
        &self,
        team: Team,
        capacity: usize,
    ) -> Result<Option<Team>, DomainError> {
        self.storage.create_within_limit(team, capacity).await
    }

    async fn update(&self, team: Team) -> Result<Team, DomainError> {
        if !self.storage.exists(team.id()).await? {
            return Err(DomainError::not_found(format!(
                "Team '{}' not found",
                team.id()
            )));
        }

        self.storage.update(team).await
    }

    async fn delete(&self, id: &TeamId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }

    async fn list(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError> {
        Ok(query.apply(self.storage.list().await?))
    }

    async fn count(&self, query: &TeamQuery) -> Result<usize, DomainError> {
        if query.filter == VerificationFilter::All {
            return self.storage.count().await;
        }

        let teams = self.storage.list().await?;
        Ok(teams.iter().filter(|t| query.filter.matches(t)).count())
    }
}
