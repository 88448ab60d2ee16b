//! Team repository trait

use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::entity::{Team, TeamId};
use crate::domain::DomainError;

/// Verification filter used when listing teams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationFilter {
    #[default]
    All,
    Verified,
    Pending,
}

impl VerificationFilter {
    pub fn matches(&self, team: &Team) -> bool {
        match self {
            Self::All => true,
            Self::Verified => team.is_verified(),
            Self::Pending => !team.is_verified(),
        }
    }
}

impl FromStr for VerificationFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "verified" => Ok(Self::Verified),
            "pending" => Ok(Self::Pending),
            other => Err(DomainError::validation(format!(
                "Unknown filter '{}', expected all, verified or pending",
                other
            ))),
        }
    }
}

/// Query parameters for listing teams
#[derive(Debug, Clone, Default)]
pub struct TeamQuery {
    /// Filter by verification state
    pub filter: VerificationFilter,
}

impl TeamQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: VerificationFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Filter, then order newest first
    pub fn apply(&self, teams: Vec<Team>) -> Vec<Team> {
        let mut result: Vec<Team> = teams
            .into_iter()
            .filter(|t| self.filter.matches(t))
            .collect();

        result.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        result
    }
}

/// Repository for managing registered teams
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// Get a team by ID
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;

    /// Insert a team unless `capacity` teams are already stored.
    ///
    /// Returns `Ok(None)` when the roster is full. The capacity check and the
    /// insert are atomic with respect to concurrent submissions.
    async fn create_within_capacity(
        &self,
        team: Team,
        capacity: usize,
    ) -> Result<Option<Team>, DomainError>;

    /// Update an existing team
    async fn update(&self, team: Team) -> Result<Team, DomainError>;

    /// Delete a team by ID
    async fn delete(&self, id: &TeamId) -> Result<bool, DomainError>;

    /// List teams, newest first
    async fn list(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError>;

    /// Count teams matching query
    async fn count(&self, query: &TeamQuery) -> Result<usize, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Mock implementation for testing
    #[derive(Debug, Default)]
    pub struct MockTeamRepository {
        teams: RwLock<HashMap<String, Team>>,
        fail: bool,
    }

    impl MockTeamRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Every call fails with a storage error
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn check(&self) -> Result<(), DomainError> {
            if self.fail {
                return Err(DomainError::storage("Simulated storage failure"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TeamRepository for MockTeamRepository {
        async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
            self.check()?;
            let teams = self.teams.read().unwrap();
            Ok(teams.get(id.as_str()).cloned())
        }

        async fn create_within_capacity(
            &self,
            team: Team,
            capacity: usize,
        ) -> Result<Option<Team>, DomainError> {
            self.check()?;
            let mut teams = self.teams.write().unwrap();

            if teams.len() >= capacity {
                return Ok(None);
            }

            teams.insert(team.id().as_str().to_string(), team.clone());
            Ok(Some(team))
        }

        async fn update(&self, team: Team) -> Result<Team, DomainError> {
            self.check()?;
            let mut teams = self.teams.write().unwrap();

            if !teams.contains_key(team.id().as_str()) {
                return Err(DomainError::not_found(format!(
                    "Team '{}' not found",
                    team.id()
                )));
            }

            teams.insert(team.id().as_str().to_string(), team.clone());
            Ok(team)
        }

        async fn delete(&self, id: &TeamId) -> Result<bool, DomainError> {
            self.check()?;
            let mut teams = self.teams.write().unwrap();
            Ok(teams.remove(id.as_str()).is_some())
        }

        async fn list(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError> {
            self.check()?;
            let teams = self.teams.read().unwrap();
            Ok(query.apply(teams.values().cloned().collect()))
        }

        async fn count(&self, query: &TeamQuery) -> Result<usize, DomainError> {
            self.check()?;
            let teams = self.teams.read().unwrap();
            Ok(teams.values().filter(|t| query.filter.matches(t)).count())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockTeamRepository;
    use super::*;
    use crate::domain::team::entity::fixtures::candidate;
    use crate::domain::team::validation::DEFAULT_MAX_SCREENSHOT_BYTES;

    fn team(name: &str) -> Team {
        Team::register(candidate(name), DEFAULT_MAX_SCREENSHOT_BYTES).unwrap()
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("all".parse::<VerificationFilter>().unwrap(), VerificationFilter::All);
        assert_eq!("".parse::<VerificationFilter>().unwrap(), VerificationFilter::All);
        assert_eq!(
            "Verified".parse::<VerificationFilter>().unwrap(),
            VerificationFilter::Verified
        );
        assert_eq!(
            "pending".parse::<VerificationFilter>().unwrap(),
            VerificationFilter::Pending
        );
        assert!("approved".parse::<VerificationFilter>().is_err());
    }

    #[tokio::test]
    async fn test_create_within_capacity() {
        let repo = MockTeamRepository::new();

        assert!(repo.create_within_capacity(team("A"), 2).await.unwrap().is_some());
        assert!(repo.create_within_capacity(team("B"), 2).await.unwrap().is_some());
        assert!(repo.create_within_capacity(team("C"), 2).await.unwrap().is_none());

        assert_eq!(repo.count(&TeamQuery::new()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = MockTeamRepository::new();

        for name in ["First", "Second", "Third"] {
            repo.create_within_capacity(team(name), 6).await.unwrap();
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        let teams = repo.list(&TeamQuery::new()).await.unwrap();
        let names: Vec<&str> = teams.iter().map(|t| t.team_name()).collect();
        assert_eq!(names, vec!["Third", "Second", "First"]);
    }

    #[tokio::test]
    async fn test_list_with_filter() {
        let repo = MockTeamRepository::new();

        let mut verified = team("Verified");
        verified.set_verified(true);
        repo.create_within_capacity(verified, 6).await.unwrap();
        repo.create_within_capacity(team("Pending"), 6).await.unwrap();

        let query = TeamQuery::new().with_filter(VerificationFilter::Verified);
        let teams = repo.list(&query).await.unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].team_name(), "Verified");

        let query = TeamQuery::new().with_filter(VerificationFilter::Pending);
        assert_eq!(repo.count(&query).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = MockTeamRepository::new();
        let created = repo
            .create_within_capacity(team("Falcons"), 6)
            .await
            .unwrap()
            .unwrap();
        let id = created.id().clone();

        let mut fetched = repo.get(&id).await.unwrap().unwrap();
        fetched.set_verified(true);
        repo.update(fetched).await.unwrap();
        assert!(repo.get(&id).await.unwrap().unwrap().is_verified());

        assert!(repo.delete(&id).await.unwrap());
        assert!(!repo.delete(&id).await.unwrap());
        assert!(repo.get(&id).await.unwrap().is_none());
    }
}
