//! Admin entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::AdminValidationError;
use crate::domain::storage::{StorageEntity, StorageKey};

/// Admin identifier - a hyphenated UUID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AdminId(String);

impl AdminId {
    pub fn new(id: impl Into<String>) -> Result<Self, AdminValidationError> {
        let id = id.into();
        let uuid =
            Uuid::parse_str(&id).map_err(|_| AdminValidationError::InvalidAdminId(id.clone()))?;
        Ok(Self(uuid.hyphenated().to_string()))
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AdminId {
    type Error = AdminValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AdminId> for String {
    fn from(id: AdminId) -> Self {
        id.0
    }
}

impl std::fmt::Display for AdminId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for AdminId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Operator account allowed to review registrations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    id: AdminId,
    username: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_login_at: Option<DateTime<Utc>>,
}

impl Admin {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id: AdminId::generate(),
            username: username.into(),
            password_hash: password_hash.into(),
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    pub fn id(&self) -> &AdminId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    /// Record a successful login
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
    }
}

/// Persisted form of an admin
///
/// `Admin` skips the password hash when serialized so it can be handed to API
/// responses; storage needs the hash, hence this separate record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRecord {
    id: AdminId,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    last_login_at: Option<DateTime<Utc>>,
}

impl From<Admin> for AdminRecord {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
            password_hash: admin.password_hash,
            created_at: admin.created_at,
            updated_at: admin.updated_at,
            last_login_at: admin.last_login_at,
        }
    }
}

impl From<AdminRecord> for Admin {
    fn from(record: AdminRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            password_hash: record.password_hash,
            created_at: record.created_at,
            updated_at: record.updated_at,
            last_login_at: record.last_login_at,
        }
    }
}

impl AdminRecord {
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl StorageEntity for AdminRecord {
    type Key = AdminId;

    const COLLECTION: &'static str = "admins";

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
