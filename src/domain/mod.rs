//! Domain layer - Core business logic and entities

pub mod admin;
pub mod admission;
pub mod error;
pub mod storage;
pub mod team;

pub use admin::{Admin, AdminId, AdminRepository, AdminValidationError};
pub use admission::{AdmissionPolicy, AdmissionStatus, DEFAULT_CAPACITY};
pub use error::DomainError;
pub use storage::{Storage, StorageEntity, StorageKey};
pub use team::{
    Player, RegistrationCandidate, RegistrationValidationError, Team, TeamId, TeamQuery,
    TeamRepository, VerificationFilter, VerificationStatus,
};
