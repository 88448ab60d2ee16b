//! Admin infrastructure module
//!
//! Argon2 password hashing, the storage-backed admin repository and the
//! service used for provisioning and login.

mod password;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::StorageAdminRepository;
pub use service::{AdminService, INVALID_CREDENTIALS};
