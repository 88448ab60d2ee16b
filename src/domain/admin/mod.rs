//! Admin domain module
//!
//! Admins are the operators who review payment screenshots and toggle team
//! verification.

mod entity;
mod repository;
mod validation;

pub use entity::{Admin, AdminId, AdminRecord};
pub use repository::AdminRepository;
pub use validation::{validate_password, validate_username, AdminValidationError};

#[cfg(test)]
pub use repository::mock;
