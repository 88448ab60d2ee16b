//! Team domain module
//!
//! A team is one tournament registration: a name, an eight player roster with
//! exactly one captain, and a payment screenshot awaiting operator review.

mod entity;
mod repository;
mod validation;

pub use entity::{Player, RegistrationCandidate, Team, TeamId, VerificationStatus};
pub use repository::{TeamQuery, TeamRepository, VerificationFilter};
pub use validation::{
    validate_captain, validate_captain_phone, validate_payment_screenshot, validate_players,
    validate_team_name, RegistrationValidationError, DEFAULT_MAX_SCREENSHOT_BYTES, TEAM_SIZE,
};

#[cfg(test)]
pub use repository::mock;

#[cfg(test)]
pub(crate) use entity::fixtures;
