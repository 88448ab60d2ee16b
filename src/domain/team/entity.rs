//! Team registration entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{
    validate_captain, validate_captain_phone, validate_payment_screenshot, validate_players,
    validate_team_name, RegistrationValidationError,
};
use crate::domain::storage::{StorageEntity, StorageKey};

/// Team identifier - a hyphenated UUID assigned on registration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamId(String);

impl TeamId {
    /// Parse a TeamId from its textual form
    pub fn new(id: impl Into<String>) -> Result<Self, RegistrationValidationError> {
        let id = id.into();
        let uuid = Uuid::parse_str(id.trim())
            .map_err(|_| RegistrationValidationError::InvalidTeamId(id.clone()))?;
        Ok(Self(uuid.hyphenated().to_string()))
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TeamId {
    type Error = RegistrationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for String {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for TeamId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Verification state of a registration
///
/// Transitions only happen through an explicit operator action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Awaiting operator review
    #[default]
    Pending,
    /// Payment reviewed and accepted by an operator
    Verified,
}

impl VerificationStatus {
    pub fn from_verified(verified: bool) -> Self {
        if verified {
            Self::Verified
        } else {
            Self::Pending
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Verified => write!(f, "verified"),
        }
    }
}

/// A rostered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    is_captain: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, is_captain: bool) -> Self {
        Self {
            name: name.into().trim().to_string(),
            is_captain,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_captain(&self) -> bool {
        self.is_captain
    }
}

/// Unvalidated registration as submitted by the public form
#[derive(Debug, Clone, Default)]
pub struct RegistrationCandidate {
    pub team_name: Option<String>,
    pub players: Vec<Player>,
    pub payment_screenshot: Option<String>,
    pub captain_phone: Option<String>,
}

/// Registered team entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier
    id: TeamId,
    /// Display name, trimmed
    team_name: String,
    /// Exactly eight players, one of them captain
    players: Vec<Player>,
    /// Opaque payment proof, usually an image data URL
    payment_screenshot: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    captain_phone: Option<String>,
    status: VerificationStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Team {
    /// Validate a candidate and build a new pending team from it
    pub fn register(
        candidate: RegistrationCandidate,
        max_screenshot_bytes: usize,
    ) -> Result<Self, RegistrationValidationError> {
        let team_name = candidate
            .team_name
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        let captain_phone = candidate
            .captain_phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        validate_team_name(&team_name)?;
        validate_players(&candidate.players)?;
        validate_captain(&candidate.players)?;
        validate_payment_screenshot(
            candidate.payment_screenshot.as_deref(),
            max_screenshot_bytes,
        )?;
        validate_captain_phone(captain_phone.as_deref())?;

        let now = Utc::now();

        Ok(Self {
            id: TeamId::generate(),
            team_name,
            players: candidate.players,
            payment_screenshot: candidate
                .payment_screenshot
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            captain_phone,
            status: VerificationStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    // Getters

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn payment_screenshot(&self) -> &str {
        &self.payment_screenshot
    }

    pub fn captain_phone(&self) -> Option<&str> {
        self.captain_phone.as_deref()
    }

    pub fn status(&self) -> VerificationStatus {
        self.status
    }

    pub fn is_verified(&self) -> bool {
        self.status.is_verified()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Set the verification flag. Returns false when the team already had
    /// the requested state, in which case nothing is touched.
    pub fn set_verified(&mut self, verified: bool) -> bool {
        let status = VerificationStatus::from_verified(verified);

        if self.status == status {
            return false;
        }

        self.status = status;
        self.touch();
        true
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for Team {
    type Key = TeamId;

    const COLLECTION: &'static str = "teams";

    fn key(&self) -> &Self::Key {
        &self.id
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::candidate;
    use super::*;
    use crate::domain::team::validation::DEFAULT_MAX_SCREENSHOT_BYTES;

    fn register(candidate: RegistrationCandidate) -> Result<Team, RegistrationValidationError> {
        Team::register(candidate, DEFAULT_MAX_SCREENSHOT_BYTES)
    }

    #[test]
    fn test_team_id_roundtrip() {
        let id = TeamId::generate();
        let parsed = TeamId::new(id.as_str()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_team_id_invalid() {
        assert!(TeamId::new("").is_err());
        assert!(TeamId::new("not-a-uuid").is_err());
        assert!(TeamId::new("64b7f0c2e4b0a1a2b3c4d5e6").is_err());
    }

    #[test]
    fn test_register_falcons() {
        let team = register(candidate("Falcons")).unwrap();

        assert_eq!(team.team_name(), "Falcons");
        assert_eq!(team.players().len(), 8);
        assert_eq!(team.status(), VerificationStatus::Pending);
        assert!(!team.is_verified());
        assert_eq!(team.players().iter().filter(|p| p.is_captain()).count(), 1);
        assert_eq!(team.created_at(), team.updated_at());
        assert!(TeamId::new(team.id().as_str()).is_ok());
    }

    #[test]
    fn test_register_trims_name() {
        let mut c = candidate("Falcons");
        c.team_name = Some("  Falcons  ".to_string());

        let team = register(c).unwrap();
        assert_eq!(team.team_name(), "Falcons");
    }

    #[test]
    fn test_register_blank_name() {
        let mut c = candidate("Falcons");
        c.team_name = Some("   ".to_string());

        assert_eq!(
            register(c).unwrap_err(),
            RegistrationValidationError::EmptyTeamName
        );
    }

    #[test]
    fn test_first_failing_check_wins() {
        // Bad roster and missing screenshot: roster is checked first
        let mut c = candidate("Falcons");
        c.players.truncate(5);
        c.payment_screenshot = None;

        assert!(matches!(
            register(c).unwrap_err(),
            RegistrationValidationError::WrongPlayerCount { actual: 5, .. }
        ));

        // No captain and missing screenshot: captain is checked first
        let mut c = candidate("Falcons");
        c.players = (1..=8).map(|i| Player::new(format!("P{}", i), false)).collect();
        c.payment_screenshot = None;

        assert_eq!(register(c).unwrap_err(), RegistrationValidationError::NoCaptain);
    }

    #[test]
    fn test_register_invalid_phone() {
        let mut c = candidate("Falcons");
        c.captain_phone = Some("123".to_string());

        assert_eq!(
            register(c).unwrap_err(),
            RegistrationValidationError::InvalidCaptainPhone
        );
    }

    #[test]
    fn test_blank_phone_is_ignored() {
        let mut c = candidate("Falcons");
        c.captain_phone = Some("  ".to_string());

        let team = register(c).unwrap();
        assert!(team.captain_phone().is_none());
    }

    #[test]
    fn test_set_verified_transitions() {
        let mut team = register(candidate("Falcons")).unwrap();
        let created = team.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));

        assert!(team.set_verified(true));
        assert!(team.is_verified());
        let verified_at = team.updated_at();
        assert!(verified_at > created);

        // Idempotent: same value leaves timestamps alone
        assert!(!team.set_verified(true));
        assert_eq!(team.updated_at(), verified_at);

        assert!(team.set_verified(false));
        assert_eq!(team.status(), VerificationStatus::Pending);
    }

    #[test]
    fn test_team_serialization_roundtrip() {
        let team = register(candidate("Falcons")).unwrap();

        let json = serde_json::to_value(&team).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["players"][0]["is_captain"], true);

        let back: Team = serde_json::from_value(json).unwrap();
        assert_eq!(back.id(), team.id());
        assert_eq!(back.team_name(), "Falcons");
    }
}
