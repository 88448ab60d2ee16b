//! Registration validation
//!
//! Checks run in a fixed order and the first failure is reported:
//! team name, roster, captain, payment screenshot, then captain phone.

use base64::{engine::general_purpose::STANDARD, Engine};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::entity::Player;

/// Number of players every registered team must field
pub const TEAM_SIZE: usize = 8;

/// Default upper bound for the decoded payment screenshot (5 MiB)
pub const DEFAULT_MAX_SCREENSHOT_BYTES: usize = 5 * 1024 * 1024;

const MAX_TEAM_NAME_LENGTH: usize = 100;
const MAX_PLAYER_NAME_LENGTH: usize = 100;

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

/// Errors that can occur while validating a registration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistrationValidationError {
    #[error("Please provide a team name")]
    EmptyTeamName,

    #[error("Team name cannot exceed {0} characters")]
    TeamNameTooLong(usize),

    #[error("A team must have exactly {expected} players (got {actual})")]
    WrongPlayerCount { expected: usize, actual: usize },

    #[error("Player {0} must have a name")]
    EmptyPlayerName(usize),

    #[error("Player {0} name cannot exceed {1} characters")]
    PlayerNameTooLong(usize, usize),

    #[error("Team must have a captain")]
    NoCaptain,

    #[error("Team must have exactly one captain (got {0})")]
    MultipleCaptains(usize),

    #[error("Payment screenshot is required")]
    MissingPaymentScreenshot,

    #[error("Payment screenshot must be an image")]
    ScreenshotNotImage,

    #[error("Payment screenshot is not valid base64 data")]
    ScreenshotEncoding,

    #[error("Payment screenshot must be smaller than {0} bytes")]
    ScreenshotTooLarge(usize),

    #[error("Phone number must be 10 digits")]
    InvalidCaptainPhone,

    #[error("Invalid team ID: {0}")]
    InvalidTeamId(String),
}

/// Validate a team name (expects the already trimmed value)
pub fn validate_team_name(name: &str) -> Result<(), RegistrationValidationError> {
    if name.is_empty() {
        return Err(RegistrationValidationError::EmptyTeamName);
    }

    if name.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(RegistrationValidationError::TeamNameTooLong(
            MAX_TEAM_NAME_LENGTH,
        ));
    }

    Ok(())
}

/// Validate roster size and player names
///
/// Player positions in error messages are 1-based.
pub fn validate_players(players: &[Player]) -> Result<(), RegistrationValidationError> {
    if players.len() != TEAM_SIZE {
        return Err(RegistrationValidationError::WrongPlayerCount {
            expected: TEAM_SIZE,
            actual: players.len(),
        });
    }

    for (index, player) in players.iter().enumerate() {
        if player.name().trim().is_empty() {
            return Err(RegistrationValidationError::EmptyPlayerName(index + 1));
        }

        if player.name().chars().count() > MAX_PLAYER_NAME_LENGTH {
            return Err(RegistrationValidationError::PlayerNameTooLong(
                index + 1,
                MAX_PLAYER_NAME_LENGTH,
            ));
        }
    }

    Ok(())
}

/// Validate that exactly one player is flagged as captain
pub fn validate_captain(players: &[Player]) -> Result<(), RegistrationValidationError> {
    match players.iter().filter(|p| p.is_captain()).count() {
        0 => Err(RegistrationValidationError::NoCaptain),
        1 => Ok(()),
        n => Err(RegistrationValidationError::MultipleCaptains(n)),
    }
}

/// Validate the payment screenshot artifact
///
/// `data:` URLs must declare an `image/*` media type and their decoded payload
/// must fit in `max_bytes`. Any other non-empty reference is treated as opaque
/// and only its length is bounded.
pub fn validate_payment_screenshot(
    screenshot: Option<&str>,
    max_bytes: usize,
) -> Result<(), RegistrationValidationError> {
    let screenshot = match screenshot.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Err(RegistrationValidationError::MissingPaymentScreenshot),
    };

    let Some(rest) = screenshot.strip_prefix("data:") else {
        if screenshot.len() > max_bytes {
            return Err(RegistrationValidationError::ScreenshotTooLarge(max_bytes));
        }
        return Ok(());
    };

    let (header, payload) = rest
        .split_once(',')
        .ok_or(RegistrationValidationError::ScreenshotEncoding)?;

    if !header.starts_with("image/") {
        return Err(RegistrationValidationError::ScreenshotNotImage);
    }

    if !header.ends_with(";base64") {
        if payload.len() > max_bytes {
            return Err(RegistrationValidationError::ScreenshotTooLarge(max_bytes));
        }
        return Ok(());
    }

    // base64 expands by 4/3; reject oversized payloads before decoding them
    if payload.len() / 4 * 3 > max_bytes + 3 {
        return Err(RegistrationValidationError::ScreenshotTooLarge(max_bytes));
    }

    let decoded = STANDARD
        .decode(payload)
        .map_err(|_| RegistrationValidationError::ScreenshotEncoding)?;

    if decoded.is_empty() {
        return Err(RegistrationValidationError::MissingPaymentScreenshot);
    }

    if decoded.len() > max_bytes {
        return Err(RegistrationValidationError::ScreenshotTooLarge(max_bytes));
    }

    Ok(())
}

/// Validate the optional captain phone number
pub fn validate_captain_phone(phone: Option<&str>) -> Result<(), RegistrationValidationError> {
    match phone {
        None => Ok(()),
        Some(p) if PHONE_REGEX.is_match(p) => Ok(()),
        Some(_) => Err(RegistrationValidationError::InvalidCaptainPhone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(captains: &[usize]) -> Vec<Player> {
        (0..TEAM_SIZE)
            .map(|i| Player::new(format!("Player {}", i + 1), captains.contains(&i)))
            .collect()
    }

    #[test]
    fn test_valid_team_name() {
        assert!(validate_team_name("Falcons").is_ok());
        assert!(validate_team_name("Team with spaces & symbols!").is_ok());
    }

    #[test]
    fn test_empty_team_name() {
        assert_eq!(
            validate_team_name(""),
            Err(RegistrationValidationError::EmptyTeamName)
        );
    }

    #[test]
    fn test_team_name_too_long() {
        let long_name = "a".repeat(101);
        assert_eq!(
            validate_team_name(&long_name),
            Err(RegistrationValidationError::TeamNameTooLong(100))
        );
    }

    #[test]
    fn test_player_count() {
        assert!(validate_players(&roster(&[0])).is_ok());

        let mut short = roster(&[0]);
        short.pop();
        assert_eq!(
            validate_players(&short),
            Err(RegistrationValidationError::WrongPlayerCount {
                expected: 8,
                actual: 7
            })
        );

        let mut long = roster(&[0]);
        long.push(Player::new("Extra", false));
        assert!(matches!(
            validate_players(&long),
            Err(RegistrationValidationError::WrongPlayerCount { actual: 9, .. })
        ));
    }

    #[test]
    fn test_blank_player_name_reports_position() {
        let mut players = roster(&[0]);
        players[4] = Player::new("   ", false);

        assert_eq!(
            validate_players(&players),
            Err(RegistrationValidationError::EmptyPlayerName(5))
        );
    }

    #[test]
    fn test_captain_rules() {
        assert!(validate_captain(&roster(&[3])).is_ok());
        assert_eq!(
            validate_captain(&roster(&[])),
            Err(RegistrationValidationError::NoCaptain)
        );
        assert_eq!(
            validate_captain(&roster(&[0, 1])),
            Err(RegistrationValidationError::MultipleCaptains(2))
        );
    }

    #[test]
    fn test_missing_screenshot() {
        assert_eq!(
            validate_payment_screenshot(None, DEFAULT_MAX_SCREENSHOT_BYTES),
            Err(RegistrationValidationError::MissingPaymentScreenshot)
        );
        assert_eq!(
            validate_payment_screenshot(Some("  "), DEFAULT_MAX_SCREENSHOT_BYTES),
            Err(RegistrationValidationError::MissingPaymentScreenshot)
        );
    }

    #[test]
    fn test_screenshot_data_url() {
        let payload = STANDARD.encode(b"fake-png-bytes");
        let url = format!("data:image/png;base64,{}", payload);

        assert!(validate_payment_screenshot(Some(&url), DEFAULT_MAX_SCREENSHOT_BYTES).is_ok());
    }

    #[test]
    fn test_screenshot_must_be_image() {
        let payload = STANDARD.encode(b"%PDF-1.4");
        let url = format!("data:application/pdf;base64,{}", payload);

        assert_eq!(
            validate_payment_screenshot(Some(&url), DEFAULT_MAX_SCREENSHOT_BYTES),
            Err(RegistrationValidationError::ScreenshotNotImage)
        );
    }

    #[test]
    fn test_screenshot_too_large() {
        let payload = STANDARD.encode(vec![0u8; 2048]);
        let url = format!("data:image/jpeg;base64,{}", payload);

        assert_eq!(
            validate_payment_screenshot(Some(&url), 1024),
            Err(RegistrationValidationError::ScreenshotTooLarge(1024))
        );
        assert!(validate_payment_screenshot(Some(&url), 4096).is_ok());
    }

    #[test]
    fn test_screenshot_bad_base64() {
        assert_eq!(
            validate_payment_screenshot(
                Some("data:image/png;base64,@@not-base64@@"),
                DEFAULT_MAX_SCREENSHOT_BYTES
            ),
            Err(RegistrationValidationError::ScreenshotEncoding)
        );
    }

    #[test]
    fn test_screenshot_opaque_reference() {
        assert!(validate_payment_screenshot(
            Some("receipts/falcons.png"),
            DEFAULT_MAX_SCREENSHOT_BYTES
        )
        .is_ok());
    }

    #[test]
    fn test_captain_phone() {
        assert!(validate_captain_phone(None).is_ok());
        assert!(validate_captain_phone(Some("9876543210")).is_ok());
        assert_eq!(
            validate_captain_phone(Some("12345")),
            Err(RegistrationValidationError::InvalidCaptainPhone)
        );
        assert_eq!(
            validate_captain_phone(Some("98765-43210")),
            Err(RegistrationValidationError::InvalidCaptainPhone)
        );
    }
}
