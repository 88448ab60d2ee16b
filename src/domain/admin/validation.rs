//! Admin credential validation

use thiserror::Error;

/// Errors that can occur during admin validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AdminValidationError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username is too short. Minimum length is {0} characters")]
    UsernameTooShort(usize),

    #[error("Username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("Username contains invalid character: '{0}'. Only alphanumeric characters, dots, underscores, and hyphens are allowed")]
    InvalidUsernameCharacter(char),

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),

    #[error("Invalid admin ID: {0}")]
    InvalidAdminId(String),
}

const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 50;
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate an admin username
///
/// Rules:
/// - 3 to 50 characters
/// - Only alphanumeric characters, dots, underscores, and hyphens
pub fn validate_username(username: &str) -> Result<(), AdminValidationError> {
    if username.is_empty() {
        return Err(AdminValidationError::EmptyUsername);
    }

    if username.len() < MIN_USERNAME_LENGTH {
        return Err(AdminValidationError::UsernameTooShort(MIN_USERNAME_LENGTH));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(AdminValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    if let Some(c) = username
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '_' | '-' | '.'))
    {
        return Err(AdminValidationError::InvalidUsernameCharacter(c));
    }

    Ok(())
}

/// Validate a password before hashing
pub fn validate_password(password: &str) -> Result<(), AdminValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AdminValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AdminValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("tournament.admin").is_ok());
        assert!(validate_username("ops_lead-2").is_ok());
    }

    #[test]
    fn test_username_length() {
        assert_eq!(validate_username(""), Err(AdminValidationError::EmptyUsername));
        assert_eq!(
            validate_username("ab"),
            Err(AdminValidationError::UsernameTooShort(3))
        );
        assert_eq!(
            validate_username(&"a".repeat(51)),
            Err(AdminValidationError::UsernameTooLong(50))
        );
    }

    #[test]
    fn test_username_invalid_character() {
        assert_eq!(
            validate_username("admin user"),
            Err(AdminValidationError::InvalidUsernameCharacter(' '))
        );
        assert_eq!(
            validate_username("admin@host"),
            Err(AdminValidationError::InvalidUsernameCharacter('@'))
        );
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("password123").is_ok());
        assert_eq!(
            validate_password("short"),
            Err(AdminValidationError::PasswordTooShort(8))
        );
        assert_eq!(
            validate_password(&"a".repeat(129)),
            Err(AdminValidationError::PasswordTooLong(128))
        );
    }
}
