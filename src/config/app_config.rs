use serde::Deserialize;

use crate::domain::admission::DEFAULT_CAPACITY;
use crate::domain::team::DEFAULT_MAX_SCREENSHOT_BYTES;
use crate::infrastructure::auth::{DEFAULT_SESSION_TTL_HOURS, MAX_SESSION_TTL_HOURS};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub registration: RegistrationConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Which storage backend holds teams and admins
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Falls back to `DATABASE_URL` when unset
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// Falls back to `SESSION_SECRET`; a random secret is generated when both are unset
    #[serde(default)]
    pub session_secret: Option<String>,
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u64,
    #[serde(default)]
    pub cookie_secure: bool,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_secret", &self.session_secret.as_ref().map(|_| "[hidden]"))
            .field("session_ttl_hours", &self.session_ttl_hours)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_max_screenshot_bytes")]
    pub max_screenshot_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_backend() -> String {
    "memory".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_session_ttl_hours() -> u64 {
    DEFAULT_SESSION_TTL_HOURS
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_max_screenshot_bytes() -> usize {
    DEFAULT_MAX_SCREENSHOT_BYTES
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            database_url: None,
            max_connections: default_max_connections(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: None,
            session_ttl_hours: default_session_ttl_hours(),
            cookie_secure: false,
        }
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            max_screenshot_bytes: default_max_screenshot_bytes(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

impl StorageSettings {
    pub fn database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .filter(|url| !url.trim().is_empty())
    }
}

impl AuthConfig {
    pub fn session_secret(&self) -> Option<String> {
        self.session_secret
            .clone()
            .or_else(|| std::env::var("SESSION_SECRET").ok())
            .filter(|secret| !secret.trim().is_empty())
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values the services cannot honour
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&self.auth.session_ttl_hours) {
            return Err(config::ConfigError::Message(format!(
                "auth.session_ttl_hours must be between 1 and {}, got {}",
                MAX_SESSION_TTL_HOURS, self.auth.session_ttl_hours
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.auth.session_ttl_hours, 168);
        assert!(!config.auth.cookie_secure);
        assert_eq!(config.registration.capacity, 6);
        assert_eq!(config.registration.max_screenshot_bytes, 5 * 1024 * 1024);
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_partial_sections_deserialize() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [registration]
                capacity = 8

                [logging]
                level = "debug"
                format = "json"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.registration.capacity, 8);
        assert_eq!(config.registration.max_screenshot_bytes, 5 * 1024 * 1024);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_validate_session_ttl_bounds() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.auth.session_ttl_hours = u64::MAX;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("auth.session_ttl_hours"));

        config.auth.session_ttl_hours = 0;
        assert!(config.validate().is_err());

        config.auth.session_ttl_hours = MAX_SESSION_TTL_HOURS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_auth_debug_hides_secret() {
        let auth = AuthConfig {
            session_secret: Some("hunter2-secret".to_string()),
            ..AuthConfig::default()
        };

        assert!(!format!("{:?}", auth).contains("hunter2-secret"));
    }
}
