//! Tournament Registration API
//!
//! Team registration for a capacity-limited tournament:
//! - Public submission of eight-player rosters with a payment screenshot
//! - Admission closes once the configured number of teams is reached
//! - Operators review screenshots and toggle teams between pending and verified

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::str::FromStr;
use std::sync::Arc;

use api::state::{AdminServiceTrait, AppState};
use domain::admin::AdminRecord;
use domain::{AdmissionPolicy, DomainError, Team};
use infrastructure::{
    admin::{AdminService, Argon2Hasher, StorageAdminRepository},
    auth::{generate_secret, SessionConfig, SessionService},
    storage::{PostgresConfig, StorageConfig, StorageFactory, StorageType},
    team::{RegistrationService, StorageTeamRepository},
};
use rand::Rng;
use tracing::{info, warn};

/// Admin service as wired against the configured storage
pub type AppAdminService = AdminService<StorageAdminRepository, Argon2Hasher>;

/// Create the application state with default configuration (in-memory storage)
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let factory = create_storage_factory(config).await?;

    let team_storage = factory.create::<Team>().await?;
    let team_repository = Arc::new(StorageTeamRepository::new(team_storage));
    let registration_service = Arc::new(RegistrationService::new(
        team_repository,
        AdmissionPolicy::new(config.registration.capacity),
        config.registration.max_screenshot_bytes,
    ));

    info!(
        capacity = config.registration.capacity,
        max_screenshot_bytes = config.registration.max_screenshot_bytes,
        "Registration service ready"
    );

    let admin_service = create_admin_service(&factory).await?;
    let session_service = Arc::new(create_session_service(config));

    Ok(AppState::new(
        registration_service,
        admin_service,
        session_service,
    ))
}

/// Resolve the storage backend from configuration and connect to it
pub async fn create_storage_factory(config: &AppConfig) -> anyhow::Result<StorageFactory> {
    let storage_type = StorageType::from_str(&config.storage.backend)?;
    info!("Storage backend: {:?}", storage_type);

    let storage_config = match storage_type {
        StorageType::InMemory => StorageConfig::in_memory(),
        StorageType::Postgres => {
            let url = config.storage.database_url().ok_or_else(|| {
                anyhow::anyhow!("storage.database_url or DATABASE_URL is required for postgres")
            })?;

            info!("Connecting to PostgreSQL...");
            StorageConfig::Postgres(
                PostgresConfig::new(url).with_max_connections(config.storage.max_connections),
            )
        }
    };

    let factory = StorageFactory::connect(&storage_config).await?;
    info!("Storage ready");

    Ok(factory)
}

/// Create the admin service backed by the factory's storage
pub async fn create_admin_service(factory: &StorageFactory) -> anyhow::Result<Arc<AppAdminService>> {
    let storage = factory.create::<AdminRecord>().await?;

    Ok(Arc::new(AdminService::new(
        Arc::new(StorageAdminRepository::new(storage)),
        Arc::new(Argon2Hasher::new()),
    )))
}

/// Create the session service from secret (config, env var, or random)
fn create_session_service(config: &AppConfig) -> SessionService {
    let secret = config.auth.session_secret().unwrap_or_else(|| {
        warn!(
            "No SESSION_SECRET configured. Generating random secret. \
            Admin sessions will NOT persist across restarts."
        );
        generate_secret()
    });

    SessionService::new(
        SessionConfig::new(secret)
            .with_ttl_hours(config.auth.session_ttl_hours)
            .with_cookie_secure(config.auth.cookie_secure),
    )
}

/// Create the admin account inside the serving process unless one exists
///
/// Returns whether an account was created. The in-memory backend only keeps
/// an admin for the lifetime of the process that created it, so this is the
/// way to provision it.
pub async fn provision_admin_if_absent(
    admin_service: &dyn AdminServiceTrait,
    username: &str,
    password: &str,
) -> anyhow::Result<bool> {
    match admin_service.provision(username, password).await {
        Ok(admin) => {
            info!(username = %admin.username(), "Initial admin account created");
            Ok(true)
        }
        Err(DomainError::Conflict { .. }) => {
            info!("Admin account already exists, skipping startup provisioning");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Generate a random password for the initial admin
pub fn generate_random_password() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_password() {
        let password = generate_random_password();

        assert_eq!(password.len(), 16);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(password, generate_random_password());
    }

    #[tokio::test]
    async fn test_default_state_uses_memory_storage() {
        let state = create_app_state().await.unwrap();
        let status = state.registration_service.status().await.unwrap();

        assert_eq!(status.capacity, 6);
        assert_eq!(status.registered, 0);
        assert!(status.open);
    }

    #[tokio::test]
    async fn test_startup_provisioning_reaches_serving_state() {
        let state = create_app_state_with_config(&AppConfig::default())
            .await
            .unwrap();

        let created = provision_admin_if_absent(
            state.admin_service.as_ref(),
            "admin",
            "correct-horse",
        )
        .await
        .unwrap();
        assert!(created);

        let admin = state
            .admin_service
            .authenticate("admin", "correct-horse")
            .await
            .unwrap();
        assert_eq!(admin.username(), "admin");

        let again = provision_admin_if_absent(state.admin_service.as_ref(), "other", "other-pass")
            .await
            .unwrap();
        assert!(!again);
        assert!(state
            .admin_service
            .authenticate("other", "other-pass")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_startup_provisioning_rejects_weak_password() {
        let state = create_app_state().await.unwrap();

        let result = provision_admin_if_absent(state.admin_service.as_ref(), "admin", "short").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unknown_backend_fails() {
        let mut config = AppConfig::default();
        config.storage.backend = "cassandra".to_string();

        assert!(create_storage_factory(&config).await.is_err());
    }
}
