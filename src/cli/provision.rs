//! Provision-admin command - creates the single admin account

use std::str::FromStr;

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::storage::StorageType;

#[derive(Debug, Args)]
pub struct ProvisionArgs {
    /// Admin username
    #[arg(long, env = "ADMIN_USERNAME", default_value = "admin")]
    pub username: String,

    /// Admin password; a random one is generated and printed when omitted
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Provision the admin account against the configured storage
pub async fn run(args: ProvisionArgs) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.logging);

    ensure_persistent_storage(&config)?;

    let factory = crate::create_storage_factory(&config).await?;
    let admin_service = crate::create_admin_service(&factory).await?;

    let (password, generated) = match args.password.filter(|p| !p.is_empty()) {
        Some(password) => (password, false),
        None => (crate::generate_random_password(), true),
    };

    let admin = admin_service.provision(&args.username, &password).await?;

    info!(username = %admin.username(), "Admin account provisioned");

    println!("Admin account created");
    println!("Username: {}", admin.username());

    if generated {
        println!("Password: {}", password);
        println!("This password is shown only once. Store it now.");
    }

    Ok(())
}

/// An in-memory admin would vanish when this command exits
fn ensure_persistent_storage(config: &AppConfig) -> anyhow::Result<()> {
    if StorageType::from_str(&config.storage.backend)? == StorageType::InMemory {
        anyhow::bail!(
            "provision-admin requires persistent storage, but storage.backend is '{}'. \
            Set APP__STORAGE__BACKEND=postgres, or run `serve --admin-password <PASSWORD>` \
            to create the admin inside the server process.",
            config.storage.backend
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_is_rejected() {
        let err = ensure_persistent_storage(&AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("requires persistent storage"));
    }

    #[test]
    fn test_postgres_backend_is_accepted() {
        let mut config = AppConfig::default();
        config.storage.backend = "postgres".to_string();

        assert!(ensure_persistent_storage(&config).is_ok());
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let mut config = AppConfig::default();
        config.storage.backend = "cassandra".to_string();

        assert!(ensure_persistent_storage(&config).is_err());
    }
}
