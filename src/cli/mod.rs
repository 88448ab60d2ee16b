//! CLI module for the tournament registration service
//!
//! Provides subcommands:
//! - `serve`: run the HTTP API, optionally creating the admin account at startup
//! - `provision-admin`: create the single admin account in persistent storage, once

pub mod provision;
pub mod serve;

use clap::{Parser, Subcommand};

/// Tournament registration API - capacity-limited team sign-up with admin review
#[derive(Parser)]
#[command(name = "tournament-registration")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the registration API server
    Serve(serve::ServeArgs),

    /// Create the admin account; fails once an admin exists
    ProvisionAdmin(provision::ProvisionArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["tournament-registration", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve(_)));
    }

    #[test]
    fn test_parse_serve_with_admin() {
        let cli = Cli::try_parse_from([
            "tournament-registration",
            "serve",
            "--admin-username",
            "organizer",
            "--admin-password",
            "s3cret-pass",
        ])
        .unwrap();

        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.admin_username, "organizer");
                assert_eq!(args.admin_password.as_deref(), Some("s3cret-pass"));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_provision_admin() {
        let cli = Cli::try_parse_from([
            "tournament-registration",
            "provision-admin",
            "--username",
            "organizer",
            "--password",
            "s3cret-pass",
        ])
        .unwrap();

        match cli.command {
            Command::ProvisionAdmin(args) => {
                assert_eq!(args.username, "organizer");
                assert_eq!(args.password.as_deref(), Some("s3cret-pass"));
            }
            _ => panic!("expected provision-admin"),
        }
    }
}
