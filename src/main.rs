use clap::Parser;
use tournament_registration::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before parsing so clap's `env` fallbacks can see it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => cli::serve::run(args).await,
        Command::ProvisionAdmin(args) => cli::provision::run(args).await,
    }
}
