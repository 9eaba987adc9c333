//! folio - Asset-management dashboard session CLI
//!
//! Drives the same session provider the dashboard shell uses: resolve the
//! current user, log out, and render the session-aware header menu and tab bar.

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;
mod commands;
mod config;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("folio=info".parse()?))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = config::Config::load()?;
    debug!("Config loaded from {:?} (api: {})", config::Config::config_path(), config.api.url);

    // Execute command
    match cli.command {
        Commands::Whoami { json } => commands::auth::whoami(json, &config).await,
        Commands::Logout => commands::auth::logout(&config).await,
        Commands::Menu { activate } => commands::auth::menu(activate, &config).await,
        Commands::Tabs { path, json } => commands::tabs::execute(path.as_deref(), json, &config),
        Commands::Config { check } => commands::config::execute(check, &config).await,
        Commands::Version => {
            println!("folio {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
