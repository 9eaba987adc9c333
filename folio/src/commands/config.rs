//! Configuration inspection.

use anyhow::{Context, Result};
use colored::Colorize;
use folio_core::client::ApiClient;

use crate::config::Config;

/// Show effective configuration, optionally checking the backend
pub async fn execute(check: bool, config: &Config) -> Result<()> {
    println!("{}", "Folio Configuration".bold());
    println!("{}", "─".repeat(40));
    println!("File:      {}", Config::config_path().display().to_string().cyan());
    println!("API:       {}", config.api.url);
    println!("Timeout:   {}s", config.api.timeout_secs);
    match &config.api.access_token {
        Some(token) => {
            let prefix: String = token.chars().take(6).collect();
            println!("Token:     {} ({}...)", "Present".green(), prefix.yellow());
        }
        None => println!("Token:     {}", "Not set".yellow()),
    }
    println!("Tabs path: {}", config.ui.default_path);

    if check {
        let client = ApiClient::new(config.client_config()).context("Invalid API configuration")?;
        match client.health().await {
            Ok(health) => println!(
                "Server:    {} (v{})",
                health.status.green(),
                health.version.as_deref().unwrap_or("unknown")
            ),
            Err(e) => println!("Server:    {} ({})", "Not responding".red(), e),
        }
    }

    Ok(())
}
