//! Session commands: whoami, logout, menu.

use anyhow::{Context, Result};
use colored::Colorize;
use folio_core::Resolution;
use folio_core::SessionProvider;
use folio_core::client::ApiClient;
use folio_core::menu::{MenuOutcome, UserMenu};
use tracing::debug;

use crate::config::Config;

/// Mount a provider against the configured backend and wait for the fetch.
async fn resolve(config: &Config) -> Result<(SessionProvider, Resolution)> {
    let client = ApiClient::new(config.client_config()).context("Invalid API configuration")?;
    let provider = SessionProvider::new(client);
    let mut handle = provider.subscribe();

    provider.mount();
    let resolution = handle
        .wait_resolved()
        .await
        .context("Session provider stopped before resolving")?;
    debug!("Session resolved: {}", provider.state().label());

    Ok((provider, resolution))
}

/// Show the current session
pub async fn whoami(json: bool, config: &Config) -> Result<()> {
    let (_provider, resolution) = resolve(config).await?;

    if json {
        let value = match &resolution {
            Resolution::Authenticated(session) => serde_json::json!({
                "state": "authenticated",
                "session": session,
            }),
            Resolution::Anonymous => serde_json::json!({ "state": "anonymous", "session": null }),
            Resolution::FetchFailed(reason) => serde_json::json!({
                "state": "fetch-failed",
                "session": null,
                "error": reason,
            }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match resolution {
        Resolution::Authenticated(session) => {
            println!("{} Logged in as {}", "✓".green(), session.display_name().bold());
            println!("  Email: {}", session.email.cyan());
            println!("  ID:    {}", session.id.yellow());
        }
        Resolution::Anonymous => {
            println!("{} Not logged in.", "✗".red());
        }
        Resolution::FetchFailed(reason) => {
            println!("{} Could not reach the session endpoint: {}", "✗".red(), reason);
            println!("  Treating you as logged out.");
        }
    }

    Ok(())
}

/// Log out and invalidate the backend session
pub async fn logout(config: &Config) -> Result<()> {
    let (provider, resolution) = resolve(config).await?;

    if !matches!(resolution, Resolution::Authenticated(_)) {
        println!("{} Not logged in.", "✗".red());
        return Ok(());
    }

    println!("{} Revoking session on server...", "→".cyan());
    provider.logout();
    provider.settle().await;
    println!("{} Logged out.", "✓".green());

    Ok(())
}

/// Show the header user menu
pub async fn menu(activate: bool, config: &Config) -> Result<()> {
    let (provider, _) = resolve(config).await?;
    let menu = UserMenu::for_session(provider.current_session().as_ref());

    if let Some(profile) = &menu.profile {
        println!("{}", profile.email.bold());
        println!("{}", profile.nickname);
    }
    if menu.separator {
        println!("{}", "─".repeat(24));
    }
    println!("{}", menu.entry.label());

    if activate {
        match menu.activate(&provider) {
            MenuOutcome::LoggedOut => {
                provider.settle().await;
                println!("{} Logged out.", "✓".green());
            }
            MenuOutcome::OpenLoginPrompt => {
                println!("{} Open the dashboard to log in.", "→".cyan());
            }
        }
    }

    Ok(())
}
