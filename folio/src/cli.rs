//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand};

/// Folio dashboard CLI
///
/// Inspect and manage the dashboard session from the terminal.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current session
    Whoami {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Log out and invalidate the backend session
    Logout,

    /// Show the header user menu for the current session
    Menu {
        /// Activate the menu entry (log out, or point to the login prompt)
        #[arg(short, long)]
        activate: bool,
    },

    /// Show the asset-management tab bar
    Tabs {
        /// Current path (defaults to ui.default_path)
        #[arg(short, long)]
        path: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show effective configuration
    Config {
        /// Also ping the backend health endpoint
        #[arg(short, long)]
        check: bool,
    },

    /// Show version
    Version,
}
