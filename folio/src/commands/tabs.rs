//! Tab bar rendering.

use anyhow::Result;
use colored::Colorize;
use folio_core::nav::{ASSET_MANAGEMENT_TABS, Tab, tab_bar};

use crate::config::Config;

/// Show the asset-management tab bar for a path
pub fn execute(path: Option<&str>, json: bool, config: &Config) -> Result<()> {
    let path = path.unwrap_or(&config.ui.default_path);
    let tabs = tab_bar(ASSET_MANAGEMENT_TABS, path);

    if json {
        let value: Vec<_> = tabs
            .iter()
            .map(|tab| {
                serde_json::json!({
                    "href": tab.item.href,
                    "label": tab.item.label,
                    "active": tab.active,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", render(&tabs));
    }

    Ok(())
}

fn render(tabs: &[Tab]) -> String {
    tabs.iter()
        .map(|tab| {
            if tab.active {
                format!("[{}]", tab.item.label.bold())
            } else {
                format!(" {} ", tab.item.label.dimmed())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
