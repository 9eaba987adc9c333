//! Asset-management tab bar.
//!
//! The tab list is fixed at build time. Rendering is a pure function of the
//! current path.

/// A tab: route path and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
}

/// Tabs shown under the asset-management section.
pub const ASSET_MANAGEMENT_TABS: &[NavItem] = &[
    NavItem {
        href: "/asset-management/overview",
        label: "Overview",
    },
    NavItem {
        href: "/asset-management/my-stocks",
        label: "My stocks",
    },
    NavItem {
        href: "/asset-management/dividends",
        label: "Dividends",
    },
    NavItem {
        href: "/asset-management/rich-portfolios",
        label: "Top investors",
    },
];

/// A tab as rendered for a given path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tab {
    pub item: NavItem,
    pub active: bool,
}

/// Mark each item active when its href equals `current_path` exactly.
pub fn tab_bar(items: &[NavItem], current_path: &str) -> Vec<Tab> {
    items
        .iter()
        .map(|item| Tab {
            item: *item,
            active: item.href == current_path,
        })
        .collect()
}

/// The item whose href equals `current_path`, if any.
pub fn active_tab<'a>(items: &'a [NavItem], current_path: &str) -> Option<&'a NavItem> {
    items.iter().find(|item| item.href == current_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn active_count(tabs: &[Tab]) -> usize {
        tabs.iter().filter(|t| t.active).count()
    }

    #[test]
    fn test_hrefs_are_unique() {
        let hrefs: HashSet<_> = ASSET_MANAGEMENT_TABS.iter().map(|i| i.href).collect();
        assert_eq!(hrefs.len(), ASSET_MANAGEMENT_TABS.len());
    }

    #[test]
    fn test_exactly_one_active_on_matching_path() {
        for item in ASSET_MANAGEMENT_TABS {
            let tabs = tab_bar(ASSET_MANAGEMENT_TABS, item.href);

            assert_eq!(tabs.len(), ASSET_MANAGEMENT_TABS.len());
            assert_eq!(active_count(&tabs), 1);
            assert!(tabs.iter().any(|t| t.active && t.item == *item));
            assert_eq!(active_tab(ASSET_MANAGEMENT_TABS, item.href), Some(item));
        }
    }

    #[test]
    fn test_none_active_on_other_paths() {
        for path in [
            "/",
            "/asset-management",
            "/asset-management/overview/",
            "/ASSET-MANAGEMENT/OVERVIEW",
            "",
        ] {
            let tabs = tab_bar(ASSET_MANAGEMENT_TABS, path);
            assert_eq!(active_count(&tabs), 0, "path {path:?}");
            assert!(active_tab(ASSET_MANAGEMENT_TABS, path).is_none());
        }
    }

    #[test]
    fn test_order_is_preserved() {
        let tabs = tab_bar(ASSET_MANAGEMENT_TABS, "/");
        let labels: Vec<_> = tabs.iter().map(|t| t.item.label).collect();
        assert_eq!(labels, vec!["Overview", "My stocks", "Dividends", "Top investors"]);
    }
}
