//! Header dropdown menu.
//!
//! Shows the profile label and a logout entry for a logged-in user, a login
//! entry otherwise.

use crate::session::SessionProvider;
use crate::types::Session;

/// Profile block at the top of the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLabel {
    pub email: String,
    pub nickname: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Login,
    Logout,
}

impl MenuEntry {
    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::Login => "Log in",
            MenuEntry::Logout => "Log out",
        }
    }
}

/// What the shell should do after an entry was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The shell owns the login prompt and should open it.
    OpenLoginPrompt,
    LoggedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMenu {
    pub profile: Option<ProfileLabel>,
    pub separator: bool,
    pub entry: MenuEntry,
}

impl UserMenu {
    /// Build the menu for the current session.
    pub fn for_session(session: Option<&Session>) -> Self {
        match session.filter(|s| s.is_logged_in) {
            Some(session) => Self {
                profile: Some(ProfileLabel {
                    email: session.email.clone(),
                    nickname: session.nickname.clone(),
                }),
                separator: true,
                entry: MenuEntry::Logout,
            },
            None => Self {
                profile: None,
                separator: false,
                entry: MenuEntry::Login,
            },
        }
    }

    /// Activate the menu entry against the provider.
    pub fn activate(&self, provider: &SessionProvider) -> MenuOutcome {
        match self.entry {
            MenuEntry::Logout => {
                provider.logout();
                MenuOutcome::LoggedOut
            }
            MenuEntry::Login => MenuOutcome::OpenLoginPrompt,
        }
    }
}
