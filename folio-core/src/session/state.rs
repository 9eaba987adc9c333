//! Session lifecycle state.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::types::Session;

/// Terminal outcome of the session fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The service reported no logged-in user (or the user logged out).
    Anonymous,
    /// The service returned a logged-in principal.
    Authenticated(Session),
    /// The fetch could not be completed.
    FetchFailed(String),
}

impl Resolution {
    /// Classify the result of a session fetch.
    ///
    /// A principal whose `is_logged_in` flag is false and an `Unauthorized`
    /// error both count as anonymous.
    pub fn from_fetch(result: Result<Option<Session>>) -> Self {
        match result {
            Ok(Some(session)) if session.is_logged_in => Resolution::Authenticated(session),
            Ok(_) | Err(Error::Unauthorized) => Resolution::Anonymous,
            Err(e) => Resolution::FetchFailed(e.to_string()),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Resolution::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// State held by the provider.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Provider created but not mounted.
    #[default]
    Uninitialized,
    /// The initial fetch is in flight.
    Loading,
    /// The fetch finished, or the user logged out.
    Resolved {
        resolution: Resolution,
        at: DateTime<Utc>,
    },
}

impl SessionState {
    /// Build a resolved state stamped with the current time.
    pub fn resolved(resolution: Resolution) -> Self {
        SessionState::Resolved {
            resolution,
            at: Utc::now(),
        }
    }

    /// The logged-in principal, if any. `None` for every other state.
    pub fn session(&self) -> Option<&Session> {
        self.resolution().and_then(Resolution::session)
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        match self {
            SessionState::Resolved { resolution, .. } => Some(resolution),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, SessionState::Resolved { .. })
    }

    /// Short label for logs and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Loading => "loading",
            SessionState::Resolved { resolution, .. } => match resolution {
                Resolution::Anonymous => "anonymous",
                Resolution::Authenticated(_) => "authenticated",
                Resolution::FetchFailed(_) => "fetch-failed",
            },
        }
    }
}
