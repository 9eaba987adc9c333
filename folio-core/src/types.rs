//! Shared types for folio-core.
//!
//! These types are used by both the API client and the session provider.

use serde::{Deserialize, Serialize};

/// The authenticated principal as reported by the backend session endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub email: String,
    /// Display name
    pub nickname: String,
    #[serde(default)]
    pub is_logged_in: bool,
}

impl Session {
    /// Name shown in the header; falls back to the email when no nickname is set.
    pub fn display_name(&self) -> &str {
        if self.nickname.trim().is_empty() {
            &self.email
        } else {
            &self.nickname
        }
    }
}
