//! Session provider for the dashboard.
//!
//! The provider owns the only writable copy of the session state and hands out
//! read-only [`SessionHandle`]s to consumers (header menu, tab bar, pages).
//!
//! ## Lifecycle
//!
//! ```text
//! SessionProvider::new
//!   │
//!   └─► Uninitialized
//!         │ mount()
//!         ▼
//!       Loading ──── one fetch_session() ───┐
//!         │                                 │
//!         │ logout() while in flight        ▼
//!         │                           Resolved(Authenticated | Anonymous | FetchFailed)
//!         ▼                                 │
//!       Resolved(Anonymous) ◄───── logout() ┘
//! ```
//!
//! A fetch result only lands while the state is still `Loading`, so a logout
//! issued during the initial fetch is never overwritten.

mod provider;
mod state;

pub use provider::*;
pub use state::*;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Session;

/// Remote identity/session service the provider talks to.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Fetch the current principal. `Ok(None)` means the service reports an
    /// anonymous visitor.
    async fn fetch_session(&self) -> Result<Option<Session>>;

    /// Invalidate the remote session.
    async fn invalidate_session(&self) -> Result<()>;
}
