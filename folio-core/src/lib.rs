//! folio-core - Core library for Folio
//!
//! This crate provides the session layer shared by the dashboard shell and the
//! `folio` CLI:
//!
//! - **session**: Session provider (fetch once, read-only handles, logout)
//! - **client**: HTTP client for the backend session endpoint
//! - **nav**: Asset-management tab bar
//! - **menu**: Header dropdown menu driven by the current session

#[cfg(feature = "client")]
pub mod client;
pub mod error;
pub mod menu;
pub mod nav;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use session::{Resolution, SessionHandle, SessionProvider, SessionService, SessionState};
pub use types::Session;
