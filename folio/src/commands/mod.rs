//! Command implementations for folio CLI.
//!
//! Each submodule implements the logic for a command group.

pub mod auth;
pub mod config;
pub mod tabs;
