//! Shared utilities.

/// Environment-sourced application configuration.
pub mod config;

pub use config::Config;
