//! Command implementations.
//!
//! Commands write their report to any `io::Write` so tests can capture it.

pub mod catalog;
pub mod settings;

use std::io;

use food_delivery_core::SettingsError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Writing the report failed (e.g., closed pipe).
    #[error("Output error: {0}")]
    Output(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The settings store failed.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Destructive command run without `--yes`.
    #[error("Refusing to {0} without --yes")]
    NotConfirmed(&'static str),
}
