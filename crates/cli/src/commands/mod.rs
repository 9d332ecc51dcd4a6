//! Command implementations.
//!
//! Each command returns the text to print; `main` owns stdout.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;

use thiserror::Error;
use vitrina_storefront::AppError;

/// Errors surfaced by a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Message safe to show the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::App(err) => err.user_message(),
            Self::Io(_) => self.to_string(),
        }
    }
}
