//! Fatal error conditions and their process exit codes.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("cannot open {}: {source}", path.display())]
    InputUnreadable { path: PathBuf, source: io::Error },

    #[error("cannot create {}: {source}", path.display())]
    OutputUncreatable { path: PathBuf, source: io::Error },

    #[error("input ended while waiting for {what}")]
    InputClosed { what: String },
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InputUnreadable { .. } => 3,
            Self::OutputUncreatable { .. } => 4,
            Self::InputClosed { .. } => 5,
        }
    }
}

/// Exit code for any error, typed or not.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<AppError>().map_or(1, AppError::exit_code)
}
