//! Error types for the intake pipeline

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Intake error type
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Configuration file not found or unreadable: {path}: {source}")]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Deposit directory unavailable: {path}: {source}")]
    DepositUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Destination already exists: {0}")]
    DestinationExists(PathBuf),

    #[error("Invalid file name format: {file_name} (expected 4 keywords, found {pieces})")]
    Format { file_name: String, pieces: usize },

    #[error("No format code configured for extension '{extension}': {path}")]
    UnknownExtension { extension: String, path: PathBuf },
}

impl IntakeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        IntakeError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors that mean the configuration could not be loaded or
    /// resolved. The binary maps these to a dedicated exit code.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            IntakeError::ConfigUnreadable { .. } | IntakeError::Config(_)
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, IntakeError>;
