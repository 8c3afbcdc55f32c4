//! Error types raised by repository implementations.

use bummerl_core::{ErrorClass, GameError, StateError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("session repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stored schema version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u64, supported: u64 },

    #[error("stored document is invalid: {0}")]
    InvalidDocument(#[from] StateError),
}

impl GameError for RepositoryError {
    fn class(&self) -> ErrorClass {
        match self {
            Self::LockPoisoned | Self::Io(_) | Self::Serialization(_) => {
                ErrorClass::PersistenceFailure
            }
            Self::Json(_) | Self::UnsupportedVersion { .. } | Self::InvalidDocument(_) => {
                ErrorClass::MigrationFailure
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "REPO_LOCK_POISONED",
            Self::Io(_) => "REPO_IO",
            Self::Serialization(_) => "REPO_SERIALIZATION",
            Self::Json(_) => "REPO_JSON",
            Self::UnsupportedVersion { .. } => "REPO_UNSUPPORTED_VERSION",
            Self::InvalidDocument(_) => "REPO_INVALID_DOCUMENT",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
