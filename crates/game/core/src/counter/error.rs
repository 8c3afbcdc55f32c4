//! Counter addressing errors.

use crate::config::GameConfig;
use crate::error::{ErrorClass, GameError};

/// Errors raised when addressing a counter that does not exist.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CounterError {
    #[error(
        "counter index {index} is out of range (row has {count} counters)",
        count = GameConfig::COUNTERS_PER_ROW
    )]
    IndexOutOfRange { index: usize },
}

impl GameError for CounterError {
    fn class(&self) -> ErrorClass {
        match self {
            Self::IndexOutOfRange { .. } => ErrorClass::InvalidReference,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "COUNTER_INDEX_OUT_OF_RANGE",
        }
    }
}
