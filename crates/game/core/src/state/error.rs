//! State construction errors.
//!
//! Mutations never fail; only building a [`GameState`](super::GameState) from
//! an explicit lane set or from stored parts can be rejected.

use super::LaneId;
use crate::config::GameConfig;
use crate::error::{ErrorClass, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Lane count outside the supported player range.
    #[error(
        "a game needs {min} to {max} lanes, got {count}",
        min = GameConfig::MIN_LANES,
        max = GameConfig::MAX_LANES
    )]
    LaneCount { count: usize },

    /// The same lane id was supplied twice.
    #[error("lane {0} appears more than once")]
    DuplicateLane(LaneId),
}

impl GameError for StateError {
    fn class(&self) -> ErrorClass {
        ErrorClass::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LaneCount { .. } => "STATE_LANE_COUNT",
            Self::DuplicateLane(_) => "STATE_DUPLICATE_LANE",
        }
    }
}
