//! Scoring rules and session state for the Bummerlzähler.
//!
//! `bummerl-core` models the bead abacus used to keep score at the card
//! table: every player lane has a points row and a Bummerl row of seven
//! counters each. The crate exposes pure APIs only; persistence and any
//! background work live in `bummerl-runtime`.
//!
//! - [`counter`] maps a row score to counter placements and arc geometry, and
//!   resolves touches and stepper input back into scores.
//! - [`state`] owns lanes and save slots; all mutation flows through
//!   [`GameState`].
pub mod config;
pub mod counter;
pub mod error;
pub mod state;

pub use config::GameConfig;
pub use counter::{
    ArcLayout, CounterError, CounterIndex, CounterRow, Placement, RowKind, Score, Step,
};
pub use error::{ErrorClass, GameError};
pub use state::{
    GameState, LaneId, LaneState, LaneView, SaveSlot, SequentialStamper, SlotId, SlotStamper,
    StateError, Timestamp,
};
