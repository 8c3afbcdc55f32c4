//! Common error infrastructure for bummerl-core.
//!
//! Domain-specific errors (`CounterError`, `StateError`) live next to the code
//! that raises them. This module provides the classification shared by every
//! error type in the workspace, including the persistence errors of the
//! runtime crate.
//!
//! Unknown lane or slot ids and out-of-range scores are not errors at all:
//! the state layer resolves them as silent no-ops and clamps. What remains are
//! construction-time validation failures and storage failures.

/// Coarse classification of an error, used to pick a recovery strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// An id or index that does not address anything.
    ///
    /// Only surfaced by typed constructors such as `CounterIndex::new`; state
    /// operations swallow these.
    InvalidReference,

    /// Input that violates a structural invariant (lane count, duplicate lanes).
    Validation,

    /// The durable store rejected a write. In-memory state stays authoritative.
    PersistenceFailure,

    /// Stored data could not be understood. Callers fall back to defaults.
    MigrationFailure,
}

impl ErrorClass {
    /// Returns a human-readable name for this class.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidReference => "invalid_reference",
            Self::Validation => "validation",
            Self::PersistenceFailure => "persistence_failure",
            Self::MigrationFailure => "migration_failure",
        }
    }

    /// Returns true if the caller should recover by discarding stored data.
    pub const fn falls_back_to_default(&self) -> bool {
        matches!(self, Self::MigrationFailure | Self::Validation)
    }
}

/// Common trait for every error type in the workspace.
pub trait GameError: core::error::Error {
    /// Classification of this error.
    fn class(&self) -> ErrorClass;

    /// Stable machine-readable code, e.g. `"COUNTER_INDEX_OUT_OF_RANGE"`.
    fn error_code(&self) -> &'static str;
}
