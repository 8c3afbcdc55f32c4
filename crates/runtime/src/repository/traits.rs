//! Repository contract for the persisted session.

use bummerl_core::GameState;

use super::Result;

/// Durable storage for one session document.
///
/// Implementations store a single document under the fixed
/// [`STORAGE_KEY`](crate::config::STORAGE_KEY) and must leave the previously
/// stored document intact when a write fails.
pub trait SessionRepository: Send + Sync {
    /// Load the stored session.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet. Documents written
    /// by older schema versions are migrated transparently.
    fn load(&self) -> Result<Option<GameState>>;

    /// Replace the stored session with `state`.
    fn save(&self, state: &GameState) -> Result<()>;

    /// Check if a document is stored.
    fn exists(&self) -> bool;

    /// Remove the stored document, if any.
    fn clear(&self) -> Result<()>;
}
