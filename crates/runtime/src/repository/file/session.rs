//! File-based SessionRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bummerl_core::GameState;

use crate::config::STORAGE_KEY;
use crate::repository::{RepositoryError, Result, SessionRepository, StoredSession};

/// File-based implementation of SessionRepository.
///
/// # File Format
///
/// The session is stored as `{STORAGE_KEY}.json` in the base directory, in
/// the versioned JSON layout described in [`StoredSession`]. Writes go to a
/// `.json.tmp` sibling first and are renamed into place, so a failed write
/// leaves the previous document untouched.
pub struct FileSessionRepository {
    path: PathBuf,
    // Serialises writers; the temp file name is shared.
    write_lock: Mutex<()>,
}

impl FileSessionRepository {
    /// Create a new file-based session repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir).map_err(RepositoryError::Io)?;
        Ok(Self {
            path: base_dir.join(format!("{}.json", STORAGE_KEY)),
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the session document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl SessionRepository for FileSessionRepository {
    fn load(&self) -> Result<Option<GameState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path).map_err(RepositoryError::Io)?;
        let state = StoredSession::decode(&json)?.into_state()?;

        tracing::debug!(
            lanes = state.lanes().len(),
            slots = state.saved_slots().len(),
            path = %self.path.display(),
            "loaded session"
        );

        Ok(Some(state))
    }

    fn save(&self, state: &GameState) -> Result<()> {
        let json = StoredSession::from_state(state).encode()?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let temp_path = self.temp_path();

        // Write to temp file
        if let Err(e) = fs::write(&temp_path, json) {
            let _ = fs::remove_file(&temp_path);
            return Err(RepositoryError::Io(e));
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!(path = %self.path.display(), "saved session");

        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn clear(&self) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        if self.path.exists() {
            fs::remove_file(&self.path).map_err(RepositoryError::Io)?;
            tracing::info!(path = %self.path.display(), "deleted session document");
        }

        Ok(())
    }
}
