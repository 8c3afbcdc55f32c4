//! In-memory SessionRepository implementation for tests and local runs.

use std::io;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use bummerl_core::GameState;

use crate::repository::{RepositoryError, Result, SessionRepository, StoredSession};

/// In-memory implementation of SessionRepository.
///
/// Keeps the encoded JSON text rather than the state itself, so loads run
/// through the same schema decoding and migration as the file repository.
pub struct InMemorySessionRepo {
    document: RwLock<Option<String>>,
    reject_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemorySessionRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            document: RwLock::new(None),
            reject_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    /// Create with a raw stored document, e.g. one written by an older build.
    pub fn with_document(document: impl Into<String>) -> Self {
        let repo = Self::new();
        if let Ok(mut slot) = repo.document.write() {
            *slot = Some(document.into());
        }
        repo
    }

    /// Make subsequent writes fail as if the store were full.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// The raw stored document.
    pub fn document(&self) -> Option<String> {
        self.document.read().ok().and_then(|doc| doc.clone())
    }
}

impl Default for InMemorySessionRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRepository for InMemorySessionRepo {
    fn load(&self) -> Result<Option<GameState>> {
        let document = self
            .document
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        match document.as_deref() {
            Some(text) => Ok(Some(StoredSession::decode(text)?.into_state()?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &GameState) -> Result<()> {
        let encoded = StoredSession::from_state(state).encode()?;

        let mut document = self
            .document
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Io(io::Error::new(
                io::ErrorKind::StorageFull,
                "storage quota exceeded",
            )));
        }

        *document = Some(encoded);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn exists(&self) -> bool {
        self.document
            .read()
            .map(|doc| doc.is_some())
            .unwrap_or(false)
    }

    fn clear(&self) -> Result<()> {
        let mut document = self
            .document
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *document = None;
        Ok(())
    }
}
