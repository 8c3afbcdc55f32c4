//! Background persistence for auto-persist sessions.
//!
//! Every mutation of an auto-persisting [`Session`](crate::Session) hands an
//! owned snapshot to the worker over an unbounded channel and returns at once.
//! The worker thread drains the queue, keeps only the newest snapshot and
//! writes it through the shared [`PersistGate`].
//!
//! # Ordering
//!
//! Snapshots carry the session revision they were taken at. The gate records
//! the newest revision written, by either the worker or an explicit
//! `Session::persist`, and refuses to write anything older. Explicit and
//! background writes therefore never reorder on disk.
//!
//! # Failures
//!
//! A failed background write is logged and broadcast as
//! [`PersistenceEvent::Failed`]; nothing is returned to the mutating caller.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use bummerl_core::GameState;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, warn};

use crate::repository::{RepositoryError, Result, SessionRepository};

/// Outcome notifications from background writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PersistenceEvent {
    /// The snapshot taken at `revision` is on disk.
    Saved { revision: u64 },
    /// Writing the snapshot taken at `revision` failed.
    Failed { revision: u64, error: String },
}

/// Owned copy of the state at one revision.
pub(crate) struct Snapshot {
    pub revision: u64,
    pub state: GameState,
}

/// Repository plus the newest revision written through it.
pub(crate) struct PersistGate {
    repo: Arc<dyn SessionRepository>,
    persisted: Mutex<Option<u64>>,
}

impl PersistGate {
    pub fn new(repo: Arc<dyn SessionRepository>) -> Self {
        Self {
            repo,
            persisted: Mutex::new(None),
        }
    }

    /// Writes `state` unless a newer revision is already stored.
    ///
    /// With `rewrite_same`, a revision equal to the stored one is written
    /// again (explicit saves); otherwise it is skipped. Returns whether a
    /// write happened.
    pub fn write(&self, revision: u64, state: &GameState, rewrite_same: bool) -> Result<bool> {
        let mut persisted = self
            .persisted
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        if let Some(stored) = *persisted {
            if revision < stored || (revision == stored && !rewrite_same) {
                return Ok(false);
            }
        }

        self.repo.save(state)?;
        *persisted = Some(revision);
        Ok(true)
    }

    pub fn persisted_revision(&self) -> Option<u64> {
        self.persisted.lock().ok().and_then(|guard| *guard)
    }
}

/// Handle to the background writer thread.
///
/// Dropping the handle closes the queue, lets the thread write whatever is
/// still pending and joins it.
pub(crate) struct PersistenceWorker {
    queue: Option<mpsc::UnboundedSender<Snapshot>>,
    thread: Option<JoinHandle<()>>,
}

impl PersistenceWorker {
    pub fn spawn(
        gate: Arc<PersistGate>,
        events: broadcast::Sender<PersistenceEvent>,
    ) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();

        let thread = thread::Builder::new()
            .name("bummerl-persistence".into())
            .spawn(move || run(rx, gate, events))?;

        Ok(Self {
            queue: Some(tx),
            thread: Some(thread),
        })
    }

    /// Queues a snapshot. Never blocks.
    pub fn submit(&self, snapshot: Snapshot) {
        let Some(queue) = &self.queue else {
            return;
        };
        if queue.send(snapshot).is_err() {
            warn!("persistence worker has stopped; snapshot dropped");
        }
    }
}

impl Drop for PersistenceWorker {
    fn drop(&mut self) {
        self.queue.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("persistence worker panicked");
            }
        }
    }
}

fn run(
    mut rx: mpsc::UnboundedReceiver<Snapshot>,
    gate: Arc<PersistGate>,
    events: broadcast::Sender<PersistenceEvent>,
) {
    debug!("persistence worker started");

    while let Some(mut snapshot) = rx.blocking_recv() {
        // Only the newest queued snapshot matters.
        while let Ok(newer) = rx.try_recv() {
            snapshot = newer;
        }

        let revision = snapshot.revision;
        match gate.write(revision, &snapshot.state, false) {
            Ok(true) => {
                debug!(revision, "auto-persisted session");
                let _ = events.send(PersistenceEvent::Saved { revision });
            }
            Ok(false) => {
                debug!(revision, "skipped stale snapshot");
            }
            Err(e) => {
                error!(revision, error = %e, "auto-persist failed");
                let _ = events.send(PersistenceEvent::Failed {
                    revision,
                    error: e.to_string(),
                });
            }
        }
    }

    debug!("persistence worker stopped");
}
