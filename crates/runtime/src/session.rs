//! Session facade: one [`GameState`] bound to a repository.
//!
//! The session owns the authoritative in-memory state. Reads never touch
//! storage. Every mutation bumps a revision counter; with auto-persist on, a
//! snapshot of that revision is handed to the background worker.

use std::sync::Arc;

use bummerl_core::{
    GameError, GameState, LaneId, LaneView, RowKind, Score, SlotId, SlotStamper, Step,
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::repository::{FileSessionRepository, Result, SessionRepository};
use crate::stamper::SystemStamper;
use crate::workers::{PersistGate, PersistenceEvent, PersistenceWorker, Snapshot};

const EVENT_CAPACITY: usize = 64;

/// Live score-keeping session.
pub struct Session {
    state: GameState,
    revision: u64,
    gate: Arc<PersistGate>,
    events: broadcast::Sender<PersistenceEvent>,
    worker: Option<PersistenceWorker>,
    stamper: Box<dyn SlotStamper + Send>,
}

impl Session {
    /// Opens a session on `repo`.
    ///
    /// A stored document is restored (migrating older schemas). Nothing
    /// stored, or a document that cannot be understood, yields the default
    /// state with a warning. Storage failures (I/O, poisoned locks) are
    /// returned so the stored document is never replaced by a blank session.
    pub fn open(repo: Arc<dyn SessionRepository>, config: &SessionConfig) -> Result<Self> {
        let state = match repo.load() {
            Ok(Some(state)) => {
                info!(slots = state.saved_slots().len(), "restored session");
                state
            }
            Ok(None) => {
                debug!("no stored session; starting fresh");
                GameState::default()
            }
            Err(e) if e.class().falls_back_to_default() => {
                warn!(
                    class = e.class().as_str(),
                    code = e.error_code(),
                    error = %e,
                    "stored session unreadable; starting fresh"
                );
                GameState::default()
            }
            Err(e) => {
                warn!(
                    class = e.class().as_str(),
                    code = e.error_code(),
                    error = %e,
                    "could not read stored session"
                );
                return Err(e);
            }
        };

        let gate = Arc::new(PersistGate::new(repo));
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let worker = if config.auto_persist {
            match PersistenceWorker::spawn(gate.clone(), events.clone()) {
                Ok(worker) => Some(worker),
                Err(e) => {
                    warn!(error = %e, "could not start persistence worker; auto-persist disabled");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            state,
            revision: 0,
            gate,
            events,
            worker,
            stamper: Box::new(SystemStamper),
        })
    }

    /// Opens a session backed by the JSON file in the configured data dir.
    pub fn open_default(config: &SessionConfig) -> Result<Self> {
        let repo = FileSessionRepository::new(config.resolve_data_dir())?;
        Self::open(Arc::new(repo), config)
    }

    /// Replaces the slot stamper (ids and timestamps for new saves).
    pub fn with_stamper(mut self, stamper: impl SlotStamper + Send + 'static) -> Self {
        self.stamper = Box::new(stamper);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn lane_view(&self, lane: LaneId) -> Option<LaneView> {
        self.state.lane_view(lane)
    }

    /// Revision of the in-memory state; bumped by every applied change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Background write notifications. Only produced with auto-persist on.
    pub fn subscribe(&self) -> broadcast::Receiver<PersistenceEvent> {
        self.events.subscribe()
    }

    pub fn auto_persist(&self) -> bool {
        self.worker.is_some()
    }

    // ===== mutations =====

    // Unknown lanes and out-of-row indices leave the revision alone.

    pub fn set_score(&mut self, lane: LaneId, score: i64) -> bool {
        let changed = self.state.set_score(lane, score);
        self.touched_if(changed)
    }

    pub fn set_bummerl(&mut self, lane: LaneId, score: i64) -> bool {
        let changed = self.state.set_bummerl(lane, score);
        self.touched_if(changed)
    }

    pub fn set_name(&mut self, lane: LaneId, name: impl Into<String>) -> bool {
        let changed = self.state.set_name(lane, name);
        self.touched_if(changed)
    }

    pub fn step(&mut self, lane: LaneId, row: RowKind, step: Step) -> Option<Score> {
        let score = self.state.step(lane, row, step)?;
        self.touched();
        Some(score)
    }

    pub fn activate_counter(&mut self, lane: LaneId, row: RowKind, index: usize) -> Option<Score> {
        let score = self.state.activate_counter(lane, row, index)?;
        self.touched();
        Some(score)
    }

    pub fn reset_game(&mut self) {
        self.state.reset_game();
        self.touched();
    }

    pub fn save_game(&mut self, name: impl Into<String>, overwrite: Option<&SlotId>) -> SlotId {
        let id = self
            .state
            .save_game(name, overwrite, self.stamper.as_mut());
        info!(slot = %id, "saved game");
        self.touched();
        id
    }

    pub fn quick_save(&mut self) -> Option<SlotId> {
        let id = self.state.quick_save(self.stamper.as_mut())?;
        info!(slot = %id, "quick-saved game");
        self.touched();
        Some(id)
    }

    pub fn load_game(&mut self, id: &SlotId) -> bool {
        let loaded = self.state.load_game(id);
        if loaded {
            info!(slot = %id, "loaded game");
            self.touched();
        }
        loaded
    }

    pub fn delete_game(&mut self, id: &SlotId) -> bool {
        let deleted = self.state.delete_game(id);
        if deleted {
            info!(slot = %id, "deleted game");
            self.touched();
        }
        deleted
    }

    // ===== persistence =====

    /// Writes the current state now.
    ///
    /// On failure the in-memory state is untouched and the stored document
    /// keeps its previous content.
    pub fn persist(&self) -> Result<()> {
        match self.gate.write(self.revision, &self.state, true) {
            Ok(_) => {
                debug!(revision = self.revision, "persisted session");
                Ok(())
            }
            Err(e) => {
                warn!(revision = self.revision, error = %e, "persist failed");
                Err(e)
            }
        }
    }

    fn touched_if(&mut self, changed: bool) -> bool {
        if changed {
            self.touched();
        }
        changed
    }

    fn touched(&mut self) {
        self.revision += 1;
        if let Some(worker) = &self.worker {
            worker.submit(Snapshot {
                revision: self.revision,
                state: self.state.clone(),
            });
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("persisted", &self.gate.persisted_revision())
            .field("auto_persist", &self.worker.is_some())
            .finish()
    }
}
