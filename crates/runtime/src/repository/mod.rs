//! Repository layer for the persisted session.
//!
//! Repositories keep one versioned JSON document holding the lanes, the save
//! slots and the current-slot reference. Storage failures are reported to the
//! caller; they never touch the in-memory state, which stays authoritative.

mod document;
mod error;
mod file;
mod memory;
mod traits;

pub use document::{SCHEMA_VERSION, StoredSession};
pub use error::{RepositoryError, Result};
pub use file::FileSessionRepository;
pub use memory::InMemorySessionRepo;
pub use traits::SessionRepository;
