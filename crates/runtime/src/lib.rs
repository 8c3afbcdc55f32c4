//! Session runtime for the Bummerlzähler.
//!
//! This crate binds the pure [`bummerl_core::GameState`] to durable storage.
//! Consumers open a [`Session`], mutate it, and either persist explicitly or
//! let the background worker write after every change.
//!
//! Modules are organized by responsibility:
//! - [`config`] resolves the data directory and auto-persist switch
//! - [`repository`] stores the versioned JSON document and migrates old ones
//! - `workers` keeps the background writer internal to the crate
pub mod config;
pub mod repository;

mod session;
mod stamper;
mod workers;

pub use config::{STORAGE_KEY, SessionConfig};
pub use repository::{
    FileSessionRepository, InMemorySessionRepo, RepositoryError, SCHEMA_VERSION,
    SessionRepository, StoredSession,
};
pub use session::Session;
pub use stamper::SystemStamper;
pub use workers::PersistenceEvent;

pub use bummerl_core;
