//! Background workers.

mod persistence;

pub use persistence::PersistenceEvent;
pub(crate) use persistence::{PersistGate, PersistenceWorker, Snapshot};
