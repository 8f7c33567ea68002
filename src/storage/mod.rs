pub mod json_backend;
pub mod memory;

use std::sync::Arc;

use crate::{domain::EngineSnapshot, errors::LedgerError};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Persistence port: a single key-value slot holding the engine snapshot.
pub trait SnapshotStore: Send + Sync {
    fn save(&self, snapshot: &EngineSnapshot) -> Result<()>;
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<EngineSnapshot>>;
    fn clear(&self) -> Result<()>;
    /// Moves the stored payload out of the slot without deleting it, so a payload
    /// that failed to load survives later saves.
    fn quarantine(&self) -> Result<()>;
}

/// Lets a host keep a handle on a store it hands to the engine.
impl<S: SnapshotStore + ?Sized> SnapshotStore for Arc<S> {
    fn save(&self, snapshot: &EngineSnapshot) -> Result<()> {
        (**self).save(snapshot)
    }

    fn load(&self) -> Result<Option<EngineSnapshot>> {
        (**self).load()
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }

    fn quarantine(&self) -> Result<()> {
        (**self).quarantine()
    }
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
