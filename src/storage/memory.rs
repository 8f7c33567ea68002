use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard,
    },
};

use crate::{domain::EngineSnapshot, errors::LedgerError};

use super::{json_backend::parse_snapshot, Result, SnapshotStore};

pub const DEFAULT_STORAGE_KEY: &str = "financial_dashboard_data";
const UNREADABLE_SUFFIX: &str = ".unreadable";

/// Key-value string storage, the in-process analogue of browser local storage.
///
/// Snapshots are stored as JSON text so a save/load cycle goes through the same
/// serialization as the file store.
#[derive(Debug)]
pub struct MemoryStore {
    key: String,
    entries: Mutex<HashMap<String, String>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_key(DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: Mutex::new(HashMap::new()),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Seeds the slot with raw JSON, e.g. a snapshot written by an older version.
    pub fn with_raw(key: impl Into<String>, json: impl Into<String>) -> Self {
        let store = Self::with_key(key);
        store.entries().insert(store.key.clone(), json.into());
        store
    }

    /// Makes every subsequent call fail, to simulate storage being unavailable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn raw(&self) -> Option<String> {
        self.entries().get(&self.key).cloned()
    }

    /// The payload last moved aside by [`SnapshotStore::quarantine`].
    pub fn quarantined(&self) -> Option<String> {
        self.entries().get(&self.quarantine_key()).cloned()
    }

    fn quarantine_key(&self) -> String {
        format!("{}{}", self.key, UNREADABLE_SUFFIX)
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LedgerError::Persistence(format!(
                "storage slot `{}` is unavailable",
                self.key
            )));
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&self, snapshot: &EngineSnapshot) -> Result<()> {
        self.check_available()?;
        let json = serde_json::to_string(snapshot)?;
        self.entries().insert(self.key.clone(), json);
        Ok(())
    }

    fn load(&self) -> Result<Option<EngineSnapshot>> {
        self.check_available()?;
        self.raw().as_deref().map(parse_snapshot).transpose()
    }

    fn clear(&self) -> Result<()> {
        self.check_available()?;
        self.entries().remove(&self.key);
        Ok(())
    }

    fn quarantine(&self) -> Result<()> {
        self.check_available()?;
        let mut entries = self.entries();
        if let Some(payload) = entries.remove(&self.key) {
            entries.insert(self.quarantine_key(), payload);
        }
        Ok(())
    }
}
