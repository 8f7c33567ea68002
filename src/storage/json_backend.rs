use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    domain::{EngineSnapshot, CURRENT_SCHEMA_VERSION},
    errors::LedgerError,
};

use super::{Result, SnapshotStore};

const SNAPSHOT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";
const UNREADABLE_SUFFIX: &str = "unreadable";

/// Stores the snapshot as pretty JSON in `<dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: Option<PathBuf>, name: &str) -> Result<Self> {
        let root = PathResolver::resolve_base(dir);
        ensure_dir(&root)?;
        Ok(Self {
            path: root.join(format!("{}.{}", canonical_name(name), SNAPSHOT_EXTENSION)),
        })
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where [`SnapshotStore::quarantine`] moves an unreadable snapshot.
    pub fn quarantine_path(&self) -> PathBuf {
        suffixed_path(&self.path, UNREADABLE_SUFFIX)
    }
}

impl SnapshotStore for JsonFileStore {
    fn save(&self, snapshot: &EngineSnapshot) -> Result<()> {
        save_snapshot_to_path(snapshot, &self.path)?;
        debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<EngineSnapshot>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no saved snapshot found");
            return Ok(None);
        }
        load_snapshot_from_path(&self.path).map(Some)
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn quarantine(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let target = self.quarantine_path();
        fs::rename(&self.path, &target)?;
        warn!(from = %self.path.display(), to = %target.display(), "moved unreadable snapshot aside");
        Ok(())
    }
}

pub fn save_snapshot_to_path(snapshot: &EngineSnapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_snapshot_from_path(path: &Path) -> Result<EngineSnapshot> {
    let data = fs::read_to_string(path)?;
    parse_snapshot(&data)
}

/// Parses a snapshot, refusing schema versions this build does not know.
pub fn parse_snapshot(data: &str) -> Result<EngineSnapshot> {
    let snapshot: EngineSnapshot = serde_json::from_str(data)?;
    if snapshot.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(LedgerError::Persistence(format!(
            "snapshot schema v{} is newer than supported v{}",
            snapshot.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(snapshot)
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "snapshot".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    suffixed_path(path, TMP_SUFFIX)
}

fn suffixed_path(path: &Path, suffix: &str) -> PathBuf {
    let mut target = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, suffix),
        None => suffix.to_string(),
    };
    target.set_extension(ext);
    target
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BudgetPercentages;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonFileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(Some(temp.path().to_path_buf()), "Household Budget")
            .expect("json store");
        (store, temp)
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        let snapshot = EngineSnapshot {
            percentages: BudgetPercentages::new(50.0, 30.0, 20.0),
            ..EngineSnapshot::default()
        };
        store.save(&snapshot).expect("save snapshot");
        let loaded = store.load().expect("load snapshot").expect("snapshot present");
        assert_eq!(loaded, snapshot);
        assert!(store
            .path()
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == "household_budget.json"));
    }

    #[test]
    fn load_missing_file_is_none() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn clear_removes_file_and_tolerates_absence() {
        let (store, _guard) = store_with_temp_dir();
        store.save(&EngineSnapshot::default()).unwrap();
        assert!(store.path().exists());
        store.clear().expect("clear");
        assert!(!store.path().exists());
        store.clear().expect("clear twice");
    }

    #[test]
    fn quarantine_moves_file_aside() {
        let (store, _guard) = store_with_temp_dir();
        fs::write(store.path(), "{ broken").unwrap();
        store.quarantine().expect("quarantine");
        assert!(!store.path().exists());
        assert_eq!(fs::read_to_string(store.quarantine_path()).unwrap(), "{ broken");
        assert!(store.load().unwrap().is_none());
        store.quarantine().expect("nothing left to move");
    }

    #[test]
    fn rejects_future_schema_versions() {
        let (store, _guard) = store_with_temp_dir();
        let snapshot = EngineSnapshot {
            schema_version: CURRENT_SCHEMA_VERSION + 5,
            ..EngineSnapshot::default()
        };
        fs::write(store.path(), serde_json::to_string(&snapshot).unwrap()).unwrap();
        let err = store.load().expect_err("future schema should fail");
        match err {
            LedgerError::Persistence(message) => {
                assert!(message.contains("newer"), "unexpected error: {message}");
            }
            other => panic!("expected persistence error, got {other:?}"),
        }
    }
}
