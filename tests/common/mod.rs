#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use budget_ledger::{
    config::Config,
    core::{time::FixedClock, BudgetEngine},
    storage::JsonFileStore,
};
use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Clock pinned to `y-m-d` at 10:00 UTC.
pub fn clock_at(year: i32, month: u32, day: u32) -> FixedClock {
    FixedClock::new(
        Utc.with_ymd_and_hms(year, month, day, 10, 0, 0)
            .single()
            .expect("valid test timestamp"),
    )
}

/// Engine with no persistence, pinned to 2024-03-01.
pub fn memory_engine() -> (BudgetEngine, FixedClock) {
    let clock = clock_at(2024, 3, 1);
    (BudgetEngine::new(Config::default(), clock.clone()), clock)
}

/// Engine backed by a JSON file in an isolated directory.
pub fn file_engine(clock: FixedClock) -> (BudgetEngine, JsonFileStore) {
    let store = JsonFileStore::new(Some(temp_base()), "financial_dashboard_data")
        .expect("create json store");
    let engine = BudgetEngine::open(Config::default(), clock, Box::new(store.clone()));
    (engine, store)
}
