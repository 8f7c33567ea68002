#![doc(test(attr(deny(warnings))))]

//! Budget Ledger records income and expenses, derives per-category budgets from an
//! income baseline, and keeps a per-calendar-month allocation history.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::config::{Config, ConfigManager};
pub use crate::core::{BudgetEngine, Clock, FixedClock, PersistenceWarning, SharedEngine, SystemClock};
pub use crate::errors::{LedgerError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Ledger tracing initialized.");
    });
}
