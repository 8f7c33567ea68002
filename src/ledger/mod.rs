//! Transaction ledger and the per-month allocation history derived from it.

pub mod history;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use history::{AccrualOutcome, MonthlyHistory};
pub use ledger::Ledger;
