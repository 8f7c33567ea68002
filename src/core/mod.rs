pub mod engine;
pub mod services;
pub mod time;
pub mod utils;

pub use engine::{BudgetEngine, PersistenceWarning, SharedEngine};
pub use time::{Clock, FixedClock, SystemClock};
