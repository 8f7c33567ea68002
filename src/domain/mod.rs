pub mod alert;
pub mod category;
pub mod common;
pub mod goal;
pub mod percentages;
pub mod period;
pub mod snapshot;
pub mod transaction;

pub use alert::{AlertLevel, SpendingAlert, SpendingStatus};
pub use category::{Category, CategoryAmounts};
pub use common::{Amounted, Identifiable, NamedEntity};
pub use goal::{GoalHorizon, SavingsGoal, SavingsGoalDraft};
pub use percentages::BudgetPercentages;
pub use period::{days_in_month, MonthKey, MonthlyAllocation, PeriodLabel};
pub use snapshot::{EngineSnapshot, CURRENT_SCHEMA_VERSION};
pub use transaction::{Accrual, PaymentMethod, Transaction, TransactionDraft, TransactionKind};
