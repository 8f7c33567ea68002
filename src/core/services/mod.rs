pub mod alert_service;
pub mod budget_service;
pub mod goal_service;
pub mod status_service;
pub mod summary_service;
pub mod transaction_service;

pub use alert_service::{AlertEvaluation, AlertPolicy, AlertService};
pub use budget_service::BudgetService;
pub use goal_service::GoalService;
pub use status_service::StatusService;
pub use summary_service::{BudgetOverview, CategorySpend, SummaryService};
pub use transaction_service::TransactionService;

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, LedgerError>;
