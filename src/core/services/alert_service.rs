use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{BudgetPercentages, Category, MonthKey, SpendingAlert, SpendingStatus};
use crate::ledger::Ledger;

use super::{BudgetService, StatusService};

/// How repeated breaches in the same category are recorded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AlertPolicy {
    /// One alert per breaching expense.
    #[default]
    AppendEveryBreach,
    /// Skip an alert when one with the same category and level is already pending.
    OncePerLevel,
}

/// Result of evaluating one expense against its category budget.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvaluation {
    pub category: Category,
    pub spent: f64,
    pub budgeted: f64,
    pub status: SpendingStatus,
    pub alert: Option<SpendingAlert>,
}

pub struct AlertService;

impl AlertService {
    /// Classifies `category` against a budget read from the ledger as it is now.
    ///
    /// Call this after the expense has been committed to `ledger`, so both the spend
    /// and the budget include it.
    pub fn evaluate(
        ledger: &Ledger,
        percentages: &BudgetPercentages,
        category: Category,
        month: MonthKey,
    ) -> AlertEvaluation {
        let baseline = BudgetService::income_baseline(ledger, month);
        let budgeted = BudgetService::compute_budget(baseline, percentages).get(category);
        let spent = ledger.expenses_in(month, category);
        let status = StatusService::classify(spent, budgeted);
        AlertEvaluation {
            category,
            spent,
            budgeted,
            status,
            alert: status
                .alert_level()
                .map(|level| SpendingAlert::new(level, category)),
        }
    }

    /// Appends the evaluation's alert to `alerts` according to `policy`.
    /// Returns the alert that was appended, if any.
    pub fn raise(
        alerts: &mut Vec<SpendingAlert>,
        evaluation: &AlertEvaluation,
        policy: AlertPolicy,
    ) -> Option<SpendingAlert> {
        let alert = evaluation.alert.clone()?;
        if policy == AlertPolicy::OncePerLevel
            && alerts
                .iter()
                .any(|existing| existing.category == alert.category && existing.level == alert.level)
        {
            return None;
        }
        info!(
            category = %evaluation.category,
            status = %evaluation.status,
            spent = evaluation.spent,
            budgeted = evaluation.budgeted,
            "spending alert raised"
        );
        alerts.push(alert.clone());
        Some(alert)
    }

    /// Removes the alert at `index`, if present.
    pub fn dismiss(alerts: &mut Vec<SpendingAlert>, index: usize) -> Option<SpendingAlert> {
        (index < alerts.len()).then(|| alerts.remove(index))
    }
}
