use crate::domain::SpendingStatus;

/// Spend at or above this share of the budget is a warning.
pub const WARNING_PERCENT: f64 = 80.0;
/// Spend at or above this share of the budget is over budget.
pub const DANGER_PERCENT: f64 = 100.0;

pub struct StatusService;

impl StatusService {
    /// Tiers `spent` against `budgeted`. A zero (or negative) budget is `Normal`.
    pub fn classify(spent: f64, budgeted: f64) -> SpendingStatus {
        let Some(percent) = Self::usage_percent(spent, budgeted) else {
            return SpendingStatus::Normal;
        };
        if percent < WARNING_PERCENT {
            SpendingStatus::Normal
        } else if percent < DANGER_PERCENT {
            SpendingStatus::Warning
        } else {
            SpendingStatus::Danger
        }
    }

    /// Share of the budget used, or `None` when there is no budget to measure against.
    pub fn usage_percent(spent: f64, budgeted: f64) -> Option<f64> {
        (budgeted > 0.0).then(|| spent / budgeted * 100.0)
    }
}
