//! Splits the current month's income into per-category budgets.
//!
//! Nothing here accepts a payment method: budgets derive from amounts, categories,
//! kinds, and dates only.

use crate::core::time::Clock;
use crate::domain::{BudgetPercentages, Category, CategoryAmounts, MonthKey};
use crate::ledger::Ledger;

use super::ServiceResult;

/// Stateless budgeting utilities that operate over [`Ledger`] snapshots.
pub struct BudgetService;

impl BudgetService {
    /// `baseline * share / 100` for each category.
    pub fn compute_budget(income_baseline: f64, percentages: &BudgetPercentages) -> CategoryAmounts {
        let share = |category: Category| income_baseline * percentages.get(category) / 100.0;
        CategoryAmounts {
            needs: share(Category::Needs),
            wants: share(Category::Wants),
            investments: share(Category::Investments),
        }
    }

    /// Income recorded in `month`, the basis for percentage allocation.
    pub fn income_baseline(ledger: &Ledger, month: MonthKey) -> f64 {
        ledger.income_in(month)
    }

    /// Budgets for the month containing `clock.now()`, recomputed on every call.
    pub fn current_budget(
        ledger: &Ledger,
        percentages: &BudgetPercentages,
        clock: &dyn Clock,
    ) -> CategoryAmounts {
        let baseline = Self::income_baseline(ledger, clock.current_month());
        Self::compute_budget(baseline, percentages)
    }

    /// True when the split is whole percents summing to exactly 100.
    pub fn validate_percentages(percentages: &BudgetPercentages) -> bool {
        percentages.is_valid()
    }

    /// Checks a proposed split before it replaces the active one.
    pub fn check_split(percentages: &BudgetPercentages) -> ServiceResult<()> {
        percentages.validate()
    }

    /// Needs budget spread evenly over the days of `month`.
    pub fn daily_limit(needs_budget: f64, month: MonthKey) -> f64 {
        needs_budget / f64::from(month.days())
    }

    pub fn current_daily_limit(needs_budget: f64, clock: &dyn Clock) -> f64 {
        Self::daily_limit(needs_budget, clock.current_month())
    }
}
