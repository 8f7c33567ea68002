use serde::Serialize;

use crate::domain::{BudgetPercentages, Category, CategoryAmounts, MonthKey, SpendingStatus};
use crate::ledger::Ledger;

use super::{BudgetService, StatusService};

/// Budget versus spend for one category in one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: Category,
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    pub status: SpendingStatus,
}

/// Everything the dashboard header needs for a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetOverview {
    pub month: MonthKey,
    pub income: f64,
    pub budget: CategoryAmounts,
    pub daily_limit: f64,
    pub categories: Vec<CategorySpend>,
}

pub struct SummaryService;

impl SummaryService {
    pub fn category_spend(ledger: &Ledger, month: MonthKey, category: Category) -> f64 {
        ledger.expenses_in(month, category)
    }

    pub fn spending_overview(
        ledger: &Ledger,
        percentages: &BudgetPercentages,
        month: MonthKey,
    ) -> Vec<CategorySpend> {
        let budget = BudgetService::compute_budget(
            BudgetService::income_baseline(ledger, month),
            percentages,
        );
        Category::ALL
            .iter()
            .map(|&category| {
                let budgeted = budget.get(category);
                let spent = Self::category_spend(ledger, month, category);
                CategorySpend {
                    category,
                    budget: budgeted,
                    spent,
                    remaining: budgeted - spent,
                    status: StatusService::classify(spent, budgeted),
                }
            })
            .collect()
    }

    pub fn overview(
        ledger: &Ledger,
        percentages: &BudgetPercentages,
        month: MonthKey,
    ) -> BudgetOverview {
        let income = BudgetService::income_baseline(ledger, month);
        let budget = BudgetService::compute_budget(income, percentages);
        BudgetOverview {
            month,
            income,
            budget,
            daily_limit: BudgetService::daily_limit(budget.needs, month),
            categories: Self::spending_overview(ledger, percentages, month),
        }
    }
}
