use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::errors::{LedgerError, Result};

/// Share of income assigned to each category, in whole percent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BudgetPercentages {
    pub needs: f64,
    pub wants: f64,
    pub investments: f64,
}

impl Default for BudgetPercentages {
    fn default() -> Self {
        Self {
            needs: 40.0,
            wants: 30.0,
            investments: 30.0,
        }
    }
}

impl BudgetPercentages {
    pub fn new(needs: f64, wants: f64, investments: f64) -> Self {
        Self {
            needs,
            wants,
            investments,
        }
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Needs => self.needs,
            Category::Wants => self.wants,
            Category::Investments => self.investments,
        }
    }

    /// True iff every share is a whole percent in `0..=100` and the three sum to 100.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<()> {
        for category in Category::ALL {
            let value = self.get(category);
            if !value.is_finite() || value.fract() != 0.0 {
                return Err(LedgerError::InvalidSplit(format!(
                    "{category} share must be a whole percent (got {value})"
                )));
            }
            if !(0.0..=100.0).contains(&value) {
                return Err(LedgerError::InvalidSplit(format!(
                    "{category} share must be within 0..=100 (got {value})"
                )));
            }
        }
        let sum = self.needs + self.wants + self.investments;
        if sum != 100.0 {
            return Err(LedgerError::InvalidSplit(format!(
                "shares must sum to 100 (got {sum})"
            )));
        }
        Ok(())
    }
}
