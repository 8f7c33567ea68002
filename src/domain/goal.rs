use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{Identifiable, NamedEntity};
use crate::errors::{LedgerError, Result};

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalHorizon {
    ShortTerm,
    LongTerm,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalDraft {
    pub name: String,
    pub target_amount: f64,
    pub deadline: NaiveDate,
    pub category: GoalHorizon,
}

impl SavingsGoalDraft {
    pub fn new(
        name: impl Into<String>,
        target_amount: f64,
        deadline: NaiveDate,
        category: GoalHorizon,
    ) -> Self {
        Self {
            name: name.into(),
            target_amount,
            deadline,
            category,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::Validation("goal name must not be empty".into()));
        }
        if !self.target_amount.is_finite() || self.target_amount <= 0.0 {
            return Err(LedgerError::Validation(format!(
                "target amount must be greater than zero (got {})",
                self.target_amount
            )));
        }
        Ok(())
    }
}

/// A named savings target funded by manual contributions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: Uuid,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: NaiveDate,
    pub category: GoalHorizon,
}

impl SavingsGoal {
    pub fn from_draft(draft: SavingsGoalDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            target_amount: draft.target_amount,
            current_amount: 0.0,
            deadline: draft.deadline,
            category: draft.category,
        }
    }

    /// Funded fraction, capped at 1.0.
    pub fn progress(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.current_amount / self.target_amount).min(1.0)
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress() * 100.0
    }

    pub fn is_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Whole days until the deadline (midnight UTC), rounded up. Negative once overdue.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        let deadline = DateTime::<Utc>::from_naive_utc_and_offset(
            self.deadline.and_time(NaiveTime::default()),
            Utc,
        );
        let seconds = (deadline - now).num_seconds();
        seconds.div_euclid(SECONDS_PER_DAY)
            + i64::from(seconds.rem_euclid(SECONDS_PER_DAY) != 0)
    }
}

impl Identifiable for SavingsGoal {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for SavingsGoal {
    fn name(&self) -> &str {
        &self.name
    }
}
