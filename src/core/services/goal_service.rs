//! Validated helpers for the savings goal list.

use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{Identifiable, NamedEntity, SavingsGoal, SavingsGoalDraft};
use crate::errors::LedgerError;

use super::ServiceResult;

pub struct GoalService;

impl GoalService {
    /// Creates a goal with nothing saved yet and appends it.
    pub fn create(goals: &mut Vec<SavingsGoal>, draft: SavingsGoalDraft) -> ServiceResult<SavingsGoal> {
        draft.validate()?;
        let goal = SavingsGoal::from_draft(draft);
        debug!(goal = %goal.id(), name = goal.name(), "savings goal created");
        goals.push(goal.clone());
        Ok(goal)
    }

    /// Adds `amount` to the goal's saved total. Totals only ever grow.
    pub fn contribute(
        goals: &mut [SavingsGoal],
        id: Uuid,
        amount: f64,
    ) -> ServiceResult<SavingsGoal> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LedgerError::Validation(format!(
                "contribution must be greater than zero (got {amount})"
            )));
        }
        let goal = goals
            .iter_mut()
            .find(|goal| goal.id() == id)
            .ok_or_else(|| LedgerError::NotFound(format!("savings goal {id}")))?;
        let was_reached = goal.is_reached();
        goal.current_amount += amount;
        if goal.is_reached() && !was_reached {
            info!(goal = %goal.id(), name = goal.name(), "savings goal reached");
        }
        Ok(goal.clone())
    }

    /// Deletes the goal if present. Absent ids are ignored.
    pub fn delete(goals: &mut Vec<SavingsGoal>, id: Uuid) -> Option<SavingsGoal> {
        let index = goals.iter().position(|goal| goal.id() == id)?;
        Some(goals.remove(index))
    }
}
