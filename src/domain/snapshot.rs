use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::{
    alert::SpendingAlert, goal::SavingsGoal, percentages::BudgetPercentages,
    period::MonthlyAllocation, transaction::Transaction,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The unit of persistence. Derived figures (income, budgets, limits) are never stored;
/// unknown fields such as a legacy `monthlyIncome` are ignored on load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    #[serde(default = "EngineSnapshot::schema_version_default")]
    pub schema_version: u8,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub percentages: BudgetPercentages,
    #[serde(default)]
    pub savings_goals: Vec<SavingsGoal>,
    #[serde(default, deserialize_with = "lenient_alerts")]
    pub alerts: Vec<SpendingAlert>,
    /// Month buckets in ascending order. Absent in older snapshots, which are backfilled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_history: Option<Vec<MonthlyAllocation>>,
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            transactions: Vec::new(),
            percentages: BudgetPercentages::default(),
            savings_goals: Vec::new(),
            alerts: Vec::new(),
            monthly_history: None,
        }
    }
}

impl EngineSnapshot {
    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

/// Alerts are display-only, so a stored alert this build cannot read (an unknown
/// `type` such as `success`) is dropped instead of failing the whole snapshot.
fn lenient_alerts<'de, D>(deserializer: D) -> Result<Vec<SpendingAlert>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<SpendingAlert>(value) {
            Ok(alert) => Some(alert),
            Err(err) => {
                warn!(error = %err, "dropping unreadable stored alert");
                None
            }
        })
        .collect())
}
