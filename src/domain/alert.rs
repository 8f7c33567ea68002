use std::fmt;

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Spend-versus-budget tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SpendingStatus {
    Normal,
    Warning,
    Danger,
}

impl SpendingStatus {
    /// The alert level this status raises, if any.
    pub fn alert_level(self) -> Option<AlertLevel> {
        match self {
            SpendingStatus::Normal => None,
            SpendingStatus::Warning => Some(AlertLevel::Warning),
            SpendingStatus::Danger => Some(AlertLevel::Danger),
        }
    }
}

impl fmt::Display for SpendingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SpendingStatus::Normal => "normal",
            SpendingStatus::Warning => "warning",
            SpendingStatus::Danger => "danger",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
    Danger,
}

/// A user-facing threshold notice. Appended, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpendingAlert {
    #[serde(rename = "type")]
    pub level: AlertLevel,
    pub message: String,
    pub category: Category,
}

impl SpendingAlert {
    pub fn new(level: AlertLevel, category: Category) -> Self {
        let message = match level {
            AlertLevel::Warning => format!("You're close to your {category} budget!"),
            AlertLevel::Danger => format!("You're exceeding your {category} budget!"),
        };
        Self {
            level,
            message,
            category,
        }
    }
}
