use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    category::Category,
    common::{Amounted, Identifiable},
    period::MonthKey,
};
use crate::errors::{LedgerError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// How money moved. Descriptive only: no budget, limit, or status reads it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    #[default]
    Online,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Online => "online",
        };
        f.write_str(label)
    }
}

/// User intent for a new or edited transaction; id and date are assigned by the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub amount: f64,
    pub category: Category,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub payment_method: PaymentMethod,
}

impl TransactionDraft {
    pub fn income(amount: f64, category: Category, description: impl Into<String>) -> Self {
        Self {
            amount,
            category,
            description: description.into(),
            kind: TransactionKind::Income,
            payment_method: PaymentMethod::default(),
        }
    }

    pub fn expense(amount: f64, category: Category, description: impl Into<String>) -> Self {
        Self {
            amount,
            category,
            description: description.into(),
            kind: TransactionKind::Expense,
            payment_method: PaymentMethod::default(),
        }
    }

    pub fn paid_with(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(LedgerError::Validation(format!(
                "amount must be greater than zero (got {})",
                self.amount
            )));
        }
        if self.description.trim().is_empty() {
            return Err(LedgerError::Validation(
                "description must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub amount: f64,
    pub category: Category,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub payment_method: PaymentMethod,
}

impl Transaction {
    /// Builds a transaction from a validated draft.
    pub fn from_draft(draft: TransactionDraft, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: draft.amount,
            category: draft.category,
            description: draft.description,
            date,
            kind: draft.kind,
            payment_method: draft.payment_method,
        }
    }

    /// Replaces every field except `id` and `date`.
    pub fn apply_draft(&mut self, draft: TransactionDraft) {
        self.amount = draft.amount;
        self.category = draft.category;
        self.description = draft.description;
        self.kind = draft.kind;
        self.payment_method = draft.payment_method;
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// `+amount` for income, `-amount` for expenses.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::from_datetime(self.date)
    }

    /// The only view of a transaction that period accounting gets to see.
    pub fn accrual(&self) -> Accrual {
        Accrual {
            month: self.month(),
            category: self.category,
            signed_amount: self.signed_amount(),
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Signed, payment-agnostic contribution of one transaction to a month bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accrual {
    pub month: MonthKey,
    pub category: Category,
    pub signed_amount: f64,
}

impl Accrual {
    pub fn reversed(self) -> Self {
        Self {
            signed_amount: -self.signed_amount,
            ..self
        }
    }
}
