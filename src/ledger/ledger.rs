use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Amounted, Category, Identifiable, MonthKey, Transaction, TransactionDraft};
use crate::errors::{LedgerError, Result};

/// Ordered collection of transactions, most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrates a ledger from persisted records, keeping their stored order.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Validates the draft, stamps it with a fresh id and `now`, and prepends it.
    pub fn add(&mut self, draft: TransactionDraft, now: DateTime<Utc>) -> Result<Transaction> {
        draft.validate()?;
        let transaction = Transaction::from_draft(draft, now);
        self.transactions.insert(0, transaction.clone());
        Ok(transaction)
    }

    /// Removes the transaction if present. Absent ids are ignored.
    pub fn remove(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id() == id)?;
        Some(self.transactions.remove(index))
    }

    /// Replaces every field except id and date.
    pub fn edit(&mut self, id: Uuid, draft: TransactionDraft) -> Result<Transaction> {
        draft.validate()?;
        let txn = self
            .transaction_mut(id)
            .ok_or_else(|| LedgerError::NotFound(format!("transaction {id}")))?;
        txn.apply_draft(draft);
        Ok(txn.clone())
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id() == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id() == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn in_month(&self, month: MonthKey) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |txn| txn.month() == month)
    }

    /// Sum of income recorded in `month`, across all categories.
    pub fn income_in(&self, month: MonthKey) -> f64 {
        self.in_month(month)
            .filter(|txn| txn.is_income())
            .map(Amounted::amount)
            .sum()
    }

    /// Sum of expenses recorded against `category` in `month`.
    pub fn expenses_in(&self, month: MonthKey, category: Category) -> f64 {
        self.in_month(month)
            .filter(|txn| txn.is_expense() && txn.category == category)
            .map(Amounted::amount)
            .sum()
    }
}
