//! Business logic helpers for managing transactions.
//!
//! Every mutation is committed to the ledger first and then folded into the month
//! history, so readers that run afterwards see both changes.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{MonthKey, Transaction, TransactionDraft};
use crate::errors::LedgerError;
use crate::ledger::{Ledger, MonthlyHistory};

use super::ServiceResult;

/// Provides validated CRUD helpers for ledger transactions.
pub struct TransactionService;

impl TransactionService {
    /// Records a new transaction stamped with `now` and accrues it to its month.
    pub fn add(
        ledger: &mut Ledger,
        history: &mut MonthlyHistory,
        draft: TransactionDraft,
        now: DateTime<Utc>,
    ) -> ServiceResult<Transaction> {
        let transaction = ledger.add(draft, now)?;
        history.record(transaction.accrual(), MonthKey::from_datetime(now));
        debug!(
            id = %transaction.id,
            kind = ?transaction.kind,
            category = %transaction.category,
            amount = transaction.amount,
            "transaction added"
        );
        Ok(transaction)
    }

    /// Replaces the transaction's fields, moving its accrual if its month is still open.
    pub fn edit(
        ledger: &mut Ledger,
        history: &mut MonthlyHistory,
        id: Uuid,
        draft: TransactionDraft,
        current: MonthKey,
    ) -> ServiceResult<Transaction> {
        let previous = ledger
            .transaction(id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(format!("transaction {id}")))?;
        let updated = ledger.edit(id, draft)?;
        history.record(previous.accrual().reversed(), current);
        history.record(updated.accrual(), current);
        debug!(id = %id, "transaction edited");
        Ok(updated)
    }

    /// Removes the transaction if present, reversing its accrual in an open month.
    pub fn remove(
        ledger: &mut Ledger,
        history: &mut MonthlyHistory,
        id: Uuid,
        current: MonthKey,
    ) -> Option<Transaction> {
        let removed = ledger.remove(id)?;
        history.record(removed.accrual().reversed(), current);
        debug!(id = %id, "transaction removed");
        Some(removed)
    }
}
