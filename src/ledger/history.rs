//! Per-calendar-month allocation buckets.
//!
//! A month has no bucket until the first accrual dated in it arrives or it is opened
//! explicitly. Buckets of the month containing "now" stay open and absorb every
//! accrual for that month; once "now" moves on they are closed history and no longer
//! change. Buckets are kept sorted by month key, one per month.

use tracing::{debug, warn};

use crate::domain::{Accrual, CategoryAmounts, MonthKey, MonthlyAllocation};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyHistory {
    buckets: Vec<MonthlyAllocation>,
}

/// Outcome of applying an accrual against the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccrualOutcome {
    Applied,
    /// The target month is already closed; its bucket was left untouched.
    Closed,
}

impl MonthlyHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores persisted buckets. Rows labelled `Total` are dropped and duplicate
    /// months are merged so the one-bucket-per-month rule holds after load.
    pub fn from_buckets(rows: Vec<MonthlyAllocation>) -> Self {
        let mut history = Self::new();
        for row in rows {
            let Some(month) = row.month_key() else {
                warn!("dropping non-month allocation row `{}` from history", row.month);
                continue;
            };
            let bucket = history.bucket_mut(month);
            bucket.amounts += row.amounts;
        }
        history
    }

    /// Rebuilds buckets from scratch, one per month that has any accrual.
    pub fn backfill<I>(accruals: I) -> Self
    where
        I: IntoIterator<Item = Accrual>,
    {
        let mut history = Self::new();
        for accrual in accruals {
            history.add_to_bucket(accrual);
        }
        debug!(months = history.len(), "backfilled monthly history");
        history
    }

    /// Restores persisted buckets against the transactions they came from.
    ///
    /// Stored rows are kept as-is only for months closed relative to `current`.
    /// Every other stored month is recomputed from `accruals`, and months with
    /// accruals but no stored row are backfilled.
    pub fn reconcile<I>(rows: Vec<MonthlyAllocation>, accruals: I, current: MonthKey) -> Self
    where
        I: IntoIterator<Item = Accrual>,
    {
        let derived = Self::backfill(accruals);
        let mut history = Self::from_buckets(rows);
        for bucket in &mut history.buckets {
            let Some(month) = bucket.month_key() else {
                continue;
            };
            if Self::is_closed(month, current) {
                continue;
            }
            let amounts = derived
                .get(month)
                .map(|row| row.amounts)
                .unwrap_or_default();
            if amounts != bucket.amounts {
                debug!(%month, "recomputed stale open-month bucket");
                bucket.amounts = amounts;
            }
        }
        for row in derived.buckets {
            let Some(month) = row.month_key() else {
                continue;
            };
            if history.get(month).is_none() {
                debug!(%month, "backfilled month missing from stored history");
                history.bucket_mut(month).amounts = row.amounts;
            }
        }
        history
    }

    /// Opens the bucket for `month` if it does not exist yet. Idempotent.
    pub fn accrue(&mut self, month: MonthKey) -> MonthlyAllocation {
        *self.bucket_mut(month)
    }

    /// Applies `accrual` unless its month is closed relative to `current`.
    pub fn record(&mut self, accrual: Accrual, current: MonthKey) -> AccrualOutcome {
        if Self::is_closed(accrual.month, current) {
            debug!(month = %accrual.month, "ignoring accrual for closed month");
            return AccrualOutcome::Closed;
        }
        self.add_to_bucket(accrual);
        AccrualOutcome::Applied
    }

    pub fn is_closed(month: MonthKey, current: MonthKey) -> bool {
        month < current
    }

    pub fn get(&self, month: MonthKey) -> Option<&MonthlyAllocation> {
        self.position(month).ok().map(|index| &self.buckets[index])
    }

    /// Buckets in ascending month order.
    pub fn series(&self) -> &[MonthlyAllocation] {
        &self.buckets
    }

    /// Field-wise sum over every bucket, labelled `Total`.
    pub fn accumulated_totals(&self) -> MonthlyAllocation {
        let amounts = self
            .buckets
            .iter()
            .fold(CategoryAmounts::default(), |acc, bucket| acc + bucket.amounts);
        MonthlyAllocation::total(amounts)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    fn add_to_bucket(&mut self, accrual: Accrual) {
        let bucket = self.bucket_mut(accrual.month);
        *bucket.amounts.get_mut(accrual.category) += accrual.signed_amount;
    }

    fn bucket_mut(&mut self, month: MonthKey) -> &mut MonthlyAllocation {
        let index = match self.position(month) {
            Ok(index) => index,
            Err(index) => {
                debug!(%month, "opening allocation bucket");
                self.buckets.insert(index, MonthlyAllocation::empty(month));
                index
            }
        };
        &mut self.buckets[index]
    }

    fn position(&self, month: MonthKey) -> Result<usize, usize> {
        self.buckets
            .binary_search_by(|bucket| bucket.month_key().cmp(&Some(month)))
    }
}
