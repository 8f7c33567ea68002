//! Calendar-month keys and the per-month allocation record.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryAmounts};
use crate::errors::LedgerError;

/// A UTC calendar month, rendered as `YYYY-MM`. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, LedgerError> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::Validation(format!(
                "month must be within 1..=12 (got {month})"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self::from_date(instant.date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }
}

/// Number of days (28-31) in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.map(|first| (first - Duration::days(1)).day())
        .unwrap_or(31)
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::Validation(format!("invalid month key `{s}`, expected YYYY-MM"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// Label of an allocation row: a concrete month or the accumulated total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PeriodLabel {
    Month(MonthKey),
    Total,
}

const TOTAL_LABEL: &str = "Total";

impl PeriodLabel {
    pub fn month_key(&self) -> Option<MonthKey> {
        match self {
            PeriodLabel::Month(key) => Some(*key),
            PeriodLabel::Total => None,
        }
    }
}

impl fmt::Display for PeriodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodLabel::Month(key) => write!(f, "{key}"),
            PeriodLabel::Total => f.write_str(TOTAL_LABEL),
        }
    }
}

impl TryFrom<String> for PeriodLabel {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == TOTAL_LABEL {
            Ok(PeriodLabel::Total)
        } else {
            value.parse().map(PeriodLabel::Month)
        }
    }
}

impl From<PeriodLabel> for String {
    fn from(label: PeriodLabel) -> Self {
        label.to_string()
    }
}

/// Signed per-category accrual (income minus expenses) for one period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MonthlyAllocation {
    pub month: PeriodLabel,
    #[serde(flatten)]
    pub amounts: CategoryAmounts,
}

impl MonthlyAllocation {
    pub fn empty(month: MonthKey) -> Self {
        Self {
            month: PeriodLabel::Month(month),
            amounts: CategoryAmounts::default(),
        }
    }

    pub fn total(amounts: CategoryAmounts) -> Self {
        Self {
            month: PeriodLabel::Total,
            amounts,
        }
    }

    pub fn month_key(&self) -> Option<MonthKey> {
        self.month.month_key()
    }

    pub fn get(&self, category: Category) -> f64 {
        self.amounts.get(category)
    }

    pub fn needs(&self) -> f64 {
        self.amounts.needs
    }

    pub fn wants(&self) -> f64 {
        self.amounts.wants
    }

    pub fn investments(&self) -> f64 {
        self.amounts.investments
    }
}
