use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// The three budget buckets income is split into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Needs,
    Wants,
    Investments,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Needs, Category::Wants, Category::Investments];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Needs => "needs",
            Category::Wants => "wants",
            Category::Investments => "investments",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One amount per [`Category`], used for budgets and per-month accruals alike.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryAmounts {
    pub needs: f64,
    pub wants: f64,
    pub investments: f64,
}

impl CategoryAmounts {
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

    pub fn get_mut(&mut self, category: Category) -> &mut f64 {
        match category {
            Category::Needs => &mut self.needs,
            Category::Wants => &mut self.wants,
            Category::Investments => &mut self.investments,
        }
    }

    pub fn total(&self) -> f64 {
        self.needs + self.wants + self.investments
    }

    pub fn is_zero(&self) -> bool {
        self.needs == 0.0 && self.wants == 0.0 && self.investments == 0.0
    }
}

impl Add for CategoryAmounts {
    type Output = CategoryAmounts;

    fn add(self, rhs: Self) -> Self::Output {
        CategoryAmounts {
            needs: self.needs + rhs.needs,
            wants: self.wants + rhs.wants,
            investments: self.investments + rhs.investments,
        }
    }
}

impl AddAssign for CategoryAmounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
