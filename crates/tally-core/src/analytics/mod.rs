//! Spending analytics over in-memory snapshots
//!
//! Every function here is a pure computation over the transaction and budget
//! lists handed in by the caller. Nothing reads the clock or the database;
//! the month under analysis is always an explicit argument.
//!
//! - `budget` - per-category spent/budget/remaining table for one month
//! - `dashboard` - income/expense/net summary cards
//! - `trends` - monthly expense series and category breakdown

mod budget;
mod dashboard;
mod trends;

use std::collections::HashMap;

pub use budget::{aggregate, aggregate_month, BudgetComparison, CategorySpend};
pub use dashboard::{dashboard_summary, DashboardSummary, TopCategory, RECENT_TRANSACTIONS};
pub use trends::{
    category_breakdown, monthly_expenses, CategoryShare, MonthlyTotal, DEFAULT_TREND_MONTHS,
};

use crate::models::Transaction;
use crate::month::MonthKey;

/// Per-category sums that remember the order categories were first seen
#[derive(Debug, Clone, Default)]
pub(crate) struct CategoryTotals {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl CategoryTotals {
    pub(crate) fn add(&mut self, category: &str, amount: f64) {
        match self.index.get(category) {
            Some(&i) => self.entries[i].1 += amount,
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push((category.to_string(), amount));
            }
        }
    }

    /// Sum for a category, 0 when it never appeared
    pub(crate) fn get(&self, category: &str) -> f64 {
        self.index
            .get(category)
            .map(|&i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub(crate) fn contains(&self, category: &str) -> bool {
        self.index.contains_key(category)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(c, a)| (c.as_str(), *a))
    }

    pub(crate) fn total(&self) -> f64 {
        self.entries.iter().map(|(_, a)| a).sum()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Category with the largest sum. Equal sums resolve to the
    /// lexicographically smallest category name.
    pub(crate) fn top(&self) -> Option<(&str, f64)> {
        self.iter().fold(None, |best, (category, amount)| match best {
            Some((best_cat, best_amount))
                if best_amount > amount || (best_amount == amount && best_cat <= category) =>
            {
                Some((best_cat, best_amount))
            }
            _ => Some((category, amount)),
        })
    }
}

/// Expense sums per category for the transactions dated in `month`
pub(crate) fn month_expenses(transactions: &[Transaction], month: MonthKey) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for tx in transactions
        .iter()
        .filter(|t| t.is_expense() && month.contains(t.date))
    {
        totals.add(&tx.category, tx.amount);
    }
    totals
}
