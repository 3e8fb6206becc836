//! Monthly expense series and category breakdown for the charts

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Transaction;
use crate::month::MonthKey;

/// Number of months shown by the trend chart unless configured otherwise
pub const DEFAULT_TREND_MONTHS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: MonthKey,
    /// Short label such as "Mar 2024"
    pub label: String,
    pub amount: f64,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    /// Share of total expenses, 0 when there are none
    pub percentage: f64,
    pub transaction_count: usize,
}

/// Expense totals per month, oldest first, keeping the last `limit` months
/// that have any expenses
pub fn monthly_expenses(transactions: &[Transaction], limit: usize) -> Vec<MonthlyTotal> {
    let mut by_month: BTreeMap<MonthKey, (f64, usize)> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        let entry = by_month.entry(tx.month()).or_insert((0.0, 0));
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    let skip = by_month.len().saturating_sub(limit);
    by_month
        .into_iter()
        .skip(skip)
        .map(|(month, (amount, transaction_count))| MonthlyTotal {
            month,
            label: month.label(),
            amount,
            transaction_count,
        })
        .collect()
}

/// Expense totals per category, largest first
///
/// With `month` set only that month's expenses count; otherwise all of them.
pub fn category_breakdown(
    transactions: &[Transaction],
    month: Option<MonthKey>,
) -> Vec<CategoryShare> {
    let mut by_category: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for tx in transactions
        .iter()
        .filter(|t| t.is_expense() && month.map_or(true, |m| m.contains(t.date)))
    {
        let entry = by_category.entry(tx.category.as_str()).or_insert((0.0, 0));
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    let total: f64 = by_category.values().map(|(amount, _)| amount).sum();

    let mut shares: Vec<CategoryShare> = by_category
        .into_iter()
        .map(|(category, (amount, transaction_count))| CategoryShare {
            category: category.to_string(),
            amount,
            percentage: if total > 0.0 {
                amount / total * 100.0
            } else {
                0.0
            },
            transaction_count,
        })
        .collect();

    // BTreeMap order is by name, so the stable sort keeps ties alphabetical
    shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    shares
}
