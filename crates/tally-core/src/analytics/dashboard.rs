//! Summary cards for the dashboard landing page

use serde::{Deserialize, Serialize};

use super::month_expenses;
use crate::models::{Transaction, TransactionKind};
use crate::month::MonthKey;

/// Number of recent transactions included in the summary
pub const RECENT_TRANSACTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCategory {
    pub category: String,
    pub amount: f64,
}

/// Income/expense totals for a month plus the latest activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub month: MonthKey,
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_income: f64,
    /// Income and expense transactions dated in the month
    pub transaction_count: usize,
    pub top_category: Option<TopCategory>,
    /// Most recent transactions across all months, newest first
    pub recent_transactions: Vec<Transaction>,
}

pub fn dashboard_summary(transactions: &[Transaction], month: MonthKey) -> DashboardSummary {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut transaction_count = 0;

    for tx in transactions.iter().filter(|t| month.contains(t.date)) {
        transaction_count += 1;
        match tx.kind {
            TransactionKind::Income => total_income += tx.amount,
            TransactionKind::Expense => total_expenses += tx.amount,
        }
    }

    let top_category = month_expenses(transactions, month)
        .top()
        .map(|(category, amount)| TopCategory {
            category: category.to_string(),
            amount,
        });

    let mut recent: Vec<&Transaction> = transactions.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    let recent_transactions = recent
        .into_iter()
        .take(RECENT_TRANSACTIONS)
        .cloned()
        .collect();

    DashboardSummary {
        month,
        total_income,
        total_expenses,
        net_income: total_income - total_expenses,
        transaction_count,
        top_category,
        recent_transactions,
    }
}
