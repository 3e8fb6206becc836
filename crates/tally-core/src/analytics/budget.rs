//! Budget-vs-actual comparison for one month

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::month_expenses;
use crate::models::{Budget, Transaction};
use crate::month::MonthKey;

/// Spending against budget for one category in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: String,
    /// Sum of expense amounts in the month
    pub spent: f64,
    /// Budget ceiling, 0 when no budget is set
    pub budget_amount: f64,
    /// `max(0, budget_amount - spent)`
    pub remaining: f64,
    /// `max(0, spent - budget_amount)`
    pub over: f64,
    /// `spent / budget_amount * 100`, or 0 without a budget.
    /// Only meaningful when `has_budget()` is true.
    pub percentage: f64,
}

impl CategorySpend {
    pub fn new(category: impl Into<String>, spent: f64, budget_amount: f64) -> Self {
        let percentage = if budget_amount > 0.0 {
            spent / budget_amount * 100.0
        } else {
            0.0
        };

        Self {
            category: category.into(),
            spent,
            budget_amount,
            remaining: (budget_amount - spent).max(0.0),
            over: (spent - budget_amount).max(0.0),
            percentage,
        }
    }

    pub fn has_budget(&self) -> bool {
        self.budget_amount > 0.0
    }
}

/// Per-category budget comparison table for a month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetComparison {
    /// Month analysed; None when the requested key was malformed
    pub month: Option<MonthKey>,
    /// Expense categories in first-seen order, then budget-only categories
    pub categories: Vec<CategorySpend>,
}

impl BudgetComparison {
    pub fn get(&self, category: &str) -> Option<&CategorySpend> {
        self.categories.iter().find(|c| c.category == category)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn total_spent(&self) -> f64 {
        self.categories.iter().map(|c| c.spent).sum()
    }

    pub fn total_budget(&self) -> f64 {
        self.categories.iter().map(|c| c.budget_amount).sum()
    }
}

/// Build the budget comparison for a `YYYY-MM` month string
///
/// A malformed month key produces an empty comparison rather than an error;
/// callers that want to reject bad input should parse a `MonthKey` first.
pub fn aggregate(
    transactions: &[Transaction],
    budgets: &[Budget],
    month: &str,
) -> BudgetComparison {
    match month.parse::<MonthKey>() {
        Ok(key) => aggregate_month(transactions, budgets, key),
        Err(e) => {
            debug!(month, error = %e, "Malformed month key, returning empty comparison");
            BudgetComparison::default()
        }
    }
}

/// Build the budget comparison for an already-parsed month
pub fn aggregate_month(
    transactions: &[Transaction],
    budgets: &[Budget],
    month: MonthKey,
) -> BudgetComparison {
    let spent = month_expenses(transactions, month);
    let month_budgets: Vec<&Budget> = budgets.iter().filter(|b| b.month == month).collect();

    // First match wins if the store ever holds two budgets for one key
    let budget_for = |category: &str| -> f64 {
        month_budgets
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.amount)
            .unwrap_or(0.0)
    };

    let mut categories: Vec<CategorySpend> = spent
        .iter()
        .map(|(category, amount)| CategorySpend::new(category, amount, budget_for(category)))
        .collect();

    for budget in &month_budgets {
        if spent.contains(&budget.category)
            || categories.iter().any(|c| c.category == budget.category)
        {
            continue;
        }
        categories.push(CategorySpend::new(&budget.category, 0.0, budget.amount));
    }

    categories.retain(|c| c.spent > 0.0 || c.budget_amount > 0.0);

    BudgetComparison {
        month: Some(month),
        categories,
    }
}
