//! Reports built from a fresh snapshot of the store
//!
//! Each call reads the full transaction and budget lists and hands them to
//! the pure functions in `analytics` and `insights`.

use tracing::debug;

use super::Database;
use crate::analytics::{
    aggregate_month, category_breakdown, dashboard_summary, monthly_expenses, BudgetComparison,
    CategoryShare, DashboardSummary, MonthlyTotal,
};
use crate::error::Result;
use crate::insights::{derive_insights_for_month, Insight};
use crate::models::{Budget, Transaction};
use crate::month::MonthKey;

impl Database {
    /// Read every transaction and budget in one go
    pub fn snapshot(&self) -> Result<(Vec<Transaction>, Vec<Budget>)> {
        let transactions = self.list_transactions()?;
        let budgets = self.list_budgets(None)?;
        debug!(
            transactions = transactions.len(),
            budgets = budgets.len(),
            "Loaded report snapshot"
        );
        Ok((transactions, budgets))
    }

    pub fn budget_comparison(&self, month: MonthKey) -> Result<BudgetComparison> {
        let (transactions, budgets) = self.snapshot()?;
        Ok(aggregate_month(&transactions, &budgets, month))
    }

    pub fn insights(&self, month: MonthKey) -> Result<Vec<Insight>> {
        let (transactions, budgets) = self.snapshot()?;
        Ok(derive_insights_for_month(&transactions, &budgets, month))
    }

    pub fn dashboard(&self, month: MonthKey) -> Result<DashboardSummary> {
        let transactions = self.list_transactions()?;
        Ok(dashboard_summary(&transactions, month))
    }

    pub fn monthly_expenses(&self, limit: usize) -> Result<Vec<MonthlyTotal>> {
        let transactions = self.list_transactions()?;
        Ok(monthly_expenses(&transactions, limit))
    }

    pub fn category_breakdown(&self, month: Option<MonthKey>) -> Result<Vec<CategoryShare>> {
        let transactions = self.list_transactions()?;
        Ok(category_breakdown(&transactions, month))
    }
}
