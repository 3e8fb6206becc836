//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance dashboard:
//! - Domain models for transactions and monthly budgets
//! - Month keys (`YYYY-MM`) used to bucket transactions
//! - Pure analytics: budget comparison, dashboard summary, trends, breakdowns
//! - Insight rule engine producing advisory messages
//! - Database access and migrations
//! - CSV import/export of transactions
//! - Configuration file loading

pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod insights;
pub mod models;
pub mod month;

pub use analytics::{
    aggregate, aggregate_month, category_breakdown, dashboard_summary, monthly_expenses,
    BudgetComparison, CategoryShare, CategorySpend, DashboardSummary, MonthlyTotal, TopCategory,
};
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use insights::{derive_insights, Insight, InsightEngine, InsightKind, MAX_INSIGHTS};
pub use month::MonthKey;
