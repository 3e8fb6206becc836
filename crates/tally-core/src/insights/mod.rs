//! Insight engine - short advice derived from a month of spending
//!
//! Rules run in a fixed priority order over an `AnalysisContext` that holds
//! the analysed month's per-category spend, the previous month's spend and
//! the month's budgets. Their output is concatenated and capped at
//! `MAX_INSIGHTS`.
//!
//! ## Built-in rules
//!
//! - **Budget Threshold** - exceeded, nearly used up, or comfortably under
//! - **Spending Trend** - month-over-month swings beyond 20%
//! - **Top Category** - one category taking over 40% of the month's spend
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::insights::derive_insights;
//!
//! let insights = derive_insights(&transactions, &budgets, "2024-03");
//! for insight in &insights {
//!     println!("[{}] {}: {}", insight.kind, insight.title, insight.description);
//! }
//! ```

pub mod budget_threshold;
pub mod engine;
pub mod spending_trend;
pub mod top_category;
pub mod types;

pub use budget_threshold::BudgetThresholdRule;
pub use engine::{
    derive_insights, derive_insights_for_month, AnalysisContext, InsightEngine, InsightRule,
    MAX_INSIGHTS,
};
pub use spending_trend::SpendingTrendRule;
pub use top_category::TopCategoryRule;
pub use types::{Insight, InsightKind, RuleId};
