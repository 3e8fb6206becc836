//! Top Category rule - flags a single category dominating the month

use super::engine::{AnalysisContext, InsightRule};
use super::types::{format_percent, Insight, InsightKind, RuleId};

pub struct TopCategoryRule {
    /// Share of total spend above which the top category is reported (default 40%)
    min_share_percent: f64,
}

impl TopCategoryRule {
    pub fn new() -> Self {
        Self {
            min_share_percent: 40.0,
        }
    }
}

impl Default for TopCategoryRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightRule for TopCategoryRule {
    fn id(&self) -> RuleId {
        RuleId::TopCategory
    }

    fn name(&self) -> &'static str {
        "Top Category"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let total = ctx.current.total();
        let Some((category, amount)) = ctx.current.top() else {
            return vec![];
        };
        if total <= 0.0 {
            return vec![];
        }

        let share = amount / total * 100.0;
        if share <= self.min_share_percent {
            return vec![];
        }

        vec![Insight::new(
            InsightKind::Info,
            RuleId::TopCategory,
            "Top Spending Category",
            format!(
                "{} accounts for {}% of your spending this month",
                category,
                format_percent(share)
            ),
        )
        .with_category(category)
        .with_value(share)]
    }
}
