//! Spending Trend rule
//!
//! Compares each category's spend this month against the previous calendar
//! month and reports swings larger than the threshold. Categories with no
//! spend last month have no baseline and are skipped.

use super::engine::{AnalysisContext, InsightRule};
use super::types::{format_percent, Insight, InsightKind, RuleId};

pub struct SpendingTrendRule {
    /// Minimum absolute percent change to report (default 20%)
    min_percent_change: f64,
}

impl SpendingTrendRule {
    pub fn new() -> Self {
        Self {
            min_percent_change: 20.0,
        }
    }
}

impl Default for SpendingTrendRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightRule for SpendingTrendRule {
    fn id(&self) -> RuleId {
        RuleId::SpendingTrend
    }

    fn name(&self) -> &'static str {
        "Spending Trend"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let mut insights = Vec::new();

        for (category, current) in ctx.current.iter() {
            let previous = ctx.previous_spent(category);
            if previous <= 0.0 {
                continue;
            }

            let change = (current - previous) / previous * 100.0;
            if change.abs() <= self.min_percent_change {
                continue;
            }

            let (kind, direction, noun) = if change > 0.0 {
                (InsightKind::Warning, "Increased", "increase")
            } else {
                (InsightKind::Info, "Decreased", "decrease")
            };

            insights.push(
                Insight::new(
                    kind,
                    RuleId::SpendingTrend,
                    format!("{} Spending {}", category, direction),
                    format!("{}% {} from last month", format_percent(change.abs()), noun),
                )
                .with_category(category)
                .with_value(change),
            );
        }

        insights
    }
}
