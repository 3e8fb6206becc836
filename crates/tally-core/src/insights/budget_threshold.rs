//! Budget Threshold rule
//!
//! One insight per budget in the analysed month, depending on how much of it
//! has been spent. Usage between the caution and on-track lines is not
//! reported.

use super::engine::{AnalysisContext, InsightRule};
use super::types::{format_percent, Insight, InsightKind, RuleId};

pub struct BudgetThresholdRule {
    /// Usage above this percentage is a caution (default 80%)
    caution_percent: f64,
    /// Usage below this percentage is on track (default 50%)
    on_track_percent: f64,
}

impl BudgetThresholdRule {
    pub fn new() -> Self {
        Self {
            caution_percent: 80.0,
            on_track_percent: 50.0,
        }
    }
}

impl Default for BudgetThresholdRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightRule for BudgetThresholdRule {
    fn id(&self) -> RuleId {
        RuleId::BudgetThreshold
    }

    fn name(&self) -> &'static str {
        "Budget Threshold"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let mut insights = Vec::new();

        for budget in &ctx.budgets {
            // zero budgets have no meaningful percentage
            if budget.amount <= 0.0 {
                continue;
            }

            let spent = ctx.spent(&budget.category);
            let percentage = spent / budget.amount * 100.0;

            let insight = if percentage > 100.0 {
                let over = (spent - budget.amount) / budget.amount * 100.0;
                Insight::new(
                    InsightKind::Warning,
                    RuleId::BudgetThreshold,
                    "Budget Exceeded",
                    format!(
                        "You've exceeded your {} budget by {}%",
                        budget.category,
                        format_percent(over)
                    ),
                )
                .with_value(over)
            } else if percentage > self.caution_percent {
                Insight::new(
                    InsightKind::Caution,
                    RuleId::BudgetThreshold,
                    "Budget Alert",
                    format!(
                        "You've used {}% of your {} budget",
                        format_percent(percentage),
                        budget.category
                    ),
                )
                .with_value(percentage)
            } else if percentage < self.on_track_percent {
                Insight::new(
                    InsightKind::Success,
                    RuleId::BudgetThreshold,
                    "On Track",
                    format!(
                        "Great job! You're only using {}% of your {} budget",
                        format_percent(percentage),
                        budget.category
                    ),
                )
                .with_value(percentage)
            } else {
                continue;
            };

            insights.push(insight.with_category(&budget.category));
        }

        insights
    }
}
