//! Insight engine - runs the rule set against one month of activity

use tracing::debug;

use crate::analytics::{month_expenses, CategoryTotals};
use crate::models::{Budget, Transaction};
use crate::month::MonthKey;

use super::types::{Insight, RuleId};
use super::{BudgetThresholdRule, SpendingTrendRule, TopCategoryRule};

/// Upper bound on the insights returned for one month
pub const MAX_INSIGHTS: usize = 6;

/// Pre-aggregated view of the month handed to every rule
pub struct AnalysisContext<'a> {
    pub month: MonthKey,
    /// Expense sums for `month`, in first-seen order
    pub(crate) current: CategoryTotals,
    /// Expense sums for the calendar month before `month`
    pub(crate) previous: CategoryTotals,
    /// Budgets belonging to `month`, in store order
    pub budgets: Vec<&'a Budget>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(transactions: &[Transaction], budgets: &'a [Budget], month: MonthKey) -> Self {
        Self {
            month,
            current: month_expenses(transactions, month),
            previous: month_expenses(transactions, month.previous()),
            budgets: budgets.iter().filter(|b| b.month == month).collect(),
        }
    }

    /// Expense total for a category in the analysed month
    pub fn spent(&self, category: &str) -> f64 {
        self.current.get(category)
    }

    /// Expense total for a category in the month before
    pub fn previous_spent(&self, category: &str) -> f64 {
        self.previous.get(category)
    }
}

/// A rule that turns the month's numbers into zero or more insights
pub trait InsightRule: Send + Sync {
    fn id(&self) -> RuleId;

    /// Human-readable name
    fn name(&self) -> &'static str;

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight>;
}

/// Ordered registry of insight rules
///
/// Rules run in registration order and their output is concatenated, then
/// cut at `MAX_INSIGHTS`. Earlier rules therefore win when the cap is hit.
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Engine with the built-in rules in priority order
    pub fn new() -> Self {
        let mut engine = Self { rules: vec![] };

        engine.register(Box::new(BudgetThresholdRule::new()));
        engine.register(Box::new(SpendingTrendRule::new()));
        engine.register(Box::new(TopCategoryRule::new()));

        engine
    }

    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    pub fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let mut all = vec![];

        for rule in &self.rules {
            let found = rule.evaluate(ctx);
            debug!(
                rule = rule.name(),
                id = %rule.id(),
                month = %ctx.month,
                count = found.len(),
                "Insight rule evaluated"
            );
            all.extend(found);
        }

        all.truncate(MAX_INSIGHTS);
        all
    }
}

/// Derive the insight list for a `YYYY-MM` month string
///
/// A malformed month key yields no insights.
pub fn derive_insights(
    transactions: &[Transaction],
    budgets: &[Budget],
    month: &str,
) -> Vec<Insight> {
    match month.parse::<MonthKey>() {
        Ok(key) => derive_insights_for_month(transactions, budgets, key),
        Err(e) => {
            debug!(month, error = %e, "Malformed month key, no insights");
            vec![]
        }
    }
}

pub fn derive_insights_for_month(
    transactions: &[Transaction],
    budgets: &[Budget],
    month: MonthKey,
) -> Vec<Insight> {
    let ctx = AnalysisContext::new(transactions, budgets, month);
    InsightEngine::new().analyze(&ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::*;
    use crate::insights::InsightKind;

    #[test]
    fn test_engine_rule_order() {
        let engine = InsightEngine::new();
        assert_eq!(
            engine.rule_ids(),
            vec![
                RuleId::BudgetThreshold,
                RuleId::SpendingTrend,
                RuleId::TopCategory
            ]
        );

        let names: Vec<&str> = engine.rules.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Budget Threshold", "Spending Trend", "Top Category"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(derive_insights(&[], &[], "2024-03").is_empty());
    }

    #[test]
    fn test_malformed_month() {
        let txs = vec![expense(1, 120.0, "Food", "2024-03-05")];
        let budgets = vec![budget(1, "Food", 100.0, "2024-03")];
        assert!(derive_insights(&txs, &budgets, "2024-3").is_empty());
        assert!(derive_insights(&txs, &budgets, "").is_empty());
    }

    #[test]
    fn test_budget_exceeded_scenario() {
        let txs = vec![expense(1, 120.0, "Food", "2024-03-05")];
        let budgets = vec![budget(1, "Food", 100.0, "2024-03")];

        let insights = derive_insights(&txs, &budgets, "2024-03");
        assert_eq!(insights[0].kind, InsightKind::Warning);
        assert_eq!(insights[0].title, "Budget Exceeded");
        assert_eq!(
            insights[0].description,
            "You've exceeded your Food budget by 20.0%"
        );
        // single category owns 100% of spend
        assert_eq!(insights[1].title, "Top Spending Category");
        assert_eq!(insights.len(), 2);
    }

    #[test]
    fn test_on_track_scenario() {
        let txs = vec![expense(1, 40.0, "Food", "2024-03-05")];
        let budgets = vec![budget(1, "Food", 100.0, "2024-03")];

        let insights = derive_insights(&txs, &budgets, "2024-03");
        assert_eq!(insights[0].kind, InsightKind::Success);
        assert_eq!(insights[0].title, "On Track");
        assert_eq!(
            insights[0].description,
            "Great job! You're only using 40.0% of your Food budget"
        );
    }

    #[test]
    fn test_no_budget_gives_no_budget_insight() {
        let txs = vec![expense(1, 50.0, "Food", "2024-03-05")];
        let insights = derive_insights(&txs, &[], "2024-03");
        assert!(insights.iter().all(|i| i.rule != RuleId::BudgetThreshold));
    }

    #[test]
    fn test_trend_increase_scenario() {
        let txs = vec![
            expense(1, 100.0, "Food", "2024-03-10"),
            expense(2, 50.0, "Food", "2024-02-10"),
        ];

        let insights = derive_insights(&txs, &[], "2024-03");
        assert_eq!(insights[0].kind, InsightKind::Warning);
        assert_eq!(insights[0].title, "Food Spending Increased");
        assert_eq!(insights[0].description, "100.0% increase from last month");
    }

    #[test]
    fn test_category_can_have_budget_and_trend_insights() {
        let txs = vec![
            expense(1, 120.0, "Food", "2024-03-10"),
            expense(2, 60.0, "Food", "2024-02-10"),
        ];
        let budgets = vec![budget(1, "Food", 100.0, "2024-03")];

        let insights = derive_insights(&txs, &budgets, "2024-03");
        let rules: Vec<RuleId> = insights.iter().map(|i| i.rule).collect();
        assert_eq!(
            rules,
            vec![
                RuleId::BudgetThreshold,
                RuleId::SpendingTrend,
                RuleId::TopCategory
            ]
        );
        assert!(insights
            .iter()
            .all(|i| i.category.as_deref() == Some("Food")));
    }

    #[test]
    fn test_capped_at_six_keeping_earliest_rules() {
        let categories = ["A", "B", "C", "D", "E", "F", "G"];
        let mut txs = vec![];
        let mut budgets = vec![];
        for (i, category) in categories.iter().enumerate() {
            let id = i as i64;
            txs.push(expense(id, 200.0, category, "2024-03-10"));
            txs.push(expense(100 + id, 50.0, category, "2024-02-10"));
            budgets.push(budget(id, category, 100.0, "2024-03"));
        }

        let insights = derive_insights(&txs, &budgets, "2024-03");
        assert_eq!(insights.len(), MAX_INSIGHTS);
        assert!(insights.iter().all(|i| i.rule == RuleId::BudgetThreshold));
        let cats: Vec<&str> = insights
            .iter()
            .filter_map(|i| i.category.as_deref())
            .collect();
        assert_eq!(cats, vec!["A", "B", "C", "D", "E", "F"]);
    }

    #[test]
    fn test_never_more_than_six() {
        for n in 0..12 {
            let mut txs = vec![];
            let mut budgets = vec![];
            for i in 0..n {
                let category = format!("Cat{}", i);
                txs.push(expense(i, 10.0 + i as f64, &category, "2024-03-03"));
                txs.push(expense(50 + i, 1.0, &category, "2024-02-03"));
                budgets.push(budget(i, &category, 5.0 * (i + 1) as f64, "2024-03"));
            }
            assert!(derive_insights(&txs, &budgets, "2024-03").len() <= MAX_INSIGHTS);
        }
    }

    #[test]
    fn test_other_months_ignored() {
        let txs = vec![expense(1, 120.0, "Food", "2024-04-01")];
        let budgets = vec![budget(1, "Food", 100.0, "2024-04")];
        assert!(derive_insights(&txs, &budgets, "2024-03").is_empty());
    }
}
