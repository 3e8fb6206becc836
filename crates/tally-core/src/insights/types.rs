//! Core types for the insight engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an insight should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Over budget or spending climbing fast
    Warning,
    /// Close to the budget ceiling
    Caution,
    /// Comfortably under budget
    Success,
    /// Neutral observation
    Info,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Warning => "warning",
            InsightKind::Caution => "caution",
            InsightKind::Success => "success",
            InsightKind::Info => "info",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(InsightKind::Warning),
            "caution" => Ok(InsightKind::Caution),
            "success" => Ok(InsightKind::Success),
            "info" => Ok(InsightKind::Info),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// Which rule produced an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    BudgetThreshold,
    SpendingTrend,
    TopCategory,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::BudgetThreshold => "budget_threshold",
            RuleId::SpendingTrend => "spending_trend",
            RuleId::TopCategory => "top_category",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Render a percentage with one decimal for insight text
///
/// Exact ties round half away from zero, so 6.25 reads "6.3". Values that
/// only look like ties in decimal (0.15 is stored as 0.1499...) round by
/// their true binary value.
pub(crate) fn format_percent(value: f64) -> String {
    let scaled = value * 10.0;
    // zero residual means the multiplication was exact
    let residual = value.mul_add(10.0, -scaled);
    if residual == 0.0 && (scaled - scaled.trunc()).abs() == 0.5 {
        format!("{:.1}", scaled.round() / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

/// A single piece of advice about the analysed month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub rule: RuleId,
    pub title: String,
    pub description: String,
    /// Category the insight is about, if any
    pub category: Option<String>,
    /// The percentage quoted in the description, unrounded
    pub value: f64,
}

impl Insight {
    pub fn new(
        kind: InsightKind,
        rule: RuleId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            rule,
            title: title.into(),
            description: description.into(),
            category: None,
            value: 0.0,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }
}
