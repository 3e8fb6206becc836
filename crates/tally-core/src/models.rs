//! Domain models for Tally

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::month::MonthKey;

/// Suggested categories offered by the dashboard. Any other string is
/// accepted as a category too.
pub const CATEGORIES: [&str; 10] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Education",
    "Travel",
    "Groceries",
    "Other",
];

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// Always positive; the direction comes from `kind`
    pub amount: f64,
    pub description: String,
    pub category: String,
    /// UTC calendar date
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Month bucket this transaction belongs to
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

/// A transaction to be inserted or used as a full replacement on update
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    /// Set for CSV imports so the same row is never stored twice
    pub import_hash: Option<String>,
}

impl NewTransaction {
    pub fn new(
        amount: f64,
        description: impl Into<String>,
        category: impl Into<String>,
        date: NaiveDate,
        kind: TransactionKind,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            category: category.into(),
            date,
            kind,
            import_hash: None,
        }
    }

    /// Check field constraints before the row reaches the database
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Amount must be a positive number, got {}",
                self.amount
            )));
        }
        if self.description.trim().is_empty() {
            return Err(Error::InvalidData("Description is required".into()));
        }
        if self.category.trim().is_empty() {
            return Err(Error::InvalidData("Category is required".into()));
        }
        Ok(())
    }
}

/// A spending ceiling for one category in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub amount: f64,
    pub month: MonthKey,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A budget to be upserted by (category, month)
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category: String,
    pub amount: f64,
    pub month: MonthKey,
}

impl NewBudget {
    pub fn new(category: impl Into<String>, amount: f64, month: MonthKey) -> Self {
        Self {
            category: category.into(),
            amount,
            month,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Budget amount must be a positive number, got {}",
                self.amount
            )));
        }
        if self.category.trim().is_empty() {
            return Err(Error::InvalidData("Category is required".into()));
        }
        Ok(())
    }
}

/// Parse a transaction date
///
/// Accepts a plain `YYYY-MM-DD` date or an RFC 3339 timestamp. Timestamps are
/// converted to UTC before the calendar date is taken, so month bucketing
/// never depends on the server's local timezone.
pub fn parse_transaction_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| {
            Error::InvalidData(format!(
                "Invalid date (use YYYY-MM-DD or RFC 3339): {}",
                s
            ))
        })
}
