//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod budgets;
pub mod insights;
pub mod meta;
pub mod reports;
pub mod transactions;

// Re-export all handlers for use in router
pub use budgets::*;
pub use insights::*;
pub use meta::*;
pub use reports::*;
pub use transactions::*;

use serde::Deserialize;
use tally_core::MonthKey;

use crate::AppError;

/// Query string carrying an optional `YYYY-MM` month
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

impl MonthQuery {
    /// The requested month, or the current UTC month when absent
    pub fn resolve(&self) -> Result<MonthKey, AppError> {
        Ok(self.parse()?.unwrap_or_else(MonthKey::current))
    }

    /// The requested month, None when absent
    pub fn parse(&self) -> Result<Option<MonthKey>, AppError> {
        match self.month.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse::<MonthKey>().map(Some).map_err(|_| {
                AppError::bad_request(&format!("Invalid month (use YYYY-MM): {}", raw))
            }),
        }
    }
}

/// An amount posted either as a JSON number or a numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    pub fn is_blank(&self) -> bool {
        matches!(self, AmountInput::Text(s) if s.trim().is_empty())
    }

    pub fn to_amount(&self) -> Result<f64, AppError> {
        let amount = match self {
            AmountInput::Number(n) => *n,
            AmountInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| AppError::bad_request(&format!("Invalid amount: {}", s)))?,
        };

        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::bad_request("Amount must be a positive number"));
        }
        Ok(amount)
    }
}

/// Unwrap a required text field, rejecting missing or blank values
pub(crate) fn required(field: Option<String>) -> Result<String, AppError> {
    field
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("Missing required fields"))
}
