//! Budget handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use super::{required, AmountInput, MonthQuery};
use crate::{AppError, AppState, SuccessResponse};
use tally_core::models::{Budget, NewBudget};
use tally_core::MonthKey;

/// Body for setting a budget
#[derive(Debug, Deserialize)]
pub struct BudgetRequest {
    pub category: Option<String>,
    pub amount: Option<AmountInput>,
    /// YYYY-MM
    pub month: Option<String>,
}

/// GET /api/budgets?month=YYYY-MM - All budgets, or one month's
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<Vec<Budget>>, AppError> {
    let month = params.parse()?;
    let budgets = state.db.list_budgets(month)?;
    Ok(Json(budgets))
}

/// POST /api/budgets - Create or overwrite the budget for (category, month)
pub async fn upsert_budget(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BudgetRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let amount = req
        .amount
        .filter(|a| !a.is_blank())
        .ok_or_else(|| AppError::bad_request("Missing required fields"))?;
    let category = required(req.category)?;
    let month = required(req.month)?;

    let amount = amount.to_amount()?;
    let month: MonthKey = month
        .trim()
        .parse()
        .map_err(|_| AppError::bad_request(&format!("Invalid month (use YYYY-MM): {}", month)))?;

    let budget = state
        .db
        .upsert_budget(&NewBudget::new(category, amount, month))
        .map_err(AppError::from_core)?;

    info!(
        id = budget.id,
        category = %budget.category,
        month = %budget.month,
        amount = budget.amount,
        "Budget saved"
    );
    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/budgets/:id
pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.db.delete_budget(id)? {
        return Err(AppError::not_found("Budget not found"));
    }

    info!(id, "Budget deleted");
    Ok(Json(SuccessResponse { success: true }))
}
