//! Report handlers
//!
//! Every report reads a fresh snapshot of the store and runs the pure
//! analytics over it. The month defaults to the current UTC month here,
//! never in the core.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::MonthQuery;
use crate::{AppError, AppState, MAX_TREND_MONTHS};
use tally_core::{BudgetComparison, CategoryShare, DashboardSummary, MonthlyTotal};

/// GET /api/dashboard?month=YYYY-MM - Summary cards
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<DashboardSummary>, AppError> {
    let month = params.resolve()?;
    Ok(Json(state.db.dashboard(month)?))
}

/// GET /api/reports/budget-comparison?month=YYYY-MM
pub async fn get_budget_comparison(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<BudgetComparison>, AppError> {
    let month = params.resolve()?;
    Ok(Json(state.db.budget_comparison(month)?))
}

#[derive(Debug, Deserialize)]
pub struct MonthlyExpensesQuery {
    pub months: Option<usize>,
}

/// GET /api/reports/monthly-expenses?months=6
pub async fn get_monthly_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthlyExpensesQuery>,
) -> Result<Json<Vec<MonthlyTotal>>, AppError> {
    let months = params.months.unwrap_or(state.config.trend_months);
    if months == 0 || months > MAX_TREND_MONTHS {
        return Err(AppError::bad_request(&format!(
            "months must be between 1 and {}",
            MAX_TREND_MONTHS
        )));
    }

    Ok(Json(state.db.monthly_expenses(months)?))
}

/// GET /api/reports/categories?month=YYYY-MM - All time when month is omitted
pub async fn get_category_breakdown(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<Vec<CategoryShare>>, AppError> {
    let month = params.parse()?;
    Ok(Json(state.db.category_breakdown(month)?))
}
