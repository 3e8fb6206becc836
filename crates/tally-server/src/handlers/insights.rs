//! Insight handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::debug;

use super::MonthQuery;
use crate::{AppError, AppState};
use tally_core::Insight;

/// GET /api/insights?month=YYYY-MM - At most six insights for the month
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<Vec<Insight>>, AppError> {
    let month = params.resolve()?;
    let insights = state.db.insights(month)?;
    debug!(month = %month, count = insights.len(), "Insights derived");
    Ok(Json(insights))
}
