//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use super::{required, AmountInput};
use crate::{AppError, AppState, SuccessResponse};
use tally_core::export::ImportStats;
use tally_core::models::{parse_transaction_date, NewTransaction, Transaction, TransactionKind};

/// Body for creating or replacing a transaction
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub amount: Option<AmountInput>,
    pub description: Option<String>,
    pub category: Option<String>,
    /// YYYY-MM-DD or RFC 3339
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl TransactionRequest {
    fn into_new_transaction(self) -> Result<NewTransaction, AppError> {
        let amount = self
            .amount
            .filter(|a| !a.is_blank())
            .ok_or_else(|| AppError::bad_request("Missing required fields"))?;
        let description = required(self.description)?;
        let category = required(self.category)?;
        let date = required(self.date)?;
        let kind = required(self.kind)?;

        let amount = amount.to_amount()?;
        let date = parse_transaction_date(&date).map_err(AppError::from_core)?;
        let kind: TransactionKind = kind
            .parse()
            .map_err(|_| AppError::bad_request("Type must be 'income' or 'expense'"))?;

        let tx = NewTransaction::new(amount, description, category, date, kind);
        tx.validate().map_err(AppError::from_core)?;
        Ok(tx)
    }
}

/// GET /api/transactions - All transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let transactions = state.db.list_transactions()?;
    Ok(Json(transactions))
}

/// GET /api/transactions/:id
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Transaction>, AppError> {
    let tx = state
        .db
        .get_transaction(id)?
        .ok_or_else(|| AppError::not_found("Transaction not found"))?;
    Ok(Json(tx))
}

/// POST /api/transactions - Record a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransactionRequest>,
) -> Result<Json<Transaction>, AppError> {
    let new_tx = req.into_new_transaction()?;
    let tx = state
        .db
        .insert_transaction(&new_tx)
        .map_err(AppError::from_core)?;

    info!(id = tx.id, kind = %tx.kind, category = %tx.category, "Transaction created");
    Ok(Json(tx))
}

/// PUT /api/transactions/:id - Replace a transaction's fields
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<TransactionRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let new_tx = req.into_new_transaction()?;

    let updated = state
        .db
        .update_transaction(id, &new_tx)
        .map_err(AppError::from_core)?;
    if !updated {
        return Err(AppError::not_found("Transaction not found"));
    }

    info!(id, "Transaction updated");
    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/transactions/:id
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.db.delete_transaction(id)? {
        return Err(AppError::not_found("Transaction not found"));
    }

    info!(id, "Transaction deleted");
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/export/transactions - CSV download
pub async fn export_transactions(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let csv = state.db.export_transactions_csv()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"transactions.csv\"",
            ),
        ],
        csv,
    ))
}

/// POST /api/import/transactions - CSV body, duplicates skipped
pub async fn import_transactions(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<ImportStats>, AppError> {
    if body.trim().is_empty() {
        return Err(AppError::bad_request("Empty CSV body"));
    }

    let stats = state
        .db
        .import_transactions_csv(body.as_bytes())
        .map_err(AppError::from_core)?;
    Ok(Json(stats))
}
