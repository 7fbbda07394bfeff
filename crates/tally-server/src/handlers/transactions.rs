//! Transaction handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use super::non_empty;
use crate::{
    ApiJson, ApiPath, ApiQuery, ApiResponse, AppError, AppState, OrFail, DEFAULT_PAGE_LIMIT,
    MAX_PAGE_LIMIT,
};
use tally_core::input::{parse_category, require, validate_date, AmountInput};
use tally_core::models::{NewTransaction, Transaction};

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Filter by category name
    pub category: Option<String>,
    /// Filter by date prefix (usually `YYYY-MM`)
    pub month: Option<String>,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

/// Create/replace request body. Every field is required.
#[derive(Debug, Deserialize)]
pub struct TransactionBody {
    pub amount: Option<AmountInput>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl TransactionBody {
    /// Check presence of every field first, then parse each one
    fn into_new_transaction(self) -> tally_core::Result<NewTransaction> {
        let amount = require("amount", self.amount)?;
        let date = require("date", self.date)?;
        let description = require("description", self.description)?;
        let category = require("category", self.category)?;

        Ok(NewTransaction {
            amount: amount.value()?,
            date: validate_date(&date)?,
            description: description.trim().to_string(),
            category: parse_category(&category)?,
        })
    }
}

/// GET /api/transactions - List transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<TransactionQuery>,
) -> Result<Json<ApiResponse<Vec<Transaction>>>, AppError> {
    // Input validation: clamp pagination parameters
    let limit = params.limit.clamp(1, MAX_PAGE_LIMIT);

    let category = non_empty(params.category.as_deref())
        .map(parse_category)
        .transpose()?;
    let month = non_empty(params.month.as_deref());

    let transactions = state
        .db
        .search_transactions(category, month, Some(limit))
        .or_fail("Failed to fetch transactions")?;

    Ok(ApiResponse::ok(transactions))
}

/// POST /api/transactions - Record a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<TransactionBody>,
) -> Result<Json<ApiResponse<Transaction>>, AppError> {
    let new_tx = body.into_new_transaction()?;
    let transaction = state
        .db
        .insert_transaction(&new_tx)
        .or_fail("Failed to create transaction")?;

    info!(
        id = transaction.id,
        category = %transaction.category,
        amount = transaction.amount,
        "Transaction created"
    );
    Ok(ApiResponse::ok(transaction))
}

/// GET /api/transactions/:id - Get a single transaction
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<Transaction>>, AppError> {
    let transaction = state
        .db
        .get_transaction(id)
        .or_fail("Failed to fetch transaction")?
        .ok_or_else(|| AppError::not_found("Transaction not found"))?;

    Ok(ApiResponse::ok(transaction))
}

/// PUT /api/transactions/:id - Replace a transaction's fields
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<TransactionBody>,
) -> Result<Json<ApiResponse<Transaction>>, AppError> {
    let new_tx = body.into_new_transaction()?;
    let transaction = state
        .db
        .update_transaction(id, &new_tx)
        .or_fail("Failed to update transaction")?;

    info!(id, "Transaction updated");
    Ok(ApiResponse::ok(transaction))
}

/// DELETE /api/transactions/:id - Delete a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    state
        .db
        .delete_transaction(id)
        .or_fail("Failed to delete transaction")?;

    info!(id, "Transaction deleted");
    Ok(ApiResponse::ok(serde_json::json!({ "id": id })))
}
