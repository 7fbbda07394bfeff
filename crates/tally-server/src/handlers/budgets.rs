//! Budget handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use super::resolve_month;
use crate::{ApiJson, ApiQuery, ApiResponse, AppError, AppState, OrFail};
use tally_core::input::{parse_category, require, validate_month, AmountInput};
use tally_core::models::{Budget, BudgetInsight, NewBudget};

/// Query parameters selecting a month
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    /// `YYYY-MM`, defaults to the current month
    pub month: Option<String>,
}

/// Create/update request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBody {
    pub category: Option<String>,
    pub monthly_budget: Option<AmountInput>,
    pub month: Option<String>,
}

impl BudgetBody {
    fn into_new_budget(self) -> tally_core::Result<NewBudget> {
        let category = require("category", self.category)?;
        let monthly_budget = require("monthlyBudget", self.monthly_budget)?;
        let month = require("month", self.month)?;

        Ok(NewBudget {
            category: parse_category(&category)?,
            monthly_budget: monthly_budget.budget_value()?,
            month: validate_month(&month)?,
        })
    }
}

/// GET /api/budgets - Budgets for a month, ordered by category
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<MonthQuery>,
) -> Result<Json<ApiResponse<Vec<Budget>>>, AppError> {
    let month = resolve_month(params.month.as_deref())?;
    let budgets = state
        .db
        .list_budgets(&month)
        .or_fail("Failed to fetch budgets")?;

    Ok(ApiResponse::ok(budgets))
}

/// POST /api/budgets - Create or update the budget for (category, month)
pub async fn upsert_budget(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<BudgetBody>,
) -> Result<Json<ApiResponse<Budget>>, AppError> {
    let new_budget = body.into_new_budget()?;
    let budget = state
        .db
        .upsert_budget(&new_budget)
        .or_fail("Failed to create/update budget")?;

    info!(
        category = %budget.category,
        month = %budget.month,
        amount = budget.monthly_budget,
        "Budget saved"
    );
    Ok(ApiResponse::ok(budget))
}

/// GET /api/budgets/insights - Budget-versus-actual for a month
pub async fn budget_insights(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<MonthQuery>,
) -> Result<Json<ApiResponse<Vec<BudgetInsight>>>, AppError> {
    let month = resolve_month(params.month.as_deref())?;
    let insights = state
        .db
        .budget_insights(&month)
        .or_fail("Failed to fetch budget insights")?;

    Ok(ApiResponse::ok(insights))
}
