//! Analytics and dashboard handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::debug;

use super::{budgets::MonthQuery, non_empty, resolve_month};
use crate::{ApiQuery, ApiResponse, AppError, AppState, OrFail};
use tally_core::models::{AnalyticsReport, Dashboard};

/// GET /api/analytics - Monthly trend plus category breakdown
///
/// `month` narrows only the category breakdown; the monthly trend always
/// covers every transaction.
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<MonthQuery>,
) -> Result<Json<ApiResponse<AnalyticsReport>>, AppError> {
    let month = non_empty(params.month.as_deref());
    let report = state
        .db
        .analytics(month)
        .or_fail("Failed to fetch analytics data")?;

    debug!(
        month = ?month,
        categories = report.category_expenses.len(),
        "Served analytics"
    );
    Ok(ApiResponse::ok(report))
}

/// GET /api/dashboard - Stats, charts and recent activity for a month
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<MonthQuery>,
) -> Result<Json<ApiResponse<Dashboard>>, AppError> {
    let month = resolve_month(params.month.as_deref())?;
    let dashboard = state
        .db
        .dashboard(&month)
        .or_fail("Failed to fetch dashboard")?;

    Ok(ApiResponse::ok(dashboard))
}
