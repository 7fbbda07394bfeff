//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

use axum::Json;
use chrono::Utc;

use crate::AppError;
use tally_core::analytics::month_key_of;
use tally_core::input::validate_month;

pub mod analytics;
pub mod budgets;
pub mod transactions;

// Re-export all handlers for use in router
pub use analytics::*;
pub use budgets::*;
pub use transactions::*;

/// GET /api/health - Liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Treat a blank query parameter as absent
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Validated `YYYY-MM` from a query parameter, or the current month
pub(crate) fn resolve_month(value: Option<&str>) -> Result<String, AppError> {
    match non_empty(value) {
        Some(month) => Ok(validate_month(month)?),
        None => Ok(month_key_of(Utc::now().date_naive())),
    }
}
