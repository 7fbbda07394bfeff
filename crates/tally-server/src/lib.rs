//! Tally Web Server
//!
//! Axum-based REST API for the Tally expense tracker.
//!
//! Every response uses the same JSON envelope:
//! - success: `{"success": true, "data": ...}`
//! - failure: `{"success": false, "error": "..."}`
//!
//! Security features:
//! - Restrictive CORS policy (origins from config)
//! - Input validation (pagination limits, typed field parsing)
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{debug, error, info, warn};

use tally_core::db::Database;

mod handlers;

/// Default number of transactions returned by the list endpoint
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// `TALLY_ALLOWED_ORIGINS` is a comma-separated list of CORS origins.
    pub fn from_env() -> Self {
        let allowed_origins = std::env::var("TALLY_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_default();
        Self { allowed_origins }
    }
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
}

/// Successful response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

// ============================================================================
// Extractors
// ============================================================================

/// JSON body extractor whose rejections use the error envelope
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejections use the error envelope
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Path extractor whose rejections use the error envelope
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Create the application router
pub fn create_router(db: Database, static_dir: Option<&str>, config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        db,
        config: config.clone(),
    });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Transactions
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route(
            "/transactions/:id",
            get(handlers::get_transaction)
                .put(handlers::update_transaction)
                .delete(handlers::delete_transaction),
        )
        // Budgets
        .route(
            "/budgets",
            get(handlers::list_budgets).post(handlers::upsert_budget),
        )
        .route("/budgets/insights", get(handlers::budget_insights))
        // Analytics
        .route("/analytics", get(handlers::get_analytics))
        .route("/dashboard", get(handlers::get_dashboard));

    // Build CORS layer
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
    };

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
) -> anyhow::Result<()> {
    serve_with_config(db, host, port, static_dir, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    // Cached spend may be stale if the file was edited outside the server
    match db.refresh_all_budget_spent() {
        Ok(count) => debug!(budgets = count, "Refreshed cached budget spend"),
        Err(e) => warn!("Failed to refresh cached budget spend: {}", e),
    }

    if !config.allowed_origins.is_empty() {
        info!(origins = ?config.allowed_origins, "CORS origins configured");
    }

    let app = create_router(db, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    fn rejected(status: StatusCode, message: String) -> Self {
        debug!(status = %status, message = %message, "Rejected malformed request");
        Self {
            status,
            message,
            internal: None,
        }
    }

    /// Replace the client-facing message of a 500; 4xx messages are kept
    pub fn or_message(mut self, msg: &str) -> Self {
        if self.status == StatusCode::INTERNAL_SERVER_ERROR {
            self.message = msg.to_string();
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "success": false,
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        if let Some(r) = err.downcast_ref::<JsonRejection>() {
            return Self::rejected(r.status(), r.body_text());
        }
        if let Some(r) = err.downcast_ref::<QueryRejection>() {
            return Self::rejected(r.status(), r.body_text());
        }
        if let Some(r) = err.downcast_ref::<PathRejection>() {
            return Self::rejected(r.status(), r.body_text());
        }

        if let Some(core) = err.downcast_ref::<tally_core::Error>() {
            match core {
                tally_core::Error::MissingField(field) => {
                    debug!(field = %field, "Rejected request with missing field");
                    return Self::bad_request("Missing required fields");
                }
                tally_core::Error::InvalidData(msg) => return Self::bad_request(msg),
                tally_core::Error::NotFound(what) => {
                    return Self::not_found(&format!("{} not found", what))
                }
                _ => {}
            }
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

/// Attach an action-specific message to failures, e.g. "Failed to fetch budgets"
pub(crate) trait OrFail<T> {
    fn or_fail(self, msg: &str) -> Result<T, AppError>;
}

impl<T, E> OrFail<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn or_fail(self, msg: &str) -> Result<T, AppError> {
        self.map_err(|e| AppError::from(e).or_message(msg))
    }
}

#[cfg(test)]
mod tests;
