//! Spendwise Web Server
//!
//! Axum-based REST API for the Spendwise expense tracker.
//!
//! - Expense create/list/delete, with `Auto` categorization on create
//! - Budget summary and donut chart data
//! - Live snapshot stream over server-sent events
//! - CSV/JSON report export
//! - Restrictive CORS policy, security headers, sanitized error responses

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info};

use spendwise_core::{AppConfig, Database};

mod feed;
mod handlers;

pub use feed::{LiveFeed, LiveSnapshot};

/// Maximum audit log page size
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Actor name recorded in the audit log for API writes
const AUDIT_ACTOR: &str = "api";

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: AppConfig,
    pub feed: LiveFeed,
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
///
/// Seeds the live feed from the database, so this fails if the initial
/// read fails.
pub fn create_router(
    db: Database,
    config: AppConfig,
    static_dir: Option<&str>,
    server_config: ServerConfig,
) -> anyhow::Result<Router> {
    let feed = LiveFeed::load(&db, config.budget_limit)?;
    let state = Arc::new(AppState { db, config, feed });

    let api_routes = Router::new()
        // Expenses
        .route(
            "/expenses",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route("/expenses/:id", delete(handlers::delete_expense))
        // Budget summary and chart
        .route("/summary", get(handlers::get_summary))
        // Live snapshots
        .route("/events", get(handlers::event_stream))
        // Report export
        .route("/export", get(handlers::export_report))
        // Categorizer preview and settings
        .route("/categorize", get(handlers::preview_category))
        .route("/config", get(handlers::get_config))
        // Audit
        .route("/audit", get(handlers::list_audit_log));

    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];
    let cors = if server_config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = server_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
    };

    // CSP: same-origin scripts and event streams, inline styles for the page
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; frame-ancestors 'none'",
    );

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
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve the expense page if a static directory is provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    Ok(app)
}

/// Start the server
pub async fn serve(
    db: Database,
    config: AppConfig,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
) -> anyhow::Result<()> {
    serve_with_config(db, config, host, port, static_dir, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    config: AppConfig,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    server_config: ServerConfig,
) -> anyhow::Result<()> {
    info!(
        budget_limit = %config.budget_limit,
        rules = config.rules.len(),
        "Budget and category rules loaded"
    );

    let app = create_router(db, config, static_dir, server_config)?;
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

    /// Map a core error, surfacing validation failures to the client
    pub fn from_core(err: spendwise_core::Error) -> Self {
        match err {
            spendwise_core::Error::InvalidData(msg) => Self::bad_request(&msg),
            spendwise_core::Error::NotFound(msg) => Self::not_found(&msg),
            other => other.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
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
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
