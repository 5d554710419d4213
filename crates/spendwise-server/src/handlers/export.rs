//! Report export handler

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Response, StatusCode},
};
use serde::Deserialize;
use tracing::info;

use crate::{AppError, AppState, AUDIT_ACTOR};
use spendwise_core::{export, ExportFormat};

/// Query parameters for report export
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// Output format (default: csv)
    pub format: Option<String>,
}

/// GET /api/export - Current records as a CSV or JSON report
pub async fn export_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportQuery>,
) -> Result<Response<Body>, AppError> {
    let format = match params.format.as_deref() {
        Some(raw) => raw
            .parse::<ExportFormat>()
            .map_err(AppError::from_core)?,
        None => ExportFormat::default(),
    };

    let records = state.db.list_expenses()?;
    let body = export::render(&records, &state.config, format)?;

    state.db.log_audit(
        AUDIT_ACTOR,
        "export",
        Some("expense"),
        None,
        Some(&format!("format={}, rows={}", format, records.len())),
    )?;

    info!(%format, rows = records.len(), "Exported report");

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, format.content_type())
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"spendwise-report.{}\"",
                format.extension()
            ),
        )
        .body(Body::from(body))?;

    Ok(response)
}
