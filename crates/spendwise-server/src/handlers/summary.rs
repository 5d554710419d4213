//! Budget summary and settings handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppState, LiveSnapshot};
use spendwise_core::{AppConfig, DonutChart, Summary};

/// Summary plus display-ready strings
#[derive(Serialize)]
pub struct SummaryResponse {
    pub version: u64,
    pub summary: Summary,
    pub chart: DonutChart,
    pub formatted_total: String,
    pub formatted_limit: String,
}

/// GET /api/summary - Totals, budget status and chart for the current records
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    let snapshot: Arc<LiveSnapshot> = state.feed.current();

    Json(SummaryResponse {
        version: snapshot.version,
        formatted_total: state
            .config
            .format_amount(snapshot.summary.totals.grand_total()),
        formatted_limit: state.config.format_amount(snapshot.summary.budget_limit),
        summary: snapshot.summary.clone(),
        chart: snapshot.chart.clone(),
    })
}

/// GET /api/config - Budget limit, currency symbol and rule table
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<AppConfig> {
    Json(state.config.clone())
}
