//! Categorizer preview

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::AppState;
use spendwise_core::RuleMatch;

#[derive(Debug, Deserialize)]
pub struct CategorizeQuery {
    #[serde(default)]
    pub description: String,
}

/// GET /api/categorize?description= - Show which rule an `Auto` expense would hit
pub async fn preview_category(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategorizeQuery>,
) -> Json<RuleMatch> {
    Json(state.config.rules.explain(&params.description))
}
