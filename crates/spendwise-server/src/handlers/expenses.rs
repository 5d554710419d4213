//! Expense handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::{AppError, AppState, SuccessResponse, AUDIT_ACTOR};
use spendwise_core::{Change, ExpenseRecord, NewExpense};

/// GET /api/expenses - All expenses, newest first
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ExpenseRecord>>, AppError> {
    let expenses = state.db.list_expenses()?;
    Ok(Json(expenses))
}

/// POST /api/expenses - Create an expense
///
/// A missing or `"Auto"` category is resolved by the keyword rules before the
/// record is stored.
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewExpense>,
) -> Result<(StatusCode, Json<ExpenseRecord>), AppError> {
    let draft = body
        .resolve(&state.config.rules)
        .map_err(AppError::from_core)?;

    let record = state.feed.commit(|| {
        let record = state.db.insert_expense(&draft)?;
        let change = Change::Added(record.clone());
        Ok::<_, spendwise_core::Error>((record, Some(change)))
    })?;

    // Audit failures never fail a stored write
    if let Err(e) = state.db.log_audit(
        AUDIT_ACTOR,
        "create",
        Some("expense"),
        Some(record.id),
        Some(&format!("category={}, amount={}", record.category, record.amount)),
    ) {
        warn!(id = record.id, error = %e, "Failed to write audit entry");
    }

    Ok((StatusCode::CREATED, Json(record)))
}

/// Query parameters for deleting an expense
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// DELETE /api/expenses/:id?confirm=true - Delete an expense
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<DeleteQuery>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !params.confirm {
        return Err(AppError::bad_request(
            "Deleting an expense requires confirm=true",
        ));
    }

    let deleted = state.feed.commit(|| {
        let deleted = state.db.delete_expense(id)?;
        Ok::<_, spendwise_core::Error>((deleted, deleted.then_some(Change::Removed(id))))
    })?;

    if !deleted {
        return Err(AppError::not_found("Expense not found"));
    }

    if let Err(e) = state
        .db
        .log_audit(AUDIT_ACTOR, "delete", Some("expense"), Some(id), None)
    {
        warn!(id, error = %e, "Failed to write audit entry");
    }

    Ok(Json(SuccessResponse { success: true }))
}
