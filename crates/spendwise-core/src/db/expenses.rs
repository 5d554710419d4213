//! Expense operations

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::Database;
use crate::error::Result;
use crate::models::{ExpenseDraft, ExpenseRecord, StoredCategory};

const SELECT_EXPENSE: &str =
    "SELECT id, description, amount, category, created_at_ms FROM expenses";

impl Database {
    /// Insert a resolved expense and return the stored record
    pub fn insert_expense(&self, draft: &ExpenseDraft) -> Result<ExpenseRecord> {
        let conn = self.conn()?;
        let created_at_ms = draft.timestamp.timestamp_millis();

        conn.execute(
            r#"
            INSERT INTO expenses (description, amount, category, created_at_ms)
            VALUES (?, ?, ?, ?)
            "#,
            params![
                draft.description,
                draft.amount.to_string(),
                draft.category.as_str(),
                created_at_ms,
            ],
        )?;

        let id = conn.last_insert_rowid();
        info!(
            id,
            category = %draft.category,
            amount = %draft.amount,
            "Added expense"
        );

        Ok(ExpenseRecord {
            id,
            description: draft.description.clone(),
            amount: draft.amount,
            category: StoredCategory::Known(draft.category),
            timestamp: millis_to_datetime(created_at_ms),
        })
    }

    /// Delete an expense; returns false if no such record existed
    pub fn delete_expense(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM expenses WHERE id = ?", params![id])?;

        if deleted > 0 {
            info!(id, "Deleted expense");
        }
        Ok(deleted > 0)
    }

    /// Get a single expense by ID
    pub fn get_expense(&self, id: i64) -> Result<Option<ExpenseRecord>> {
        let conn = self.conn()?;
        let expense = conn
            .query_row(
                &format!("{} WHERE id = ?", SELECT_EXPENSE),
                params![id],
                row_to_expense,
            )
            .optional()?;
        Ok(expense)
    }

    /// All expenses, newest first
    pub fn list_expenses(&self) -> Result<Vec<ExpenseRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY created_at_ms DESC, id DESC",
            SELECT_EXPENSE
        ))?;

        let expenses = stmt
            .query_map([], row_to_expense)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn row_to_expense(row: &Row) -> rusqlite::Result<ExpenseRecord> {
    let id: i64 = row.get(0)?;
    let amount_str: String = row.get(2)?;
    let category: String = row.get(3)?;
    let created_at_ms: i64 = row.get(4)?;

    Ok(ExpenseRecord {
        id,
        description: row.get(1)?,
        amount: parse_amount(id, &amount_str),
        category: StoredCategory::from(category),
        timestamp: millis_to_datetime(created_at_ms),
    })
}

/// Read boundary for stored amounts: anything unparsable or negative counts as zero
fn parse_amount(id: i64, raw: &str) -> Decimal {
    match raw.trim().parse::<Decimal>() {
        Ok(amount) if amount >= Decimal::ZERO => amount,
        Ok(amount) => {
            warn!(id, %amount, "Negative stored amount, treating as zero");
            Decimal::ZERO
        }
        Err(e) => {
            warn!(id, raw, error = %e, "Malformed stored amount, treating as zero");
            Decimal::ZERO
        }
    }
}

fn millis_to_datetime(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}
