//! Spendwise Core Library
//!
//! Shared functionality for the Spendwise expense tracker:
//! - Expense models and the fixed category set
//! - Keyword rule table for automatic categorization
//! - Aggregation of a record set into per-category totals and budget status
//! - Donut chart slices for rendering
//! - Local authoritative record set for delta-fed snapshots
//! - Database access and migrations
//! - Report export (CSV/JSON)
//! - TOML configuration (budget limit, rule table, currency symbol)

pub mod aggregate;
pub mod categorize;
pub mod chart;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod money;

pub use aggregate::{aggregate, BudgetStatus, Summary, TotalsSnapshot};
pub use categorize::{resolve_category, CategoryRule, RuleMatch, RuleTable};
pub use chart::{ChartSlice, DonutChart};
pub use config::{AppConfig, DisplayConfig};
pub use db::{AuditEntry, Database};
pub use error::{Error, Result};
pub use export::{ExportFormat, ReportRow};
pub use ledger::{Change, RecordSet};
pub use models::{
    Category, CategoryChoice, ExpenseDraft, ExpenseRecord, NewExpense, StoredCategory,
    MAX_AMOUNT,
};
pub use money::format_amount;
