//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db, load_config)
//! - `expenses` - Expense commands (add, list, delete)
//! - `summary` - Totals, budget progress and text chart
//! - `rules` - Categorizer preview and rule table
//! - `export` - Report export
//! - `serve` - Web server command

pub mod core;
pub mod expenses;
pub mod export;
pub mod rules;
pub mod serve;
pub mod summary;

// Re-export command functions for main.rs
pub use core::*;
pub use expenses::*;
pub use export::*;
pub use rules::*;
pub use serve::*;
pub use summary::*;

/// Actor name recorded in the audit log for CLI writes
pub const AUDIT_ACTOR: &str = "cli";

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
