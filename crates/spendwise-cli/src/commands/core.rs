//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_config` - Resolve config file and apply flag overrides
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use spendwise_core::{config::default_config_path, AppConfig, Database};

pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

/// Load config from `--config` (or the default locations) and apply `--budget-limit`
pub fn load_config(config_path: Option<&Path>, budget_limit: Option<Decimal>) -> Result<AppConfig> {
    let config = AppConfig::load(config_path).context("Failed to load config")?;

    match budget_limit {
        Some(limit) => config
            .with_budget_limit(limit)
            .context("Invalid --budget-limit"),
        None => Ok(config),
    }
}

pub fn cmd_init(db_path: &Path, config: &AppConfig) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let count = db.count_expenses()?;
    println!("   Expenses on record: {}", count);

    match &config.source {
        Some(path) => println!("   Config: {}", path.display()),
        None => {
            println!("   Config: built-in defaults");
            if let Some(path) = default_config_path() {
                println!("   💡 Tip: Create {} to customize", path.display());
            }
        }
    }
    println!(
        "   Budget limit: {}",
        config.format_amount(config.budget_limit)
    );

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record an expense: spendwise add \"Zomato dinner\" 450");
    println!("  2. Check your budget: spendwise summary");
    println!("  3. Start web UI: spendwise serve");

    Ok(())
}
