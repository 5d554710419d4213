//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

/// Spendwise - Track expenses against a monthly budget
#[derive(Parser)]
#[command(name = "spendwise")]
#[command(about = "Personal expense tracker with keyword categorization", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "spendwise.db", global = true)]
    pub db: PathBuf,

    /// Config file (defaults to ~/.local/share/spendwise/config.toml, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the budget limit from the config file
    #[arg(long, global = true)]
    pub budget_limit: Option<Decimal>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record an expense
    Add {
        /// What the money was spent on
        description: String,

        /// Amount spent (non-negative)
        amount: Decimal,

        /// Category: Auto, Food, Travel, Shopping, Utilities or Others
        #[arg(short, long, default_value = "Auto")]
        category: String,
    },

    /// List expenses, newest first
    List {
        /// Show at most this many expenses
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show per-category totals and budget status
    Summary,

    /// Show which category a description would get
    Categorize {
        /// Description text
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Show the keyword rule table
    Rules,

    /// Export expenses as a report
    Export {
        /// Output format: csv or json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (the expense page)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Allowed CORS origins (comma-separated)
        #[arg(long, value_delimiter = ',')]
        allowed_origins: Vec<String>,
    },
}
