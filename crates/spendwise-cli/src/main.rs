//! Spendwise CLI - Personal expense tracker
//!
//! Usage:
//!   spendwise init                          Initialize database
//!   spendwise add "Zomato dinner" 450       Record an expense (auto-categorized)
//!   spendwise summary                       Totals and budget status
//!   spendwise serve --port 3000             Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref(), cli.budget_limit)?;

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, &config),
        Commands::Add {
            description,
            amount,
            category,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_add(&db, &config, &description, amount, &category)
        }
        Commands::List { limit } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_list(&db, &config, limit)
        }
        Commands::Delete { id, yes } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_delete(&db, &config, id, yes)
        }
        Commands::Summary => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_summary(&db, &config)
        }
        Commands::Categorize { description } => {
            commands::cmd_categorize(&config, &description.join(" "))
        }
        Commands::Rules => commands::cmd_rules(&config),
        Commands::Export { format, output } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_export(&db, &config, &format, output.as_deref())
        }
        Commands::Serve {
            port,
            host,
            static_dir,
            allowed_origins,
        } => {
            commands::cmd_serve(
                &cli.db,
                config,
                &host,
                port,
                static_dir.as_deref(),
                allowed_origins,
            )
            .await
        }
    }
}
