//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use spendwise_core::AppConfig;
use spendwise_server::ServerConfig;
use tracing::info;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    config: AppConfig,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
    allowed_origins: Vec<String>,
) -> Result<()> {
    println!("🚀 Starting Spendwise web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    println!(
        "   Budget limit: {}",
        config.format_amount(config.budget_limit)
    );
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if !allowed_origins.is_empty() {
        println!("   CORS origins: {}", allowed_origins.join(", "));
    }

    let db = open_db(db_path)?;
    info!(expenses = db.count_expenses()?, "Database ready");

    let static_dir = match static_dir {
        Some(dir) => Some(
            dir.to_str()
                .context("Static directory path is not valid UTF-8")?,
        ),
        None => None,
    };

    spendwise_server::serve_with_config(
        db,
        config,
        host,
        port,
        static_dir,
        ServerConfig { allowed_origins },
    )
    .await
}
