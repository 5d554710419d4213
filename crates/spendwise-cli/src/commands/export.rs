//! Report export command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use spendwise_core::{
    export::{report_rows, write_csv, write_json},
    AppConfig, Database, ExportFormat,
};

use super::AUDIT_ACTOR;

pub fn cmd_export(
    db: &Database,
    config: &AppConfig,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let records = db.list_expenses()?;
    let rows = report_rows(&records, config);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_rows(&rows, format, &mut writer)?;
            writer.flush()?;
            eprintln!(
                "✅ Exported {} expenses to {} ({})",
                rows.len(),
                path.display(),
                format
            );
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_rows(&rows, format, &mut handle)?;
            if format == ExportFormat::Json {
                writeln!(handle)?;
            }
        }
    }

    db.log_audit(
        AUDIT_ACTOR,
        "export",
        Some("expense"),
        None,
        Some(&format!("format={}, rows={}", format, rows.len())),
    )?;

    Ok(())
}

fn write_rows<W: Write>(
    rows: &[spendwise_core::ReportRow],
    format: ExportFormat,
    writer: W,
) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(rows, writer)?,
        ExportFormat::Json => write_json(rows, writer)?,
    }
    Ok(())
}
