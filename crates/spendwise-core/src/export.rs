//! Report export for the current record set
//!
//! Each record becomes one row of (date, description, category, amount),
//! in the order given, rendered as CSV or pretty JSON.

use std::io::Write;

use serde::Serialize;

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::models::ExpenseRecord;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(Error::InvalidData(format!(
                "Unknown export format: {} (expected csv or json)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of the exported report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Creation date (UTC), `dd/mm/yyyy`
    pub date: String,
    pub description: String,
    pub category: String,
    /// Amount with currency symbol and digit grouping
    pub amount: String,
}

/// Turn records into report rows, keeping their order
pub fn report_rows(records: &[ExpenseRecord], config: &AppConfig) -> Vec<ReportRow> {
    records
        .iter()
        .map(|record| ReportRow {
            date: record.timestamp.format("%d/%m/%Y").to_string(),
            description: record.description.clone(),
            category: record.category.label().to_string(),
            amount: config.format_amount(record.amount),
        })
        .collect()
}

/// Write rows as CSV with a header line
pub fn write_csv<W: Write>(rows: &[ReportRow], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Date", "Description", "Category", "Amount"])?;
    for row in rows {
        wtr.write_record([&row.date, &row.description, &row.category, &row.amount])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write rows as a pretty-printed JSON array
pub fn write_json<W: Write>(rows: &[ReportRow], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, rows)?;
    Ok(())
}

/// Render the report for `records` in the given format
pub fn render(
    records: &[ExpenseRecord],
    config: &AppConfig,
    format: ExportFormat,
) -> Result<String> {
    let rows = report_rows(records, config);
    let mut buf = Vec::new();

    match format {
        ExportFormat::Csv => write_csv(&rows, &mut buf)?,
        ExportFormat::Json => write_json(&rows, &mut buf)?,
    }

    String::from_utf8(buf)
        .map_err(|e| Error::InvalidData(format!("Report is not valid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, StoredCategory};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn records() -> Vec<ExpenseRecord> {
        vec![
            ExpenseRecord {
                id: 2,
                description: "Flight to Goa, return".to_string(),
                amount: dec!(12500),
                category: StoredCategory::Known(Category::Travel),
                timestamp: Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 0).unwrap(),
            },
            ExpenseRecord {
                id: 1,
                description: "Cafe \"Blue\"".to_string(),
                amount: dec!(180.5),
                category: StoredCategory::Unrecognized("Snacks".to_string()),
                timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap(),
            },
        ]
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("pdf".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::default(), ExportFormat::Csv);
    }

    #[test]
    fn test_report_rows() {
        let rows = report_rows(&records(), &AppConfig::default());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "09/03/2024");
        assert_eq!(rows[0].category, "Travel");
        assert_eq!(rows[0].amount, "₹12,500");
        assert_eq!(rows[1].date, "15/01/2024");
        assert_eq!(rows[1].category, "Snacks");
        assert_eq!(rows[1].amount, "₹180.5");
    }

    #[test]
    fn test_render_csv_quotes_fields() {
        let csv = render(&records(), &AppConfig::default(), ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Date,Description,Category,Amount");
        assert_eq!(lines[1], "09/03/2024,\"Flight to Goa, return\",Travel,\"₹12,500\"");
        assert_eq!(lines[2], "15/01/2024,\"Cafe \"\"Blue\"\"\",Snacks,₹180.5");
    }

    #[test]
    fn test_render_json() {
        let json = render(&records(), &AppConfig::default(), ExportFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["description"], "Flight to Goa, return");
        assert_eq!(parsed[1]["amount"], "₹180.5");
    }

    #[test]
    fn test_render_empty() {
        let csv = render(&[], &AppConfig::default(), ExportFormat::Csv).unwrap();
        assert_eq!(csv, "Date,Description,Category,Amount\n");

        let json = render(&[], &AppConfig::default(), ExportFormat::Json).unwrap();
        assert_eq!(json, "[]");
    }
}
