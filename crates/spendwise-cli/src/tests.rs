//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use rust_decimal_macros::dec;
use spendwise_core::{AppConfig, Category, Database, StoredCategory};

use crate::commands::{self, truncate};
use crate::commands::summary::render_bar;

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn add(db: &Database, description: &str, amount: rust_decimal::Decimal, category: &str) {
    commands::cmd_add(db, &AppConfig::default(), description, amount, category).unwrap();
}

#[test]
fn test_cmd_add_auto_category() {
    let db = setup_test_db();
    add(&db, "Zomato dinner", dec!(450), "Auto");

    let expenses = db.list_expenses().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].category, StoredCategory::Known(Category::Food));
    assert_eq!(expenses[0].amount, dec!(450));
}

#[test]
fn test_cmd_add_fixed_category_skips_rules() {
    let db = setup_test_db();
    add(&db, "Uber to office", dec!(300), "shopping");

    let expenses = db.list_expenses().unwrap();
    assert_eq!(expenses[0].category, StoredCategory::Known(Category::Shopping));
}

#[test]
fn test_cmd_add_invalid_category() {
    let db = setup_test_db();
    let result = commands::cmd_add(&db, &AppConfig::default(), "Lunch", dec!(100), "Groceries");
    assert!(result.is_err());
    assert_eq!(db.count_expenses().unwrap(), 0);
}

#[test]
fn test_cmd_add_negative_amount_rejected() {
    let db = setup_test_db();
    let result = commands::cmd_add(&db, &AppConfig::default(), "Refund", dec!(-50), "Auto");
    assert!(result.is_err());
    assert_eq!(db.count_expenses().unwrap(), 0);
}

#[test]
fn test_cmd_add_writes_audit_entry() {
    let db = setup_test_db();
    add(&db, "Netflix", dec!(649), "Auto");

    let log = db.list_audit_log(10).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].actor, commands::AUDIT_ACTOR);
    assert_eq!(log[0].action, "create");
    assert!(log[0]
        .details
        .as_deref()
        .unwrap_or_default()
        .contains("Utilities"));
}

#[test]
fn test_cmd_list_empty_and_limited() {
    let db = setup_test_db();
    let config = AppConfig::default();
    assert!(commands::cmd_list(&db, &config, None).is_ok());

    add(&db, "Pizza", dec!(200), "Auto");
    add(&db, "Metro card", dec!(500), "Auto");
    assert!(commands::cmd_list(&db, &config, Some(1)).is_ok());
    assert!(commands::cmd_list(&db, &config, Some(10)).is_ok());
}

#[test]
fn test_cmd_list_with_unrecognized_category() {
    let db = setup_test_db();
    let conn = db.conn().unwrap();
    conn.execute(
        "INSERT INTO expenses (description, amount, category, created_at_ms) VALUES ('Old row', '99', 'Misc', 0)",
        [],
    )
    .unwrap();
    drop(conn);

    assert!(commands::cmd_list(&db, &AppConfig::default(), None).is_ok());
    assert!(commands::cmd_summary(&db, &AppConfig::default()).is_ok());
}

#[test]
fn test_cmd_delete_confirmed() {
    let db = setup_test_db();
    add(&db, "Flipkart order", dec!(1200), "Auto");
    let id = db.list_expenses().unwrap()[0].id;

    commands::cmd_delete(&db, &AppConfig::default(), id, true).unwrap();
    assert!(db.get_expense(id).unwrap().is_none());

    let log = db.list_audit_log(10).unwrap();
    assert_eq!(log[0].action, "delete");
    assert_eq!(log[0].entity_id, Some(id));
}

#[test]
fn test_cmd_delete_missing_is_not_an_error() {
    let db = setup_test_db();
    assert!(commands::cmd_delete(&db, &AppConfig::default(), 404, true).is_ok());
    assert!(db.list_audit_log(10).unwrap().is_empty());
}

#[test]
fn test_delete_prompt_formats_amount() {
    let db = setup_test_db();
    add(&db, "Flipkart order", dec!(1234567.5), "Auto");
    let expense = db.list_expenses().unwrap().remove(0);

    let prompt = commands::delete_prompt(&expense, &AppConfig::default());
    assert!(prompt.contains("\"Flipkart order\""));
    assert!(prompt.contains("(₹12,34,567.5)"));

    let dollars = AppConfig::from_toml("[display]\ncurrency_symbol = \"$\"\n").unwrap();
    assert!(commands::delete_prompt(&expense, &dollars).contains("($12,34,567.5)"));
}

#[test]
fn test_cmd_summary() {
    let db = setup_test_db();
    let config = AppConfig::default().with_budget_limit(dec!(1000)).unwrap();
    assert!(commands::cmd_summary(&db, &config).is_ok());

    add(&db, "Rent", dec!(900), "Auto");
    add(&db, "Swiggy", dec!(250), "Auto");
    assert!(commands::cmd_summary(&db, &config).is_ok());
}

#[test]
fn test_render_bar() {
    assert_eq!(render_bar(dec!(0), 4), "░░░░");
    assert_eq!(render_bar(dec!(50), 4), "██░░");
    assert_eq!(render_bar(dec!(100), 4), "████");
    assert_eq!(render_bar(dec!(250), 4), "████");
}

#[test]
fn test_cmd_categorize_and_rules() {
    let config = AppConfig::default();
    assert!(commands::cmd_categorize(&config, "Netflix subscription").is_ok());
    assert!(commands::cmd_categorize(&config, "Birthday gift").is_ok());
    assert!(commands::cmd_rules(&config).is_ok());

    let empty = AppConfig::from_toml("rules = []").unwrap();
    assert!(commands::cmd_rules(&empty).is_ok());
}

#[test]
fn test_cmd_export_csv_to_file() {
    let db = setup_test_db();
    add(&db, "Zomato dinner", dec!(450), "Auto");
    add(&db, "Petrol", dec!(1500.5), "Auto");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");
    commands::cmd_export(&db, &AppConfig::default(), "csv", Some(&path)).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("Date,Description,Category,Amount"));
    assert_eq!(lines.count(), 2);
    assert!(content.contains("Travel"));
    assert!(content.contains("\"₹1,500.5\""));

    let log = db.list_audit_log(10).unwrap();
    assert_eq!(log[0].action, "export");
}

#[test]
fn test_cmd_export_json_to_file() {
    let db = setup_test_db();
    add(&db, "Amazon", dec!(999), "Auto");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    commands::cmd_export(&db, &AppConfig::default(), "JSON", Some(&path)).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.trim_start().starts_with('['));
    assert!(content.contains("\"category\": \"Shopping\""));
}

#[test]
fn test_cmd_export_bad_format() {
    let db = setup_test_db();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.xml");

    let result = commands::cmd_export(&db, &AppConfig::default(), "xml", Some(&path));
    assert!(result.is_err());
    assert!(!path.exists());
}

#[test]
fn test_load_config_from_file_with_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[budget]\nlimit = 5000\n\n[display]\ncurrency_symbol = \"$\"\n",
    )
    .unwrap();

    let config = commands::load_config(Some(&path), None).unwrap();
    assert_eq!(config.budget_limit, dec!(5000));
    assert_eq!(config.display.currency_symbol, "$");
    assert_eq!(config.source.as_deref(), Some(path.as_path()));

    let config = commands::load_config(Some(&path), Some(dec!(12000))).unwrap();
    assert_eq!(config.budget_limit, dec!(12000));
}

#[test]
fn test_load_config_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    assert!(commands::load_config(Some(&missing), None).is_err());

    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[budget]\nlimit = 100\n").unwrap();
    assert!(commands::load_config(Some(&path), Some(dec!(-1))).is_err());
}

#[test]
fn test_cmd_init_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spendwise.db");

    commands::cmd_init(&path, &AppConfig::default()).unwrap();
    assert!(path.exists());
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello world", 8), "hello...");
    assert_eq!(truncate("₹₹₹₹₹₹", 5), "₹₹...");
}
