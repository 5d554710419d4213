//! Expense command implementations

use std::io::{self, Write};

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rust_decimal::Decimal;
use spendwise_core::{AppConfig, CategoryChoice, Database, ExpenseRecord, NewExpense};
use tracing::debug;

use super::{truncate, AUDIT_ACTOR};

pub fn cmd_add(
    db: &Database,
    config: &AppConfig,
    description: &str,
    amount: Decimal,
    category: &str,
) -> Result<()> {
    let choice: CategoryChoice = category.parse().map_err(|e: String| anyhow!(e))?;

    let draft = NewExpense::new(description, amount, choice)
        .resolve(&config.rules)
        .context("Invalid expense")?;
    let record = db.insert_expense(&draft).context("Failed to save expense")?;
    debug!(id = record.id, category = %record.category, "Expense stored");

    db.log_audit(
        AUDIT_ACTOR,
        "create",
        Some("expense"),
        Some(record.id),
        Some(&format!("category={}, amount={}", record.category, record.amount)),
    )?;

    println!(
        "✅ Added #{}: {} │ {} │ {}",
        record.id,
        truncate(&record.description, 40),
        config.format_amount(record.amount),
        record.category
    );
    if choice == CategoryChoice::Auto {
        println!("   Category picked automatically (see 'spendwise categorize')");
    }

    Ok(())
}

pub fn cmd_list(db: &Database, config: &AppConfig, limit: Option<usize>) -> Result<()> {
    let expenses = db.list_expenses()?;

    if expenses.is_empty() {
        println!("No expenses recorded yet. Add one with:");
        println!("  spendwise add \"Zomato dinner\" 450");
        return Ok(());
    }

    let shown = limit.unwrap_or(expenses.len()).min(expenses.len());

    println!();
    println!("📝 Expenses ({} of {})", shown, expenses.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for expense in expenses.iter().take(shown) {
        let date = expense.timestamp.with_timezone(&Local).format("%d/%m/%Y");
        println!(
            "   [{:>4}] {} │ {:>12} │ {:<9} │ {}",
            expense.id,
            date,
            config.format_amount(expense.amount),
            expense.category.label(),
            truncate(&expense.description, 36)
        );
    }

    Ok(())
}

/// Confirmation line shown before deleting an expense
pub fn delete_prompt(expense: &ExpenseRecord, config: &AppConfig) -> String {
    format!(
        "⚠️  Delete #{} \"{}\" ({})?",
        expense.id,
        truncate(&expense.description, 40),
        config.format_amount(expense.amount)
    )
}

pub fn cmd_delete(db: &Database, config: &AppConfig, id: i64, yes: bool) -> Result<()> {
    let Some(expense) = db.get_expense(id)? else {
        println!("Expense #{} not found.", id);
        return Ok(());
    };

    if !yes {
        println!("{}", delete_prompt(&expense, config));
        print!("Are you sure? [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if db.delete_expense(id)? {
        db.log_audit(AUDIT_ACTOR, "delete", Some("expense"), Some(id), None)?;
        println!("🗑️  Deleted expense #{}", id);
    } else {
        println!("Expense #{} not found.", id);
    }

    Ok(())
}
