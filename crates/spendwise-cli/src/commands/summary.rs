//! Budget summary command

use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use spendwise_core::{AppConfig, BudgetStatus, Database, DonutChart, Summary};

const BAR_WIDTH: usize = 24;

/// Text bar for a percentage in 0..=100
pub fn render_bar(percent: Decimal, width: usize) -> String {
    let share = percent.to_f64().unwrap_or(0.0).clamp(0.0, 100.0) / 100.0;
    let filled = ((share * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn cmd_summary(db: &Database, config: &AppConfig) -> Result<()> {
    let records = db.list_expenses()?;
    let summary = Summary::compute(&records, config.budget_limit);
    let chart = DonutChart::from_totals(&summary.totals);

    println!();
    println!("📊 Spending by Category ({} expenses)", summary.record_count);
    println!("   ─────────────────────────────────────────────────────────────");

    for slice in &chart.slices {
        println!(
            "   {:<9} {:>12}  {} {:>6}%",
            slice.category.as_str(),
            config.format_amount(slice.amount),
            render_bar(slice.percent, BAR_WIDTH),
            slice.percent
        );
    }

    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:<9} {:>12}",
        "Total",
        config.format_amount(summary.totals.grand_total())
    );

    println!();
    println!("💰 Budget");
    println!(
        "   Limit: {}   Used: {}%",
        config.format_amount(summary.budget_limit),
        summary.progress_percent
    );
    println!("   {}", render_bar(summary.progress_percent, BAR_WIDTH * 2));

    match summary.status {
        BudgetStatus::OnTrack => println!(
            "   ✅ On track, {} left",
            config.format_amount(summary.remaining)
        ),
        BudgetStatus::OverBudget => println!(
            "   ⚠️  Over budget by {}",
            config.format_amount(-summary.remaining)
        ),
    }

    Ok(())
}
