//! Categorizer commands

use anyhow::Result;
use spendwise_core::AppConfig;

pub fn cmd_categorize(config: &AppConfig, description: &str) -> Result<()> {
    let result = config.rules.explain(description);

    println!("🏷️  \"{}\" → {}", description, result.category);
    match (result.rule_index, result.keyword) {
        (Some(index), Some(keyword)) => {
            println!("   Matched keyword \"{}\" in rule {}", keyword, index + 1);
        }
        _ => println!("   No rule matched, falling back to Others"),
    }

    Ok(())
}

pub fn cmd_rules(config: &AppConfig) -> Result<()> {
    println!();
    println!("📋 Category Rules (first match wins)");
    println!("   ─────────────────────────────────────────────────────────────");

    if config.rules.is_empty() {
        println!("   No rules configured. Every Auto expense becomes Others.");
        return Ok(());
    }

    for (index, rule) in config.rules.rules().iter().enumerate() {
        println!(
            "   {}. {:<9} {}",
            index + 1,
            rule.category.as_str(),
            rule.keywords.join(", ")
        );
    }
    println!("   ·  Others    (anything unmatched)");

    match &config.source {
        Some(path) => println!("\n   Loaded from {}", path.display()),
        None => println!("\n   Using built-in rules"),
    }

    Ok(())
}
