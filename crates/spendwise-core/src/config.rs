//! Budget, display and categorization settings
//!
//! ## Configuration Resolution
//!
//! 1. An explicit path (`--config`), which must exist
//! 2. The override file in the data dir (~/.local/share/spendwise/config.toml)
//! 3. The embedded defaults (compiled into binary)
//!
//! A `[[rules]]` list in the file replaces the default rule table as a
//! whole, keeping the order it is written in.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::categorize::{CategoryRule, RuleTable};
use crate::error::{Error, Result};
use crate::models::Category;
use crate::money;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/spendwise.toml");

const DEFAULT_BUDGET_LIMIT: i64 = 30_000;
const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayConfig {
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    pub budget_limit: Decimal,
    pub display: DisplayConfig,
    pub rules: RuleTable,
    /// File the config was read from, `None` for embedded defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            budget_limit: Decimal::from(DEFAULT_BUDGET_LIMIT),
            display: DisplayConfig::default(),
            rules: RuleTable::default(),
            source: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from an explicit path, the override location, or
    /// the embedded defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_file(path);
        }

        if let Some(default_path) = default_config_path() {
            if default_path.exists() {
                return Self::load_file(&default_path);
            }
        }

        debug!("Using embedded default config");
        Self::from_toml(DEFAULT_CONFIG)
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_toml(&content)?;
        config.source = Some(path.to_path_buf());

        info!(
            path = %path.display(),
            budget_limit = %config.budget_limit,
            rules = config.rules.len(),
            "Loaded config"
        );
        Ok(config)
    }

    /// Parse config from TOML content, filling gaps from the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();

        if let Some(limit) = raw.budget.and_then(|b| b.limit) {
            config = config.with_budget_limit(limit)?;
        }

        if let Some(symbol) = raw.display.and_then(|d| d.currency_symbol) {
            config.display.currency_symbol = symbol;
        }

        if let Some(raw_rules) = raw.rules {
            let mut rules = Vec::with_capacity(raw_rules.len());
            for (index, raw_rule) in raw_rules.into_iter().enumerate() {
                let category: Category = raw_rule
                    .category
                    .parse()
                    .map_err(|e| Error::Config(format!("Rule {}: {}", index + 1, e)))?;

                let rule = CategoryRule::new(category, raw_rule.keywords);
                if rule.keywords.is_empty() {
                    return Err(Error::Config(format!(
                        "Rule {} ({}) has no keywords",
                        index + 1,
                        category
                    )));
                }
                rules.push(rule);
            }
            config.rules = RuleTable::new(rules);
        }

        Ok(config)
    }

    /// Replace the budget limit, rejecting negative values
    pub fn with_budget_limit(mut self, limit: Decimal) -> Result<Self> {
        if limit < Decimal::ZERO {
            return Err(Error::Config(format!(
                "Budget limit must not be negative: {}",
                limit
            )));
        }
        self.budget_limit = limit;
        Ok(self)
    }

    /// Format an amount with the configured currency symbol
    pub fn format_amount(&self, amount: Decimal) -> String {
        money::format_amount(amount, &self.display.currency_symbol)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("spendwise").join("config.toml"))
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    budget: Option<RawBudget>,
    display: Option<RawDisplay>,
    rules: Option<Vec<RawRule>>,
}

#[derive(Debug, Deserialize)]
struct RawBudget {
    limit: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency_symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    category: String,
    #[serde(default)]
    keywords: Vec<String>,
}
