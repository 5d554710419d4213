//! Domain models for Spendwise

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categorize::{resolve_category, RuleTable};
use crate::error::{Error, Result};

/// Largest amount a single expense may carry (one trillion)
///
/// Keeps sums of any realistic record set far below `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Spending category. Declaration order is the display and chart order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    Food,
    Travel,
    Shopping,
    Utilities,
    Others,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Travel => "Travel",
            Self::Shopping => "Shopping",
            Self::Utilities => "Utilities",
            Self::Others => "Others",
        }
    }

    /// Get all categories in display order
    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Travel,
            Self::Shopping,
            Self::Utilities,
            Self::Others,
        ]
    }

    /// Chart colour for this category
    pub fn color(&self) -> &'static str {
        match self {
            Self::Food => "#7047eb",
            Self::Travel => "#10b981",
            Self::Shopping => "#ffc107",
            Self::Utilities => "#ff8a65",
            Self::Others => "#a29bfe",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "travel" => Ok(Self::Travel),
            "shopping" => Ok(Self::Shopping),
            "utilities" => Ok(Self::Utilities),
            "others" | "other" => Ok(Self::Others),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category picked when submitting an expense
///
/// `Auto` asks the categorizer to pick a label from the description before the
/// record is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryChoice {
    #[default]
    Auto,
    Fixed(Category),
}

impl std::str::FromStr for CategoryChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        s.parse::<Category>().map(Self::Fixed)
    }
}

impl TryFrom<String> for CategoryChoice {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CategoryChoice> for String {
    fn from(choice: CategoryChoice) -> Self {
        choice.to_string()
    }
}

impl std::fmt::Display for CategoryChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "Auto"),
            Self::Fixed(category) => write!(f, "{}", category),
        }
    }
}

/// Category label as read back from storage
///
/// Rows written by this crate always carry a known label; `Unrecognized`
/// covers older or hand-edited data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StoredCategory {
    Known(Category),
    Unrecognized(String),
}

impl StoredCategory {
    pub fn known(&self) -> Option<Category> {
        match self {
            Self::Known(category) => Some(*category),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Known(category) => category.as_str(),
            Self::Unrecognized(label) => label,
        }
    }
}

impl From<Category> for StoredCategory {
    fn from(category: Category) -> Self {
        Self::Known(category)
    }
}

impl From<String> for StoredCategory {
    fn from(label: String) -> Self {
        match label.parse::<Category>() {
            Ok(category) => Self::Known(category),
            Err(_) => Self::Unrecognized(label),
        }
    }
}

impl From<StoredCategory> for String {
    fn from(category: StoredCategory) -> Self {
        category.label().to_string()
    }
}

impl std::fmt::Display for StoredCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A stored expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub description: String,
    /// Non-negative magnitude, currency agnostic
    pub amount: Decimal,
    pub category: StoredCategory,
    /// Creation instant (millisecond precision), used for ordering only
    pub timestamp: DateTime<Utc>,
}

/// An expense as submitted, before its category is resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub description: String,
    pub amount: Decimal,
    #[serde(default)]
    pub category: CategoryChoice,
}

impl NewExpense {
    pub fn new(description: impl Into<String>, amount: Decimal, category: CategoryChoice) -> Self {
        Self {
            description: description.into(),
            amount,
            category,
        }
    }

    /// Validate the submission and resolve `Auto` to a concrete category
    ///
    /// This is the only way to obtain an [`ExpenseDraft`], so every stored
    /// record has gone through category resolution exactly once.
    pub fn resolve(self, rules: &RuleTable) -> Result<ExpenseDraft> {
        if self.amount < Decimal::ZERO {
            return Err(Error::InvalidData(format!(
                "Amount must not be negative: {}",
                self.amount
            )));
        }
        if self.amount > MAX_AMOUNT {
            return Err(Error::InvalidData(format!(
                "Amount must not exceed {}: {}",
                MAX_AMOUNT, self.amount
            )));
        }

        let category = resolve_category(self.category, &self.description, rules);

        Ok(ExpenseDraft {
            description: self.description,
            amount: self.amount,
            category,
            timestamp: Utc::now(),
        })
    }
}

/// A validated expense with a concrete category, ready for storage
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
    pub timestamp: DateTime<Utc>,
}
