//! Keyword rule table for automatic expense categorization
//!
//! A rule matches when the lower-cased description contains any of its
//! keywords as a substring, so a keyword can match inside a longer word
//! ("eat" matches "Uber Eats"). Rules are evaluated in table order and the
//! first match wins; nothing matching falls back to `Others`.
//!
//! The table is data, loaded from config (see [`crate::config`]), and the
//! matcher never depends on which keywords it holds.

use serde::Serialize;
use tracing::debug;

use crate::models::{Category, CategoryChoice};

const FOOD_KEYWORDS: &[&str] = &[
    "food",
    "pizza",
    "eat",
    "zomato",
    "cafe",
    "swiggy",
    "dining",
    "restaurant",
    "grocer",
];

const TRAVEL_KEYWORDS: &[&str] = &[
    "uber", "ola", "petrol", "travel", "train", "flight", "bus", "diesel", "taxi", "metro",
];

const SHOPPING_KEYWORDS: &[&str] = &[
    "amazon", "flipkart", "shopping", "buy", "clothes", "nike", "mall",
];

const UTILITIES_KEYWORDS: &[&str] = &[
    "rent",
    "bill",
    "recharge",
    "wifi",
    "electric",
    "water",
    "gas",
    "internet",
    "subscription",
    "netflix",
];

/// One row of the rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRule {
    pub category: Category,
    /// Lower-cased, trimmed, never empty
    pub keywords: Vec<String>,
}

impl CategoryRule {
    /// Build a rule, normalizing keywords to trimmed lowercase and dropping blanks
    pub fn new<I, S>(category: Category, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { category, keywords }
    }

    /// First keyword contained in an already lower-cased description
    fn matching_keyword(&self, lowered: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| lowered.contains(k.as_str()))
            .map(|k| k.as_str())
    }
}

/// Outcome of running a description through the rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMatch {
    pub category: Category,
    /// Position of the winning rule, `None` for the fallback
    pub rule_index: Option<usize>,
    /// Keyword that matched, `None` for the fallback
    pub keyword: Option<String>,
}

/// Ordered keyword rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleTable {
    rules: Vec<CategoryRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Map a description to a category (first matching rule, else `Others`)
    pub fn categorize(&self, description: &str) -> Category {
        self.explain(description).category
    }

    /// Like [`categorize`](Self::categorize), but also reports which rule and
    /// keyword decided the outcome
    pub fn explain(&self, description: &str) -> RuleMatch {
        let lowered = description.to_lowercase();

        for (index, rule) in self.rules.iter().enumerate() {
            if let Some(keyword) = rule.matching_keyword(&lowered) {
                debug!(
                    description,
                    keyword,
                    category = %rule.category,
                    "Categorized by keyword rule"
                );
                return RuleMatch {
                    category: rule.category,
                    rule_index: Some(index),
                    keyword: Some(keyword.to_string()),
                };
            }
        }

        debug!(description, "No keyword rule matched, using Others");
        RuleMatch {
            category: Category::Others,
            rule_index: None,
            keyword: None,
        }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new(vec![
            CategoryRule::new(Category::Food, FOOD_KEYWORDS),
            CategoryRule::new(Category::Travel, TRAVEL_KEYWORDS),
            CategoryRule::new(Category::Shopping, SHOPPING_KEYWORDS),
            CategoryRule::new(Category::Utilities, UTILITIES_KEYWORDS),
        ])
    }
}

/// Resolve a submitted category choice to a concrete category
///
/// Only `Auto` consults the rule table; an explicit choice is kept as-is.
pub fn resolve_category(choice: CategoryChoice, description: &str, rules: &RuleTable) -> Category {
    match choice {
        CategoryChoice::Auto => rules.categorize(description),
        CategoryChoice::Fixed(category) => category,
    }
}
