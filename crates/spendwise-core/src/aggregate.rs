//! Per-category totals and budget status
//!
//! Everything here is recomputed from the full record set on every call.
//! There is no incremental state: feeding the same records twice yields the
//! same snapshot.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{Category, ExpenseRecord};

/// Per-category sums plus the grand total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalsSnapshot {
    /// Always holds all five categories, zero when unused
    by_category: BTreeMap<Category, Decimal>,
    grand_total: Decimal,
}

impl TotalsSnapshot {
    fn zeroed() -> Self {
        Self {
            by_category: Category::all()
                .iter()
                .map(|c| (*c, Decimal::ZERO))
                .collect(),
            grand_total: Decimal::ZERO,
        }
    }

    pub fn get(&self, category: Category) -> Decimal {
        self.by_category
            .get(&category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Sums in display order
    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        self.by_category.iter().map(|(c, amount)| (*c, *amount))
    }

    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    OverBudget,
}

impl BudgetStatus {
    /// Over budget only when strictly above the limit
    pub fn evaluate(grand_total: Decimal, budget_limit: Decimal) -> Self {
        if grand_total > budget_limit {
            Self::OverBudget
        } else {
            Self::OnTrack
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::OverBudget => "over_budget",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sum a full record set into per-category totals and a budget status
///
/// Records with an unrecognized stored label count towards `Others`, so the
/// five sums add up to the grand total. Sums saturate at `Decimal::MAX`
/// instead of overflowing.
pub fn aggregate(
    records: &[ExpenseRecord],
    budget_limit: Decimal,
) -> (TotalsSnapshot, BudgetStatus) {
    let mut totals = TotalsSnapshot::zeroed();

    for record in records {
        let category = record.category.known().unwrap_or(Category::Others);
        let sum = totals.by_category.entry(category).or_insert(Decimal::ZERO);
        *sum = saturating_add(*sum, record.amount);
        totals.grand_total = saturating_add(totals.grand_total, record.amount);
    }

    let status = BudgetStatus::evaluate(totals.grand_total, budget_limit);
    (totals, status)
}

fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::MAX)
}

/// Share of the budget used, as a percentage capped at 100 (2 d.p.)
///
/// A zero limit reads as fully used once anything has been spent.
pub fn budget_progress(grand_total: Decimal, budget_limit: Decimal) -> Decimal {
    let hundred = Decimal::ONE_HUNDRED;

    if budget_limit <= Decimal::ZERO {
        return if grand_total > Decimal::ZERO {
            hundred
        } else {
            Decimal::ZERO
        };
    }

    let percent = grand_total
        .checked_div(budget_limit)
        .and_then(|ratio| ratio.checked_mul(hundred))
        .unwrap_or(hundred);

    percent
        .min(hundred)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Aggregation result bundled for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub totals: TotalsSnapshot,
    pub status: BudgetStatus,
    pub budget_limit: Decimal,
    /// Limit minus grand total; negative when over budget
    pub remaining: Decimal,
    pub progress_percent: Decimal,
    pub record_count: usize,
}

impl Summary {
    pub fn compute(records: &[ExpenseRecord], budget_limit: Decimal) -> Self {
        let (totals, status) = aggregate(records, budget_limit);
        let grand_total = totals.grand_total();

        Self {
            remaining: budget_limit
                .checked_sub(grand_total)
                .unwrap_or(Decimal::MIN),
            progress_percent: budget_progress(grand_total, budget_limit),
            status,
            budget_limit,
            record_count: records.len(),
            totals,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.status == BudgetStatus::OverBudget
    }
}
