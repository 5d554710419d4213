//! Donut chart data derived from a totals snapshot
//!
//! A [`DonutChart`] is built fresh for each render and then dropped.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::aggregate::TotalsSnapshot;
use crate::models::Category;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub category: Category,
    pub amount: Decimal,
    /// Share of the grand total (2 d.p.), zero when nothing was spent
    pub percent: Decimal,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonutChart {
    /// One slice per category, in display order
    pub slices: Vec<ChartSlice>,
    pub total: Decimal,
}

impl DonutChart {
    pub fn from_totals(totals: &TotalsSnapshot) -> Self {
        let total = totals.grand_total();

        let slices = totals
            .iter()
            .map(|(category, amount)| ChartSlice {
                category,
                amount,
                percent: share_percent(amount, total),
                color: category.color(),
            })
            .collect();

        Self { slices, total }
    }

    /// True when every slice is zero; renderers show an empty ring
    pub fn is_empty(&self) -> bool {
        self.total.is_zero()
    }

    /// Slices with a non-zero amount
    pub fn visible_slices(&self) -> impl Iterator<Item = &ChartSlice> {
        self.slices.iter().filter(|s| !s.amount.is_zero())
    }
}

fn share_percent(amount: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    amount
        .checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}
