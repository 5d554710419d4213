//! Display formatting for amounts
//!
//! Amounts are grouped the Indian way: the last three integer digits form one
//! group and every group before that has two digits (`12,34,567`). Fractions
//! are rounded to two places and trailing zeros are dropped.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount with a currency symbol, e.g. `₹12,34,567.89`
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let plain = rounded.abs().to_string();
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (plain.as_str(), None),
    };

    let mut out = format!("{}{}{}", sign, symbol, group_indian(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), last_three)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_small_amounts() {
        assert_eq!(format_amount(dec!(0), "₹"), "₹0");
        assert_eq!(format_amount(dec!(45.50), "₹"), "₹45.5");
        assert_eq!(format_amount(dec!(999), "₹"), "₹999");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_amount(dec!(1000), "₹"), "₹1,000");
        assert_eq!(format_amount(dec!(10700), "₹"), "₹10,700");
        assert_eq!(format_amount(dec!(100000), "₹"), "₹1,00,000");
        assert_eq!(format_amount(dec!(1234567.891), "₹"), "₹12,34,567.89");
        assert_eq!(format_amount(dec!(123456789), "₹"), "₹12,34,56,789");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(format_amount(dec!(2.005), "$"), "$2.01");
        assert_eq!(format_amount(dec!(19.999), "$"), "$20");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(format_amount(dec!(-700), "₹"), "-₹700");
        assert_eq!(format_amount(dec!(-0.001), "₹"), "₹0");
    }

    #[test]
    fn test_empty_symbol() {
        assert_eq!(format_amount(dec!(30000), ""), "30,000");
    }
}
