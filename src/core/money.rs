//! Currency helpers.
//!
//! All amounts are `Decimal` so that summing many small values never drifts.
//! Rounding happens only at display time, to two places, half away from zero.

use crate::errors::{Error, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Rounds an amount to cents.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Applies a whole-number percentage (0-100) to an amount.
#[must_use]
pub fn apply_percentage(amount: Decimal, percentage: Decimal) -> Decimal {
    amount * percentage / Decimal::ONE_HUNDRED
}

/// `total / count`, or zero when there is nothing to average.
#[must_use]
pub fn safe_average(total: Decimal, count: u64) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    total / Decimal::from(count)
}

/// Formats an amount the Brazilian way: `1.234,56`, `-0,50`.
#[must_use]
pub fn format_brl(amount: Decimal) -> String {
    let rounded = round_currency(amount);
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped},{frac_part}")
}

/// Formats an amount with the currency symbol: `R$ 1.234,56`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format!("R$ {}", format_brl(amount))
}

/// Parses an amount typed by a user.
///
/// Accepts the Brazilian form (`1.234,56`, `R$ 10,5`) and a plain decimal
/// point (`1234.56`). Without a comma, a single dot is the decimal point and
/// several dots group thousands.
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let cleaned: String = input
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else if cleaned.matches('.').count() > 1 {
        cleaned.replace('.', "")
    } else {
        cleaned
    };

    Decimal::from_str(&normalized).map_err(|_| Error::Validation {
        message: format!("'{}' is not a valid amount", input.trim()),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_currency_half_away_from_zero() {
        assert_eq!(round_currency(dec!(1.005)), dec!(1.01));
        assert_eq!(round_currency(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round_currency(dec!(2.344)), dec!(2.34));
    }

    #[test]
    fn test_apply_percentage() {
        assert_eq!(apply_percentage(dec!(1000), dec!(10)), dec!(100));
        assert_eq!(apply_percentage(dec!(250.50), dec!(7.5)), dec!(18.7875));
        assert_eq!(apply_percentage(dec!(1000), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_safe_average_zero_count() {
        assert_eq!(safe_average(dec!(500), 0), Decimal::ZERO);
        assert_eq!(safe_average(dec!(500), 4), dec!(125));
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(Decimal::ZERO), "0,00");
        assert_eq!(format_brl(dec!(5)), "5,00");
        assert_eq!(format_brl(dec!(999.999)), "1.000,00");
        assert_eq!(format_brl(dec!(1234.5)), "1.234,50");
        assert_eq!(format_brl(dec!(1234567.891)), "1.234.567,89");
        assert_eq!(format_brl(dec!(-0.5)), "-0,50");
        assert_eq!(format_brl(dec!(-123456)), "-123.456,00");
    }

    #[test]
    fn test_format_brl_negative_rounding_to_zero() {
        assert_eq!(format_brl(dec!(-0.001)), "0,00");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1.234,56").unwrap(), dec!(1234.56));
        assert_eq!(parse_amount("R$ 10,5").unwrap(), dec!(10.5));
        assert_eq!(parse_amount(" 1234.56 ").unwrap(), dec!(1234.56));
        assert_eq!(parse_amount("1.234.567").unwrap(), dec!(1234567));
        assert_eq!(parse_amount("-5").unwrap(), dec!(-5));
        assert!(matches!(
            parse_amount("dez reais"),
            Err(Error::Validation { .. })
        ));
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec!(1500)), "R$ 1.500,00");
    }
}
