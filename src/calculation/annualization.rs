//! Money rounding and period scaling.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::PeriodKind;

/// Rounds a monetary amount to two decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use payroll_ledger::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("46.655").unwrap()), Decimal::from_str("46.66").unwrap());
/// assert_eq!(round_money(Decimal::from_str("46.654").unwrap()), Decimal::from_str("46.65").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Scales a per-period amount up to a yearly figure. No rounding is applied.
pub fn annualize(period_amount: Decimal, period: PeriodKind) -> Decimal {
    period_amount * period.periods_per_year()
}

/// Scales a yearly figure down to one period, rounded to the penny.
pub fn deannualize(annual_amount: Decimal, period: PeriodKind) -> Decimal {
    round_money(annual_amount / period.periods_per_year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_annualize_weekly() {
        assert_eq!(annualize(dec("475.00"), PeriodKind::Weekly), dec("24700.00"));
    }

    #[test]
    fn test_annualize_keeps_fractional_pennies() {
        assert_eq!(annualize(dec("0.005"), PeriodKind::Monthly), dec("0.060"));
    }

    #[test]
    fn test_deannualize_rounds_half_up() {
        // 2426 / 52 = 46.6538...
        assert_eq!(deannualize(dec("2426.00"), PeriodKind::Weekly), dec("46.65"));
        // 0.06 / 12 = 0.005
        assert_eq!(deannualize(dec("0.06"), PeriodKind::Monthly), dec("0.01"));
    }

    #[test]
    fn test_annual_period_is_identity() {
        assert_eq!(annualize(dec("123.45"), PeriodKind::Annual), dec("123.45"));
        assert_eq!(deannualize(dec("123.45"), PeriodKind::Annual), dec("123.45"));
    }

    #[test]
    fn test_round_money_negative_midpoint() {
        assert_eq!(round_money(dec("-0.125")), dec("-0.13"));
    }
}
