//! Single pay-period calculation.
//!
//! This module ties the calculator together: pension, income tax on the
//! annualized taxable pay, contribution on the period's taxable pay, and the
//! resulting net pay.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxConfig;
use crate::models::{PayPeriodResult, PeriodKind};

use super::{
    annualize, contribution_for_period, deannualize, income_tax_annual, round_money,
};

/// Corrections added to the computed tax and contribution.
///
/// Offsets align projected figures with a real statement; both default to
/// zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offsets {
    /// Added to the period's income tax.
    #[serde(default)]
    pub tax: Decimal,
    /// Added to the period's contribution.
    #[serde(default)]
    pub contribution: Decimal,
}

/// Calculates one pay period from a gross amount and a pension percentage.
///
/// The pension is `gross x pension_percent`, rounded to the penny. Income tax
/// is taken on the annualized taxable pay (`gross - pension`) and scaled back
/// to the period. Every output is rounded to the penny and the net pay is
/// derived from the rounded figures, so
/// `net_pay + income_tax + contribution + pension == gross` holds exactly.
///
/// # Examples
///
/// ```
/// use payroll_ledger::calculation::{Offsets, calc_pay_period};
/// use payroll_ledger::config::TaxConfig;
/// use payroll_ledger::models::{PeriodKind, TaxCode};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = TaxConfig::uk_2024_25().with_tax_code(TaxCode::parse("1257L"));
/// let result = calc_pay_period(
///     Decimal::from(500),
///     PeriodKind::Weekly,
///     "rUK",
///     Decimal::from_str("0.05").unwrap(),
///     Offsets::default(),
///     &config,
/// );
///
/// assert_eq!(result.pension, Decimal::from_str("25.00").unwrap());
/// assert_eq!(result.income_tax, Decimal::from_str("46.65").unwrap());
/// assert_eq!(result.contribution, Decimal::from_str("18.64").unwrap());
/// assert_eq!(result.net_pay, Decimal::from_str("409.71").unwrap());
/// ```
pub fn calc_pay_period(
    gross: Decimal,
    period: PeriodKind,
    region: &str,
    pension_percent: Decimal,
    offsets: Offsets,
    config: &TaxConfig,
) -> PayPeriodResult {
    let pension = round_money(gross * pension_percent);
    calc_with_pension(gross, pension, period, region, offsets, config)
}

/// Calculates one pay period with an already-determined pension deduction.
///
/// Used where the pension follows a different rule from a flat percentage,
/// such as the capped pension of reconstructed ledger weeks.
pub fn calc_with_pension(
    gross: Decimal,
    pension: Decimal,
    period: PeriodKind,
    region: &str,
    offsets: Offsets,
    config: &TaxConfig,
) -> PayPeriodResult {
    let taxable_pay = gross - pension;

    let annual_tax = income_tax_annual(annualize(taxable_pay, period), config);
    let income_tax = round_money(deannualize(annual_tax, period) + offsets.tax);

    let assessment = contribution_for_period(taxable_pay, period, config);
    let contribution = round_money(assessment.amount + offsets.contribution);

    let gross = round_money(gross);
    let pension = round_money(pension);
    let deductions_total = income_tax + contribution + pension;

    PayPeriodResult {
        gross,
        gross_for_tax: round_money(taxable_pay),
        income_tax,
        contribution,
        pension,
        earnings_for_contribution: round_money(taxable_pay),
        net_pay: gross - deductions_total,
        deductions_total,
        period,
        region: region.to_string(),
        contribution_basis: assessment.basis,
    }
}
