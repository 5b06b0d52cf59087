//! Annual income tax calculation.
//!
//! This module resolves the personal allowance from the tax code, applies
//! the high-income taper, and splits taxable income across the basic,
//! higher and additional rate bands.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxConfig;

use super::round_money;

/// Where the personal allowance came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceSource {
    /// The configured default allowance.
    Default,
    /// A no-allowance code (`BR` or `0T`).
    NoAllowanceCode,
    /// The leading number of the tax code, times ten.
    NumericCode,
}

/// A resolved personal allowance, before any taper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalAllowance {
    /// The allowance amount.
    pub amount: Decimal,
    /// Which rule produced the amount.
    pub source: AllowanceSource,
}

/// Resolves the personal allowance implied by the configuration's tax code.
///
/// # Examples
///
/// ```
/// use payroll_ledger::calculation::{AllowanceSource, resolve_personal_allowance};
/// use payroll_ledger::config::TaxConfig;
/// use payroll_ledger::models::TaxCode;
/// use rust_decimal::Decimal;
///
/// let config = TaxConfig::uk_2024_25().with_tax_code(TaxCode::parse("1100L"));
/// let allowance = resolve_personal_allowance(&config);
/// assert_eq!(allowance.amount, Decimal::from(11000));
/// assert_eq!(allowance.source, AllowanceSource::NumericCode);
/// ```
pub fn resolve_personal_allowance(config: &TaxConfig) -> PersonalAllowance {
    match &config.tax_code {
        Some(code) if code.is_no_allowance() => PersonalAllowance {
            amount: Decimal::ZERO,
            source: AllowanceSource::NoAllowanceCode,
        },
        Some(code) => match code.numeric_allowance() {
            Some(amount) => PersonalAllowance {
                amount,
                source: AllowanceSource::NumericCode,
            },
            None => PersonalAllowance {
                amount: config.personal_allowance,
                source: AllowanceSource::Default,
            },
        },
        None => PersonalAllowance {
            amount: config.personal_allowance,
            source: AllowanceSource::Default,
        },
    }
}

/// Reduces an allowance by half of the income above the taper start.
///
/// The result never drops below zero. The taper end is not consulted.
pub fn taper_allowance(allowance: Decimal, annual_gross: Decimal, config: &TaxConfig) -> Decimal {
    if annual_gross <= config.taper_start {
        return allowance;
    }
    let reduction = ((annual_gross - config.taper_start) / Decimal::TWO).round_dp(2);
    (allowance - reduction).max(Decimal::ZERO)
}

/// Annual income tax split by band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxBreakdown {
    /// Allowance after the taper.
    pub allowance: Decimal,
    /// Which rule produced the allowance.
    pub allowance_source: AllowanceSource,
    /// Income after the allowance, floored at zero.
    pub taxable: Decimal,
    /// Income taxed at the basic rate.
    pub basic_band: Decimal,
    /// Income taxed at the higher rate.
    pub higher_band: Decimal,
    /// Income taxed at the additional rate.
    pub additional_band: Decimal,
    /// Total annual tax, rounded to the penny.
    pub tax: Decimal,
}

/// Computes annual income tax with its band split.
pub fn income_tax_breakdown(annual_gross: Decimal, config: &TaxConfig) -> IncomeTaxBreakdown {
    let resolved = resolve_personal_allowance(config);
    let allowance = taper_allowance(resolved.amount, annual_gross, config);
    let taxable = (annual_gross - allowance).max(Decimal::ZERO);

    let bands = &config.bands;
    let basic_band = taxable.min(bands.basic_rate_limit);
    let higher_band = (taxable - bands.basic_rate_limit)
        .max(Decimal::ZERO)
        .min((bands.higher_rate_limit - bands.basic_rate_limit).max(Decimal::ZERO));
    let additional_band = (taxable - bands.higher_rate_limit).max(Decimal::ZERO);

    let tax = basic_band * bands.basic_rate
        + higher_band * bands.higher_rate
        + additional_band * bands.additional_rate;

    IncomeTaxBreakdown {
        allowance,
        allowance_source: resolved.source,
        taxable,
        basic_band,
        higher_band,
        additional_band,
        tax: round_money(tax),
    }
}

/// Computes annual income tax on an annual gross, rounded to the penny.
///
/// # Examples
///
/// ```
/// use payroll_ledger::calculation::income_tax_annual;
/// use payroll_ledger::config::TaxConfig;
/// use rust_decimal::Decimal;
///
/// let config = TaxConfig::uk_2024_25();
/// // (24,700 - 12,570) x 20%
/// assert_eq!(income_tax_annual(Decimal::from(24700), &config), Decimal::from(2426));
/// ```
pub fn income_tax_annual(annual_gross: Decimal, config: &TaxConfig) -> Decimal {
    income_tax_breakdown(annual_gross, config).tax
}
