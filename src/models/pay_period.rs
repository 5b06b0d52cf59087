//! Pay period kinds and the per-period pay breakdown.
//!
//! This module contains [`PeriodKind`], the [`ThresholdBasis`] flag that records
//! which contribution thresholds were applied, and [`PayPeriodResult`], the
//! immutable value produced by every pay-period calculation.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// How often a worker is paid.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::PeriodKind;
/// use rust_decimal::Decimal;
///
/// let kind: PeriodKind = "weekly".parse().unwrap();
/// assert_eq!(kind, PeriodKind::Weekly);
/// assert_eq!(kind.periods_per_year(), Decimal::from(52));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    /// Paid every week, 52 periods per year.
    Weekly,
    /// Paid every calendar month, 12 periods per year.
    Monthly,
    /// Paid once a year.
    Annual,
}

impl PeriodKind {
    /// Returns the number of periods of this kind in a tax year.
    pub fn periods_per_year(self) -> Decimal {
        match self {
            PeriodKind::Weekly => Decimal::from(52),
            PeriodKind::Monthly => Decimal::from(12),
            PeriodKind::Annual => Decimal::ONE,
        }
    }

    /// Returns the lowercase name used in configuration and requests.
    pub fn as_str(self) -> &'static str {
        match self {
            PeriodKind::Weekly => "weekly",
            PeriodKind::Monthly => "monthly",
            PeriodKind::Annual => "annual",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(PeriodKind::Weekly),
            "monthly" => Ok(PeriodKind::Monthly),
            "annual" => Ok(PeriodKind::Annual),
            _ => Err(EngineError::InvalidPeriodKind {
                value: s.to_string(),
            }),
        }
    }
}

/// Which contribution thresholds were applied to a period.
///
/// A regime that does not configure thresholds for a period kind falls back
/// to its monthly thresholds. Callers can tell the two cases apart here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "basis", content = "period")]
pub enum ThresholdBasis {
    /// The period's own thresholds were configured and used.
    Exact(PeriodKind),
    /// The period had no thresholds of its own; monthly thresholds were used.
    MonthlyFallback,
}

impl ThresholdBasis {
    /// Returns true when the monthly fallback thresholds were applied.
    pub fn is_fallback(self) -> bool {
        matches!(self, ThresholdBasis::MonthlyFallback)
    }
}

/// One pay period's computed breakdown.
///
/// All monetary fields are rounded to two decimal places, and
/// `net_pay + income_tax + contribution + pension == gross` holds exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriodResult {
    /// Total gross pay for the period.
    pub gross: Decimal,
    /// Gross pay after the pension deduction, used for income tax.
    pub gross_for_tax: Decimal,
    /// Income tax for the period, including any tax offset.
    pub income_tax: Decimal,
    /// Social contribution for the period, including any contribution offset.
    pub contribution: Decimal,
    /// Employee pension deduction.
    pub pension: Decimal,
    /// Earnings on which the contribution was assessed.
    pub earnings_for_contribution: Decimal,
    /// Take-home pay.
    pub net_pay: Decimal,
    /// Sum of income tax, contribution and pension.
    pub deductions_total: Decimal,
    /// The period kind the figures are for.
    pub period: PeriodKind,
    /// Region tag carried through from the caller.
    pub region: String,
    /// Which contribution thresholds were applied.
    pub contribution_basis: ThresholdBasis,
}
