//! Per-period social contribution calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{ContributionThresholds, TaxConfig};
use crate::models::{PeriodKind, ThresholdBasis};

use super::round_money;

/// A contribution amount together with the thresholds basis used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionAssessment {
    /// The contribution for the period, rounded to the penny.
    pub amount: Decimal,
    /// Earnings between the primary and upper thresholds.
    pub main_band: Decimal,
    /// Earnings above the upper threshold.
    pub above_band: Decimal,
    /// Whether the period's own thresholds or the monthly fallback applied.
    pub basis: ThresholdBasis,
}

/// Selects the thresholds for a period kind.
///
/// Weekly and monthly periods always have thresholds. Annual periods use the
/// annual thresholds when configured and fall back to the monthly ones
/// otherwise; the returned basis records which happened.
pub fn thresholds_for(
    period: PeriodKind,
    config: &TaxConfig,
) -> (ContributionThresholds, ThresholdBasis) {
    let contribution = &config.contribution;
    match period {
        PeriodKind::Weekly => (contribution.weekly, ThresholdBasis::Exact(period)),
        PeriodKind::Monthly => (contribution.monthly, ThresholdBasis::Exact(period)),
        PeriodKind::Annual => match contribution.annual {
            Some(annual) => (annual, ThresholdBasis::Exact(period)),
            None => (contribution.monthly, ThresholdBasis::MonthlyFallback),
        },
    }
}

/// Computes the contribution due on one period's earnings.
///
/// Earnings at or below the primary threshold pay nothing. Earnings between
/// the primary and upper thresholds pay the main rate and earnings above the
/// upper threshold pay the above-upper rate.
///
/// # Examples
///
/// ```
/// use payroll_ledger::calculation::contribution_for_period;
/// use payroll_ledger::config::TaxConfig;
/// use payroll_ledger::models::PeriodKind;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = TaxConfig::uk_2024_25();
/// let assessment = contribution_for_period(Decimal::from(475), PeriodKind::Weekly, &config);
/// // (475 - 242) x 8%
/// assert_eq!(assessment.amount, Decimal::from_str("18.64").unwrap());
/// assert!(!assessment.basis.is_fallback());
/// ```
pub fn contribution_for_period(
    period_gross: Decimal,
    period: PeriodKind,
    config: &TaxConfig,
) -> ContributionAssessment {
    let (thresholds, basis) = thresholds_for(period, config);

    if period_gross <= thresholds.primary {
        return ContributionAssessment {
            amount: Decimal::ZERO,
            main_band: Decimal::ZERO,
            above_band: Decimal::ZERO,
            basis,
        };
    }

    let main_band = (period_gross.min(thresholds.upper) - thresholds.primary).max(Decimal::ZERO);
    let above_band = (period_gross - thresholds.upper).max(Decimal::ZERO);
    let amount = main_band * config.contribution.main_rate
        + above_band * config.contribution.above_upper_rate;

    ContributionAssessment {
        amount: round_money(amount),
        main_band,
        above_band,
        basis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_at_primary_threshold_pays_nothing() {
        let config = TaxConfig::uk_2024_25();
        let assessment = contribution_for_period(dec("242.00"), PeriodKind::Weekly, &config);
        assert_eq!(assessment.amount, Decimal::ZERO);
    }

    #[test]
    fn test_one_penny_above_primary_threshold_enters_main_band() {
        let config = TaxConfig::uk_2024_25();
        let assessment = contribution_for_period(dec("242.01"), PeriodKind::Weekly, &config);
        assert_eq!(assessment.main_band, dec("0.01"));
        // 0.0008 rounds away
        assert_eq!(assessment.amount, Decimal::ZERO);

        // 0.07 x 8% = 0.0056
        let assessment = contribution_for_period(dec("242.07"), PeriodKind::Weekly, &config);
        assert_eq!(assessment.amount, dec("0.01"));
    }

    #[test]
    fn test_above_upper_threshold() {
        let config = TaxConfig::uk_2024_25();
        // (967 - 242) x 8% + (1067 - 967) x 2% = 58.00 + 2.00
        let assessment = contribution_for_period(dec("1067.00"), PeriodKind::Weekly, &config);
        assert_eq!(assessment.main_band, dec("725.00"));
        assert_eq!(assessment.above_band, dec("100.00"));
        assert_eq!(assessment.amount, dec("60.00"));
    }

    #[test]
    fn test_monthly_thresholds() {
        let config = TaxConfig::uk_2024_25();
        // (2000 - 1048) x 8%
        let assessment = contribution_for_period(dec("2000.00"), PeriodKind::Monthly, &config);
        assert_eq!(assessment.amount, dec("76.16"));
        assert_eq!(assessment.basis, ThresholdBasis::Exact(PeriodKind::Monthly));
    }

    #[test]
    fn test_annual_without_thresholds_falls_back_to_monthly() {
        let config = TaxConfig::uk_2024_25();
        let annual = contribution_for_period(dec("2000.00"), PeriodKind::Annual, &config);
        let monthly = contribution_for_period(dec("2000.00"), PeriodKind::Monthly, &config);
        assert_eq!(annual.amount, monthly.amount);
        assert_eq!(annual.basis, ThresholdBasis::MonthlyFallback);
    }

    #[test]
    fn test_annual_with_configured_thresholds() {
        let mut config = TaxConfig::uk_2024_25();
        config.contribution.annual = Some(ContributionThresholds {
            primary: dec("12570"),
            upper: dec("50270"),
        });
        // (20000 - 12570) x 8%
        let assessment = contribution_for_period(dec("20000"), PeriodKind::Annual, &config);
        assert_eq!(assessment.amount, dec("594.40"));
        assert_eq!(assessment.basis, ThresholdBasis::Exact(PeriodKind::Annual));
    }

    #[test]
    fn test_zero_and_negative_earnings_pay_nothing() {
        let config = TaxConfig::uk_2024_25();
        assert_eq!(
            contribution_for_period(Decimal::ZERO, PeriodKind::Weekly, &config).amount,
            Decimal::ZERO
        );
        assert_eq!(
            contribution_for_period(dec("-50"), PeriodKind::Weekly, &config).amount,
            Decimal::ZERO
        );
    }
}
