//! Configuration types for the tax and contribution regime.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. A [`TaxConfig`] is an
//! immutable value: applying a tax code produces a new value instead of
//! mutating shared state, so several regimes or years can coexist.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::TaxCode;

/// Metadata about the regime, read from `regime.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeMetadata {
    /// Short regime code (e.g., "UK").
    pub code: String,
    /// Human-readable regime name.
    pub name: String,
    /// Default region tag for new profiles and ad-hoc calculations.
    pub region: String,
    /// Constants used by the weekly reconciliation.
    #[serde(default)]
    pub reconciliation: ReconciliationSettings,
}

/// Constants used when rebuilding a worker's weekly ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationSettings {
    /// Pension rate applied to reconstructed weeks.
    pub pension_rate: Decimal,
    /// Weekly earnings above this cap attract no pension.
    pub pensionable_earnings_cap: Decimal,
    /// Effective tax rate for backward weeks when the statement shows no gross.
    pub fallback_tax_rate: Decimal,
    /// Pension percentage given to a profile whose statement shows no pension.
    pub default_pension_percent: Decimal,
}

impl Default for ReconciliationSettings {
    fn default() -> Self {
        Self {
            pension_rate: Decimal::new(4, 2),
            pensionable_earnings_cap: Decimal::new(105875, 2),
            fallback_tax_rate: Decimal::new(20, 2),
            default_pension_percent: Decimal::new(4, 2),
        }
    }
}

/// Income tax band limits and rates, applied to taxable income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxBands {
    /// Upper limit of the basic rate band.
    pub basic_rate_limit: Decimal,
    /// Upper limit of the higher rate band.
    pub higher_rate_limit: Decimal,
    /// Basic rate (0.20 = 20%).
    pub basic_rate: Decimal,
    /// Higher rate.
    pub higher_rate: Decimal,
    /// Additional rate, above the higher rate limit.
    pub additional_rate: Decimal,
}

/// Primary and upper contribution thresholds for one period kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionThresholds {
    /// Earnings at or below this pay no contribution.
    pub primary: Decimal,
    /// Earnings above this pay the above-upper rate.
    pub upper: Decimal,
}

/// Social contribution configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionConfig {
    /// Weekly thresholds.
    pub weekly: ContributionThresholds,
    /// Monthly thresholds, also the fallback for unconfigured period kinds.
    pub monthly: ContributionThresholds,
    /// Annual thresholds, when the regime publishes them.
    #[serde(default)]
    pub annual: Option<ContributionThresholds>,
    /// Rate between the primary and upper thresholds.
    pub main_rate: Decimal,
    /// Rate above the upper threshold.
    pub above_upper_rate: Decimal,
}

/// The complete income tax and contribution configuration for one tax year.
///
/// # Example
///
/// ```
/// use payroll_ledger::config::TaxConfig;
/// use payroll_ledger::models::TaxCode;
///
/// let config = TaxConfig::uk_2024_25();
/// assert!(config.validate().is_ok());
///
/// let coded = config.with_tax_code(TaxCode::parse("BR"));
/// assert!(coded.tax_code.as_ref().unwrap().is_no_allowance());
/// assert!(config.tax_code.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    /// First day of the tax year this configuration applies to.
    pub effective_date: NaiveDate,
    /// Default personal allowance.
    pub personal_allowance: Decimal,
    /// Income above which the allowance is tapered away.
    pub taper_start: Decimal,
    /// Income at which the taper would fully remove the allowance.
    ///
    /// Carried for reference; the taper itself is bounded only by zero.
    pub taper_end: Decimal,
    /// Income tax bands.
    pub bands: IncomeTaxBands,
    /// Contribution thresholds and rates.
    pub contribution: ContributionConfig,
    /// Tax code overriding the default allowance.
    #[serde(default)]
    pub tax_code: Option<TaxCode>,
}

impl TaxConfig {
    /// The 2024/25 rest-of-UK figures.
    pub fn uk_2024_25() -> Self {
        Self {
            effective_date: NaiveDate::from_ymd_opt(2024, 4, 6).expect("Valid tax year start"),
            personal_allowance: Decimal::from(12570),
            taper_start: Decimal::from(100_000),
            taper_end: Decimal::from(125_140),
            bands: IncomeTaxBands {
                basic_rate_limit: Decimal::from(37_700),
                higher_rate_limit: Decimal::from(125_140),
                basic_rate: Decimal::new(20, 2),
                higher_rate: Decimal::new(40, 2),
                additional_rate: Decimal::new(45, 2),
            },
            contribution: ContributionConfig {
                weekly: ContributionThresholds {
                    primary: Decimal::from(242),
                    upper: Decimal::from(967),
                },
                monthly: ContributionThresholds {
                    primary: Decimal::from(1048),
                    upper: Decimal::from(4189),
                },
                annual: None,
                main_rate: Decimal::new(8, 2),
                above_upper_rate: Decimal::new(2, 2),
            },
            tax_code: None,
        }
    }

    /// Returns a copy of this configuration with the given tax code applied.
    pub fn with_tax_code(&self, tax_code: Option<TaxCode>) -> Self {
        Self {
            tax_code,
            ..self.clone()
        }
    }

    /// Checks that boundaries are non-decreasing and amounts non-negative.
    pub fn validate(&self) -> EngineResult<()> {
        let non_negative = [
            ("personal_allowance", self.personal_allowance),
            ("taper_start", self.taper_start),
            ("taper_end", self.taper_end),
            ("bands.basic_rate_limit", self.bands.basic_rate_limit),
            ("bands.basic_rate", self.bands.basic_rate),
            ("bands.higher_rate", self.bands.higher_rate),
            ("bands.additional_rate", self.bands.additional_rate),
            ("contribution.main_rate", self.contribution.main_rate),
            ("contribution.above_upper_rate", self.contribution.above_upper_rate),
        ];
        for (field, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(invalid(field, format!("must not be negative, got {}", value)));
            }
        }

        ensure_ordered(
            "taper_start",
            self.taper_start,
            "taper_end",
            self.taper_end,
        )?;
        ensure_ordered(
            "bands.basic_rate_limit",
            self.bands.basic_rate_limit,
            "bands.higher_rate_limit",
            self.bands.higher_rate_limit,
        )?;

        let thresholds = [
            ("contribution.weekly", Some(&self.contribution.weekly)),
            ("contribution.monthly", Some(&self.contribution.monthly)),
            ("contribution.annual", self.contribution.annual.as_ref()),
        ];
        for (field, thresholds) in thresholds {
            if let Some(t) = thresholds {
                if t.primary < Decimal::ZERO {
                    return Err(invalid(
                        &format!("{}.primary", field),
                        format!("must not be negative, got {}", t.primary),
                    ));
                }
                ensure_ordered(
                    &format!("{}.primary", field),
                    t.primary,
                    &format!("{}.upper", field),
                    t.upper,
                )?;
            }
        }

        Ok(())
    }
}

fn ensure_ordered(
    lower_field: &str,
    lower: Decimal,
    upper_field: &str,
    upper: Decimal,
) -> EngineResult<()> {
    if lower > upper {
        return Err(invalid(
            lower_field,
            format!("{} must not exceed {} ({})", lower, upper_field, upper),
        ));
    }
    Ok(())
}

fn invalid(field: &str, message: String) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message,
    }
}

/// The regime metadata plus every configured tax year.
#[derive(Debug, Clone)]
pub struct TaxRegime {
    metadata: RegimeMetadata,
    /// Tax year configurations (sorted oldest first).
    years: Vec<TaxConfig>,
}

impl TaxRegime {
    /// Creates a regime from its parts, sorting years by effective date.
    pub fn new(metadata: RegimeMetadata, years: Vec<TaxConfig>) -> Self {
        let mut sorted_years = years;
        sorted_years.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            years: sorted_years,
        }
    }

    /// Returns the regime metadata.
    pub fn metadata(&self) -> &RegimeMetadata {
        &self.metadata
    }

    /// Returns all tax year configurations, oldest first.
    pub fn years(&self) -> &[TaxConfig] {
        &self.years
    }
}
