//! On-demand pay calculation, independent of the ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{Offsets, calc_pay_period};
use crate::config::{RegimeMetadata, TaxConfig};
use crate::models::{PayPeriodResult, PayrollProfile, PeriodKind};

/// A what-if calculation request.
///
/// Missing fields are filled from the worker's profile, then from the
/// regime defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatIfRequest {
    /// Gross pay for the period.
    pub gross: Decimal,
    /// Period kind the gross covers.
    #[serde(default = "default_period")]
    pub period: PeriodKind,
    /// Region tag; defaults to the profile's, then the regime's.
    #[serde(default)]
    pub region: Option<String>,
    /// Pension percentage; defaults to the profile's, then zero.
    #[serde(default)]
    pub pension_percent: Option<Decimal>,
    /// Apply the profile's tax code and offsets. Defaults to true.
    #[serde(default = "default_use_profile")]
    pub use_profile: bool,
}

fn default_period() -> PeriodKind {
    PeriodKind::Weekly
}

fn default_use_profile() -> bool {
    true
}

impl WhatIfRequest {
    /// A weekly request for `gross` with everything else defaulted.
    pub fn weekly(gross: Decimal) -> Self {
        Self {
            gross,
            period: PeriodKind::Weekly,
            region: None,
            pension_percent: None,
            use_profile: true,
        }
    }
}

/// Resolves a what-if request against an optional profile and computes it.
pub fn calculate_what_if(
    request: &WhatIfRequest,
    profile: Option<&PayrollProfile>,
    metadata: &RegimeMetadata,
    config: &TaxConfig,
) -> PayPeriodResult {
    let region = request
        .region
        .clone()
        .or_else(|| profile.map(|p| p.region.clone()))
        .unwrap_or_else(|| metadata.region.clone());

    let pension_percent = request
        .pension_percent
        .or_else(|| profile.map(|p| p.pension_percent))
        .unwrap_or_default();

    let (offsets, config) = match profile {
        Some(profile) if request.use_profile => (
            Offsets {
                tax: profile.tax_offset,
                contribution: profile.contribution_offset,
            },
            config.with_tax_code(profile.tax_code.clone()),
        ),
        _ => (Offsets::default(), config.clone()),
    };

    calc_pay_period(
        request.gross,
        request.period,
        &region,
        pension_percent,
        offsets,
        &config,
    )
}
