//! Per-worker payroll profile.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tracing::debug;

use crate::config::RegimeMetadata;

use super::{PayFigures, StatementSnapshot, TaxCode, WorkerId, YearToDate};

/// The live payroll profile of one worker.
///
/// Created on first statement ingestion. Later ingestions overwrite the
/// baseline, tax code and pension percentage; only reconciliation writes the
/// year-to-date totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollProfile {
    /// The worker this profile belongs to.
    pub worker: WorkerId,
    /// Tax code from the most recent statement that printed one.
    pub tax_code: Option<TaxCode>,
    /// National insurance number from the most recent statement that printed one.
    pub national_insurance_number: Option<String>,
    /// Region tag.
    pub region: String,
    /// Employee pension contribution as a fraction of gross (0.04 = 4%).
    pub pension_percent: Decimal,
    /// Figures from the anchor statement week.
    pub baseline: PayFigures,
    /// Year-to-date totals as of the latest reconciliation.
    pub year_to_date: YearToDate,
    /// Added to projected income tax to align with real statements.
    pub tax_offset: Decimal,
    /// Added to projected contribution to align with real statements.
    pub contribution_offset: Decimal,
}

impl PayrollProfile {
    /// Creates an empty profile for a worker.
    pub fn new(worker: WorkerId, region: impl Into<String>, pension_percent: Decimal) -> Self {
        Self {
            worker,
            tax_code: None,
            national_insurance_number: None,
            region: region.into(),
            pension_percent,
            baseline: PayFigures::default(),
            year_to_date: YearToDate::default(),
            tax_offset: Decimal::ZERO,
            contribution_offset: Decimal::ZERO,
        }
    }

    /// Builds the profile that results from ingesting a statement.
    ///
    /// Tax code and national insurance number come from the statement when it
    /// prints them and are otherwise kept from `prior`. The pension percentage
    /// is the statement's pension over its gross (4 dp) when both are
    /// positive; otherwise a non-zero prior percentage is kept, and failing
    /// that the regime default applies. The baseline is always replaced.
    /// Region, offsets and year-to-date totals carry over from `prior`.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_ledger::config::{ReconciliationSettings, RegimeMetadata};
    /// use payroll_ledger::models::{PayrollProfile, StatementSnapshot, WorkerId};
    /// use rust_decimal::Decimal;
    ///
    /// let metadata = RegimeMetadata {
    ///     code: "UK".to_string(),
    ///     name: "United Kingdom PAYE".to_string(),
    ///     region: "rUK".to_string(),
    ///     reconciliation: ReconciliationSettings::default(),
    /// };
    /// let snapshot = StatementSnapshot {
    ///     gross_pay: Some(Decimal::from(500)),
    ///     pension: Some(Decimal::from(25)),
    ///     ..Default::default()
    /// };
    ///
    /// let profile = PayrollProfile::ingest_statement(None, WorkerId::new("w1"), &snapshot, &metadata);
    /// assert_eq!(profile.pension_percent, Decimal::new(5, 2));
    /// assert_eq!(profile.region, "rUK");
    /// ```
    pub fn ingest_statement(
        prior: Option<&PayrollProfile>,
        worker: WorkerId,
        snapshot: &StatementSnapshot,
        metadata: &RegimeMetadata,
    ) -> Self {
        let mut profile = match prior {
            Some(prior) => prior.clone(),
            None => Self::new(worker, metadata.region.clone(), Decimal::ZERO),
        };

        if let Some(code) = snapshot.tax_code() {
            profile.tax_code = Some(code);
        }
        if let Some(ni) = snapshot
            .national_insurance_number
            .as_deref()
            .map(str::trim)
            .filter(|ni| !ni.is_empty())
        {
            profile.national_insurance_number = Some(ni.to_string());
        }

        let gross = snapshot.gross();
        let pension = snapshot.pension_deducted();
        if gross > Decimal::ZERO && pension > Decimal::ZERO {
            profile.pension_percent = (pension / gross).round_dp(4);
        } else if profile.pension_percent.is_zero() {
            debug!(
                worker = %profile.worker,
                default = %metadata.reconciliation.default_pension_percent,
                "Statement shows no pension, using default percentage"
            );
            profile.pension_percent = metadata.reconciliation.default_pension_percent;
        }

        profile.baseline = snapshot.figures();
        profile
    }

    /// Returns a copy with the year-to-date totals replaced.
    pub fn with_year_to_date(&self, year_to_date: YearToDate) -> Self {
        Self {
            year_to_date,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_is_empty() {
        let profile = PayrollProfile::new(WorkerId::new("w1"), "rUK", Decimal::new(4, 2));
        assert_eq!(profile.region, "rUK");
        assert!(profile.tax_code.is_none());
        assert_eq!(profile.baseline, PayFigures::default());
        assert_eq!(profile.year_to_date, YearToDate::default());
        assert_eq!(profile.tax_offset, Decimal::ZERO);
    }

    #[test]
    fn test_with_year_to_date_only_touches_totals() {
        let profile = PayrollProfile::new(WorkerId::new("w1"), "rUK", Decimal::new(4, 2));
        let ytd = YearToDate {
            gross: Decimal::from(1000),
            ..Default::default()
        };
        let updated = profile.with_year_to_date(ytd);
        assert_eq!(updated.year_to_date.gross, Decimal::from(1000));
        assert_eq!(updated.worker, profile.worker);
        assert_eq!(updated.pension_percent, profile.pension_percent);
    }

    fn metadata() -> RegimeMetadata {
        RegimeMetadata {
            code: "UK".to_string(),
            name: "United Kingdom PAYE".to_string(),
            region: "rUK".to_string(),
            reconciliation: crate::config::ReconciliationSettings::default(),
        }
    }

    fn statement(gross: &str, tax: &str, contribution: &str, pension: &str) -> StatementSnapshot {
        StatementSnapshot {
            process_date: Some("14/11/2025".to_string()),
            tax_code: Some("1257L".to_string()),
            national_insurance_number: Some("QQ123456C".to_string()),
            gross_pay: Some(gross.parse().unwrap()),
            tax_paid: Some(tax.parse().unwrap()),
            contribution_paid: Some(contribution.parse().unwrap()),
            pension: Some(pension.parse().unwrap()),
            ..Default::default()
        }
    }

    /// First ingestion creates the profile from the statement.
    #[test]
    fn test_ingest_creates_profile() {
        let snapshot = statement("612.40", "80.20", "29.64", "24.50");
        let profile =
            PayrollProfile::ingest_statement(None, WorkerId::new("w1"), &snapshot, &metadata());

        assert_eq!(profile.worker, WorkerId::new("w1"));
        assert_eq!(profile.tax_code, TaxCode::parse("1257L"));
        assert_eq!(profile.national_insurance_number.as_deref(), Some("QQ123456C"));
        assert_eq!(profile.region, "rUK");
        // 24.50 / 612.40 = 0.040006...
        assert_eq!(profile.pension_percent, Decimal::new(400, 4));
        assert_eq!(profile.baseline.gross, Decimal::new(61240, 2));
        assert_eq!(profile.baseline.net, Decimal::new(47806, 2));
        assert_eq!(profile.year_to_date, YearToDate::default());
    }

    /// Missing fields keep what the prior profile knew.
    #[test]
    fn test_ingest_keeps_prior_code_offsets_and_totals() {
        let mut prior = PayrollProfile::new(WorkerId::new("w1"), "Scotland", Decimal::new(5, 2));
        prior.tax_code = TaxCode::parse("BR");
        prior.national_insurance_number = Some("QQ000000A".to_string());
        prior.tax_offset = Decimal::new(150, 2);
        prior.year_to_date.gross = Decimal::from(9000);

        let snapshot = StatementSnapshot {
            gross_pay: Some(Decimal::from(400)),
            ..Default::default()
        };
        let profile =
            PayrollProfile::ingest_statement(Some(&prior), WorkerId::new("w1"), &snapshot, &metadata());

        assert_eq!(profile.tax_code, TaxCode::parse("BR"));
        assert_eq!(profile.national_insurance_number.as_deref(), Some("QQ000000A"));
        assert_eq!(profile.region, "Scotland");
        assert_eq!(profile.pension_percent, Decimal::new(5, 2));
        assert_eq!(profile.tax_offset, Decimal::new(150, 2));
        assert_eq!(profile.year_to_date.gross, Decimal::from(9000));
        assert_eq!(profile.baseline.gross, Decimal::from(400));
        assert_eq!(profile.baseline.net, Decimal::from(400));
    }

    /// No pension on the statement and nothing known before: regime default.
    #[test]
    fn test_ingest_defaults_pension_percent() {
        let snapshot = statement("500.00", "50.00", "20.00", "0");
        let profile =
            PayrollProfile::ingest_statement(None, WorkerId::new("w1"), &snapshot, &metadata());
        assert_eq!(profile.pension_percent, Decimal::new(4, 2));
    }

    /// Re-ingesting overwrites the baseline.
    #[test]
    fn test_ingest_overwrites_baseline() {
        let first = statement("612.40", "80.20", "29.64", "24.50");
        let second = statement("500.00", "56.80", "18.64", "25.00");

        let profile =
            PayrollProfile::ingest_statement(None, WorkerId::new("w1"), &first, &metadata());
        let profile =
            PayrollProfile::ingest_statement(Some(&profile), WorkerId::new("w1"), &second, &metadata());

        assert_eq!(profile.baseline.gross, Decimal::from(500));
        assert_eq!(profile.baseline.net, Decimal::new(39956, 2));
        assert_eq!(profile.pension_percent, Decimal::new(500, 4));
    }
}
