//! Anchor week resolution.
//!
//! The anchor week is the week of the most recent real pay statement. It is
//! taken from the statement's process date when that parses, otherwise from
//! its tax period number counted in weeks from the start of the current tax
//! year.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculation::{tax_period_to_date, tax_year_start_for, week_monday};
use crate::models::{AuditStep, StatementSnapshot};

/// How the anchor week was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "source")]
pub enum AnchorSource {
    /// The statement's process date.
    ProcessDate {
        /// The parsed process date.
        date: NaiveDate,
    },
    /// The statement's tax period number.
    TaxPeriod {
        /// The 1-based weekly period number.
        number: u32,
        /// Start of the tax year the period was counted from.
        tax_year_start: NaiveDate,
    },
}

/// The resolved anchor week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    /// Monday of the anchor week.
    pub week_start: NaiveDate,
    /// Which statement field produced it.
    pub source: AnchorSource,
}

impl Anchor {
    /// Records this resolution as an audit step.
    pub fn audit_step(&self, step_number: u32) -> AuditStep {
        let reasoning = match self.source {
            AnchorSource::ProcessDate { date } => format!(
                "Process date {} falls in the week starting {}",
                date, self.week_start
            ),
            AnchorSource::TaxPeriod {
                number,
                tax_year_start,
            } => format!(
                "Tax period {} counted from tax year start {} falls in the week starting {}",
                number, tax_year_start, self.week_start
            ),
        };

        AuditStep {
            step_number,
            rule_id: "anchor_resolution".to_string(),
            rule_name: "Anchor Week Resolution".to_string(),
            input: serde_json::json!(self.source),
            output: serde_json::json!({
                "week_start": self.week_start.to_string()
            }),
            reasoning,
        }
    }
}

/// Resolves the anchor week of a statement.
///
/// A process date that parses wins. Otherwise a tax period number from 1 to
/// 53 is counted from the start of the tax year containing `today`. Returns
/// `None` when neither is usable.
///
/// # Examples
///
/// ```
/// use payroll_ledger::models::StatementSnapshot;
/// use payroll_ledger::reconciliation::{AnchorSource, resolve_anchor};
/// use chrono::NaiveDate;
///
/// let snapshot = StatementSnapshot {
///     tax_period: Some(10),
///     ..Default::default()
/// };
/// let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
///
/// let anchor = resolve_anchor(&snapshot, today).unwrap();
/// // Period 10 of the tax year starting 6 April 2025 is Sunday 8 June 2025
/// assert_eq!(anchor.week_start, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
/// assert!(matches!(anchor.source, AnchorSource::TaxPeriod { number: 10, .. }));
/// ```
pub fn resolve_anchor(snapshot: &StatementSnapshot, today: NaiveDate) -> Option<Anchor> {
    if let Some(date) = snapshot.process_date() {
        return Some(Anchor {
            week_start: week_monday(date),
            source: AnchorSource::ProcessDate { date },
        });
    }

    let number = snapshot.tax_period()?;
    let tax_year_start = tax_year_start_for(today);
    let Some(period_date) = tax_period_to_date(tax_year_start.year(), number) else {
        debug!(tax_period = number, "Tax period out of range");
        return None;
    };

    Some(Anchor {
        week_start: week_monday(period_date),
        source: AnchorSource::TaxPeriod {
            number,
            tax_year_start,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn snapshot(process_date: Option<&str>, tax_period: Option<u32>) -> StatementSnapshot {
        StatementSnapshot {
            process_date: process_date.map(str::to_string),
            tax_period,
            ..Default::default()
        }
    }

    #[test]
    fn test_process_date_maps_to_monday() {
        let anchor = resolve_anchor(&snapshot(Some("14/11/2025"), Some(3)), date(2026, 1, 1)).unwrap();
        assert_eq!(anchor.week_start, date(2025, 11, 10));
        assert_eq!(
            anchor.source,
            AnchorSource::ProcessDate {
                date: date(2025, 11, 14)
            }
        );
    }

    #[test]
    fn test_malformed_process_date_falls_through_to_tax_period() {
        let anchor = resolve_anchor(&snapshot(Some("2025-11-14"), Some(1)), date(2025, 5, 1)).unwrap();
        // 6 April 2025 is a Sunday
        assert_eq!(anchor.week_start, date(2025, 3, 31));
        assert!(matches!(anchor.source, AnchorSource::TaxPeriod { number: 1, .. }));
    }

    /// Tax period 10 with today just before the April boundary uses the
    /// previous calendar year's tax year.
    #[test]
    fn test_tax_period_before_april_6_uses_previous_year() {
        let anchor = resolve_anchor(&snapshot(None, Some(10)), date(2025, 4, 5)).unwrap();
        // 6 April 2024 + 9 weeks = Saturday 8 June 2024
        assert_eq!(anchor.week_start, date(2024, 6, 3));
        assert_eq!(
            anchor.source,
            AnchorSource::TaxPeriod {
                number: 10,
                tax_year_start: date(2024, 4, 6)
            }
        );
    }

    /// Tax period 10 with today on the April boundary uses this year.
    #[test]
    fn test_tax_period_from_april_6_uses_current_year() {
        let anchor = resolve_anchor(&snapshot(None, Some(10)), date(2025, 4, 6)).unwrap();
        // 6 April 2025 + 9 weeks = Sunday 8 June 2025
        assert_eq!(anchor.week_start, date(2025, 6, 2));
        assert_eq!(
            anchor.source,
            AnchorSource::TaxPeriod {
                number: 10,
                tax_year_start: date(2025, 4, 6)
            }
        );
    }

    #[test]
    fn test_unresolvable_without_date_or_period() {
        assert!(resolve_anchor(&snapshot(None, None), date(2025, 6, 1)).is_none());
        assert!(resolve_anchor(&snapshot(Some("garbage"), Some(0)), date(2025, 6, 1)).is_none());
    }

    #[test]
    fn test_tax_period_beyond_year_is_unresolvable() {
        let extracted: StatementSnapshot =
            serde_json::from_str(r#"{"tax_period": "4000000000", "total_gross_pay": "500.00"}"#)
                .unwrap();
        assert!(resolve_anchor(&extracted, date(2025, 11, 21)).is_none());
        assert!(resolve_anchor(&snapshot(None, Some(54)), date(2025, 11, 21)).is_none());
        assert!(resolve_anchor(&snapshot(None, Some(u32::MAX)), date(2025, 11, 21)).is_none());
    }

    #[test]
    fn test_tax_period_53_resolves() {
        let anchor = resolve_anchor(&snapshot(None, Some(53)), date(2026, 4, 5)).unwrap();
        // 6 April 2025 + 52 weeks = Sunday 5 April 2026
        assert_eq!(anchor.week_start, date(2026, 3, 30));
    }

    #[test]
    fn test_audit_step_records_source() {
        let anchor = resolve_anchor(&snapshot(None, Some(10)), date(2025, 4, 6)).unwrap();
        let step = anchor.audit_step(1);
        assert_eq!(step.rule_id, "anchor_resolution");
        assert_eq!(step.input["source"], "tax_period");
        assert_eq!(step.input["number"], 10);
        assert_eq!(step.output["week_start"], "2025-06-02");
        assert!(step.reasoning.contains("Tax period 10"));
    }
}
