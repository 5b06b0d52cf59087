//! Pay statement snapshot model.
//!
//! A [`StatementSnapshot`] is the record produced by the statement text
//! extraction step: one week's figures from a real pay statement plus its
//! year-to-date totals. Every field may be missing. Monetary fields that are
//! missing read as zero; dates and period numbers that are missing or
//! malformed read as unresolvable.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::{PayFigures, TaxCode, YearToDate};

/// The date format printed on pay statements.
pub const PROCESS_DATE_FORMAT: &str = "%d/%m/%Y";

/// Figures extracted from a single pay statement.
///
/// Field aliases accept the key names used by the extraction output.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::StatementSnapshot;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let snapshot: StatementSnapshot = serde_json::from_str(r#"{
///     "process_date": "14/11/2025",
///     "tax_code": "1257L",
///     "total_gross_pay": "500.00",
///     "paye_tax": "56.80"
/// }"#).unwrap();
///
/// assert_eq!(snapshot.process_date(), NaiveDate::from_ymd_opt(2025, 11, 14));
/// assert_eq!(snapshot.contribution(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSnapshot {
    /// Process date as printed, `dd/mm/yyyy`.
    #[serde(default)]
    pub process_date: Option<String>,
    /// Tax period number (week of the tax year, starting at 1).
    #[serde(default, deserialize_with = "lenient_period_number")]
    pub tax_period: Option<u32>,
    /// Tax code as printed.
    #[serde(default)]
    pub tax_code: Option<String>,
    /// National insurance number.
    #[serde(default, alias = "ni_number")]
    pub national_insurance_number: Option<String>,
    /// Gross pay for the statement week.
    #[serde(default, alias = "total_gross_pay")]
    pub gross_pay: Option<Decimal>,
    /// Income tax deducted for the statement week.
    #[serde(default, alias = "paye_tax")]
    pub tax_paid: Option<Decimal>,
    /// Contribution deducted for the statement week.
    #[serde(default, alias = "national_insurance")]
    pub contribution_paid: Option<Decimal>,
    /// Pension deducted for the statement week.
    #[serde(default)]
    pub pension: Option<Decimal>,
    /// Gross pay to date.
    #[serde(default)]
    pub ytd_gross: Option<Decimal>,
    /// Income tax to date.
    #[serde(default)]
    pub ytd_tax: Option<Decimal>,
    /// Contribution to date.
    #[serde(default, alias = "ytd_ni")]
    pub ytd_contribution: Option<Decimal>,
    /// Pension to date.
    #[serde(default)]
    pub ytd_pension: Option<Decimal>,
}

impl StatementSnapshot {
    /// Parses the printed process date. Malformed dates, and years outside
    /// four digits, read as `None`.
    pub fn process_date(&self) -> Option<NaiveDate> {
        let raw = self.process_date.as_deref()?.trim();
        match NaiveDate::parse_from_str(raw, PROCESS_DATE_FORMAT) {
            Ok(date) if (1000..=9999).contains(&date.year()) => Some(date),
            Ok(date) => {
                debug!(process_date = %raw, year = date.year(), "Statement process date out of range");
                None
            }
            Err(err) => {
                debug!(process_date = %raw, error = %err, "Unparseable statement process date");
                None
            }
        }
    }

    /// Returns the tax period number. Period 0 reads as absent.
    pub fn tax_period(&self) -> Option<u32> {
        self.tax_period.filter(|period| *period > 0)
    }

    /// Returns the parsed tax code, if one was printed.
    pub fn tax_code(&self) -> Option<TaxCode> {
        self.tax_code.as_deref().and_then(TaxCode::parse)
    }

    /// Gross pay, zero when absent.
    pub fn gross(&self) -> Decimal {
        self.gross_pay.unwrap_or_default()
    }

    /// Income tax, zero when absent.
    pub fn tax(&self) -> Decimal {
        self.tax_paid.unwrap_or_default()
    }

    /// Contribution, zero when absent.
    pub fn contribution(&self) -> Decimal {
        self.contribution_paid.unwrap_or_default()
    }

    /// Pension, zero when absent.
    pub fn pension_deducted(&self) -> Decimal {
        self.pension.unwrap_or_default()
    }

    /// The statement week's figures, with net pay derived from the deductions.
    pub fn figures(&self) -> PayFigures {
        PayFigures::from_deductions(
            self.gross(),
            self.tax(),
            self.contribution(),
            self.pension_deducted(),
        )
    }

    /// The year-to-date totals printed on the statement.
    pub fn year_to_date(&self) -> YearToDate {
        YearToDate {
            gross: self.ytd_gross.unwrap_or_default(),
            tax: self.ytd_tax.unwrap_or_default(),
            contribution: self.ytd_contribution.unwrap_or_default(),
            pension: self.ytd_pension.unwrap_or_default(),
        }
    }
}

/// Accepts a period number written either as a JSON number or a string.
fn lenient_period_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPeriod {
        Number(u32),
        Text(String),
    }

    Ok(match Option::<RawPeriod>::deserialize(deserializer)? {
        Some(RawPeriod::Number(n)) => Some(n),
        Some(RawPeriod::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}
