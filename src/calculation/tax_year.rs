//! Week and tax-year date helpers.
//!
//! The ledger is keyed by the Monday of each week, and a tax year begins on
//! April 6.

use chrono::{Datelike, Duration, NaiveDate};

/// Returns the Monday of the week containing `date`.
///
/// # Examples
///
/// ```
/// use payroll_ledger::calculation::week_monday;
/// use chrono::NaiveDate;
///
/// // Friday 14 November 2025
/// let friday = NaiveDate::from_ymd_opt(2025, 11, 14).unwrap();
/// assert_eq!(week_monday(friday), NaiveDate::from_ymd_opt(2025, 11, 10).unwrap());
/// ```
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Returns April 6 of `year`.
pub fn tax_year_start(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 4, 6).unwrap_or(NaiveDate::MIN)
}

/// Returns the start of the tax year containing `date`.
///
/// Dates from January 1 to April 5 belong to the tax year that began in the
/// previous calendar year.
pub fn tax_year_start_for(date: NaiveDate) -> NaiveDate {
    let this_year = tax_year_start(date.year());
    if date < this_year {
        tax_year_start(date.year() - 1)
    } else {
        this_year
    }
}

/// Highest weekly tax period; week 53 holds the last day or two of a year.
pub const MAX_TAX_PERIOD: u32 = 53;

/// Returns the first day of tax period `period` (1-based, in weeks) of the
/// tax year starting in `tax_year`.
///
/// Period 1 is the tax-year start itself; a period of 0 is treated as 1.
/// Periods above [`MAX_TAX_PERIOD`] do not exist and yield `None`.
pub fn tax_period_to_date(tax_year: i32, period: u32) -> Option<NaiveDate> {
    if period > MAX_TAX_PERIOD {
        return None;
    }
    let offset = i64::from(period.saturating_sub(1));
    tax_year_start(tax_year).checked_add_signed(Duration::weeks(offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_monday_for_each_weekday() {
        let monday = date(2025, 11, 10);
        for offset in 0..7 {
            assert_eq!(week_monday(monday + Duration::days(offset)), monday);
        }
    }

    #[test]
    fn test_week_monday_crosses_month_boundary() {
        // Sunday 2 March 2025
        assert_eq!(week_monday(date(2025, 3, 2)), date(2025, 2, 24));
    }

    #[test]
    fn test_tax_year_start_for_before_and_after_april_6() {
        assert_eq!(tax_year_start_for(date(2025, 4, 5)), date(2024, 4, 6));
        assert_eq!(tax_year_start_for(date(2025, 4, 6)), date(2025, 4, 6));
        assert_eq!(tax_year_start_for(date(2026, 1, 15)), date(2025, 4, 6));
        assert_eq!(tax_year_start_for(date(2025, 12, 31)), date(2025, 4, 6));
    }

    #[test]
    fn test_tax_period_to_date() {
        assert_eq!(tax_period_to_date(2025, 1), Some(date(2025, 4, 6)));
        assert_eq!(tax_period_to_date(2025, 10), Some(date(2025, 6, 8)));
        assert_eq!(tax_period_to_date(2025, 0), Some(date(2025, 4, 6)));
        assert_eq!(tax_period_to_date(2025, 53), Some(date(2026, 4, 5)));
    }

    #[test]
    fn test_tax_period_out_of_range_is_none() {
        assert_eq!(tax_period_to_date(2025, 54), None);
        assert_eq!(tax_period_to_date(2025, 4_000_000_000), None);
        assert_eq!(tax_period_to_date(2025, u32::MAX), None);
    }
}
