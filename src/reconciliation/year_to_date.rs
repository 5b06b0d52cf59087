//! Year-to-date and single-week queries over a rebuilt ledger.

use chrono::NaiveDate;

use crate::calculation::week_monday;
use crate::models::{PayFigures, StatementSnapshot, WeeklyLedgerEntry, YearToDate};

/// Year-to-date totals as of a given week.
///
/// Starts from the statement's own totals, which already include the anchor
/// week, and adds every ledger row strictly after the anchor week and on or
/// before `as_of_week`. Rows before the anchor are never added.
///
/// # Examples
///
/// ```
/// use payroll_ledger::models::{WeeklyLedgerEntry, YearToDate};
/// use payroll_ledger::reconciliation::year_to_date_as_of;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let anchor = NaiveDate::from_ymd_opt(2025, 11, 10).unwrap();
/// let next = NaiveDate::from_ymd_opt(2025, 11, 17).unwrap();
/// let ledger = vec![WeeklyLedgerEntry {
///     week_start: next,
///     gross: Decimal::from(500),
///     tax: Decimal::from(50),
///     contribution: Decimal::from(20),
///     pension: Decimal::from(20),
///     net: Decimal::from(410),
/// }];
/// let statement = YearToDate { gross: Decimal::from(16000), ..Default::default() };
///
/// let ytd = year_to_date_as_of(statement, anchor, &ledger, next);
/// assert_eq!(ytd.gross, Decimal::from(16500));
/// ```
pub fn year_to_date_as_of(
    statement_ytd: YearToDate,
    anchor_week: NaiveDate,
    ledger: &[WeeklyLedgerEntry],
    as_of_week: NaiveDate,
) -> YearToDate {
    ledger
        .iter()
        .filter(|entry| entry.week_start > anchor_week && entry.week_start <= as_of_week)
        .fold(statement_ytd, |mut ytd, entry| {
            ytd.add(entry.gross, entry.tax, entry.contribution, entry.pension);
            ytd
        })
}

/// The statement's own figures, when `week` is the week of its process date.
pub fn statement_week_figures(snapshot: &StatementSnapshot, week: NaiveDate) -> Option<PayFigures> {
    let process_date = snapshot.process_date()?;
    (week_monday(process_date) == week_monday(week)).then(|| snapshot.figures())
}
