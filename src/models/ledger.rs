//! Worker identity, time log rows and weekly ledger entries.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifies a worker across the profile, time log and ledger.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(String);

impl WorkerId {
    /// Creates a worker id from any string-like identity.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One logged day of work, owned by the time-tracking collaborator.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::TimeLogRow;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let row = TimeLogRow::new(
///     NaiveDate::from_ymd_opt(2025, 11, 17).unwrap(),
///     Decimal::new(75, 1),
///     Decimal::new(5, 1),
/// );
/// assert_eq!(row.paid_hours(), Decimal::from(8));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLogRow {
    /// The day the work was done.
    pub date: NaiveDate,
    /// Hours worked on site.
    #[serde(default)]
    pub hours_worked: Decimal,
    /// Paid travel time in hours.
    #[serde(default)]
    pub travel_time: Decimal,
}

impl TimeLogRow {
    /// Creates a time log row.
    pub fn new(date: NaiveDate, hours_worked: Decimal, travel_time: Decimal) -> Self {
        Self {
            date,
            hours_worked,
            travel_time,
        }
    }

    /// Hours paid at the hourly rate: work plus travel.
    pub fn paid_hours(&self) -> Decimal {
        self.hours_worked + self.travel_time
    }
}

/// One row of a worker's weekly earnings ledger.
///
/// A row exists only for the statement week and for weeks with at least one
/// logged time row; the ledger is sparse, never zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyLedgerEntry {
    /// Monday of the week.
    pub week_start: NaiveDate,
    /// Gross pay for the week.
    pub gross: Decimal,
    /// Income tax for the week.
    pub tax: Decimal,
    /// Contribution for the week.
    pub contribution: Decimal,
    /// Pension for the week.
    pub pension: Decimal,
    /// Net pay for the week.
    pub net: Decimal,
}
