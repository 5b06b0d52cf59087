//! Core data models for the payroll ledger engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod figures;
mod ledger;
mod pay_period;
mod profile;
mod statement;
mod tax_code;

pub use audit::AuditStep;
pub use figures::{PayFigures, YearToDate};
pub use ledger::{TimeLogRow, WeeklyLedgerEntry, WorkerId};
pub use pay_period::{PayPeriodResult, PeriodKind, ThresholdBasis};
pub use profile::PayrollProfile;
pub use statement::{PROCESS_DATE_FORMAT, StatementSnapshot};
pub use tax_code::TaxCode;
