//! Persistence contract for profiles, statements, time logs and the ledger.
//!
//! The engine never talks to a database directly. A [`PayrollStore`] supplies
//! the inputs of a rebuild and accepts its result as one atomic commit.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    PayrollProfile, StatementSnapshot, TimeLogRow, WeeklyLedgerEntry, WorkerId, YearToDate,
};

/// Storage operations the payroll service relies on.
///
/// Implementations must apply each `commit_*` call atomically: a reader
/// never observes a ledger that is half replaced or a profile whose year-to-
/// date totals disagree with the rows committed alongside them.
#[async_trait]
pub trait PayrollStore: Send + Sync {
    /// Reads a worker's profile.
    async fn profile(&self, worker: &WorkerId) -> EngineResult<Option<PayrollProfile>>;

    /// Reads the most recently ingested statement.
    async fn statement(&self, worker: &WorkerId) -> EngineResult<Option<StatementSnapshot>>;

    /// Reads the worker's hourly rate; zero when none is recorded.
    async fn hourly_rate(&self, worker: &WorkerId) -> EngineResult<Decimal>;

    /// Reads every logged time row of the worker.
    async fn time_log(&self, worker: &WorkerId) -> EngineResult<Vec<TimeLogRow>>;

    /// Stores a newly ingested statement together with the resulting profile.
    async fn commit_statement(
        &self,
        worker: &WorkerId,
        snapshot: StatementSnapshot,
        profile: PayrollProfile,
    ) -> EngineResult<()>;

    /// Replaces every ledger row of the worker and overwrites the profile's
    /// year-to-date totals, as one unit.
    async fn commit_reconciliation(
        &self,
        worker: &WorkerId,
        rows: Vec<WeeklyLedgerEntry>,
        year_to_date: YearToDate,
    ) -> EngineResult<()>;

    /// Reads the worker's ledger ordered by week start.
    async fn ledger(&self, worker: &WorkerId) -> EngineResult<Vec<WeeklyLedgerEntry>>;

    /// Reads one week of the worker's ledger.
    async fn ledger_entry(
        &self,
        worker: &WorkerId,
        week_start: NaiveDate,
    ) -> EngineResult<Option<WeeklyLedgerEntry>>;
}
