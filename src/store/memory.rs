//! In-memory [`PayrollStore`] for tests and benchmarks.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    PayrollProfile, StatementSnapshot, TimeLogRow, WeeklyLedgerEntry, WorkerId, YearToDate,
};

use super::PayrollStore;

#[derive(Debug, Default, Clone)]
struct WorkerRecord {
    profile: Option<PayrollProfile>,
    statement: Option<StatementSnapshot>,
    hourly_rate: Decimal,
    time_log: Vec<TimeLogRow>,
    ledger: BTreeMap<NaiveDate, WeeklyLedgerEntry>,
}

/// Store that keeps every worker's data in one locked map.
///
/// A single write lock covers each commit, so commits are atomic with
/// respect to every reader.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    workers: RwLock<HashMap<WorkerId, WorkerRecord>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a worker's hourly rate.
    pub async fn set_hourly_rate(&self, worker: &WorkerId, rate: Decimal) {
        self.workers
            .write()
            .await
            .entry(worker.clone())
            .or_default()
            .hourly_rate = rate;
    }

    /// Appends time rows to a worker's log.
    pub async fn record_time(&self, worker: &WorkerId, rows: impl IntoIterator<Item = TimeLogRow>) {
        self.workers
            .write()
            .await
            .entry(worker.clone())
            .or_default()
            .time_log
            .extend(rows);
    }

    /// Deletes every time row logged on `date`, returning how many went.
    pub async fn remove_time_entries_on(&self, worker: &WorkerId, date: NaiveDate) -> usize {
        let mut workers = self.workers.write().await;
        let Some(record) = workers.get_mut(worker) else {
            return 0;
        };
        let before = record.time_log.len();
        record.time_log.retain(|row| row.date != date);
        before - record.time_log.len()
    }
}

#[async_trait]
impl PayrollStore for InMemoryStore {
    async fn profile(&self, worker: &WorkerId) -> EngineResult<Option<PayrollProfile>> {
        Ok(self
            .workers
            .read()
            .await
            .get(worker)
            .and_then(|record| record.profile.clone()))
    }

    async fn statement(&self, worker: &WorkerId) -> EngineResult<Option<StatementSnapshot>> {
        Ok(self
            .workers
            .read()
            .await
            .get(worker)
            .and_then(|record| record.statement.clone()))
    }

    async fn hourly_rate(&self, worker: &WorkerId) -> EngineResult<Decimal> {
        Ok(self
            .workers
            .read()
            .await
            .get(worker)
            .map(|record| record.hourly_rate)
            .unwrap_or_default())
    }

    async fn time_log(&self, worker: &WorkerId) -> EngineResult<Vec<TimeLogRow>> {
        Ok(self
            .workers
            .read()
            .await
            .get(worker)
            .map(|record| record.time_log.clone())
            .unwrap_or_default())
    }

    async fn commit_statement(
        &self,
        worker: &WorkerId,
        snapshot: StatementSnapshot,
        profile: PayrollProfile,
    ) -> EngineResult<()> {
        let mut workers = self.workers.write().await;
        let record = workers.entry(worker.clone()).or_default();
        record.statement = Some(snapshot);
        record.profile = Some(profile);
        Ok(())
    }

    async fn commit_reconciliation(
        &self,
        worker: &WorkerId,
        rows: Vec<WeeklyLedgerEntry>,
        year_to_date: YearToDate,
    ) -> EngineResult<()> {
        let mut workers = self.workers.write().await;
        let record = workers.get_mut(worker).ok_or_else(|| EngineError::Store {
            message: format!("no record for worker {}", worker),
        })?;
        let profile = record.profile.as_mut().ok_or_else(|| EngineError::Store {
            message: format!("no profile for worker {}", worker),
        })?;

        profile.year_to_date = year_to_date;
        record.ledger = rows.into_iter().map(|row| (row.week_start, row)).collect();
        Ok(())
    }

    async fn ledger(&self, worker: &WorkerId) -> EngineResult<Vec<WeeklyLedgerEntry>> {
        Ok(self
            .workers
            .read()
            .await
            .get(worker)
            .map(|record| record.ledger.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn ledger_entry(
        &self,
        worker: &WorkerId,
        week_start: NaiveDate,
    ) -> EngineResult<Option<WeeklyLedgerEntry>> {
        Ok(self
            .workers
            .read()
            .await
            .get(worker)
            .and_then(|record| record.ledger.get(&week_start).cloned()))
    }
}
