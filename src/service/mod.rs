//! Payroll service: the entry point that ties configuration, store and
//! engine together.
//!
//! The service owns the per-worker locking that makes a recalculation a
//! single logical transaction: read inputs, rebuild, commit. Calls for
//! different workers run in parallel.

mod locks;
mod what_if;

pub use locks::WorkerLocks;
pub use what_if::{WhatIfRequest, calculate_what_if};

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::week_monday;
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{
    PayFigures, PayPeriodResult, PayrollProfile, StatementSnapshot, WeeklyLedgerEntry, WorkerId,
    YearToDate,
};
use crate::reconciliation::{
    Reconciliation, ReconciliationInput, reconcile, resolve_anchor, statement_week_figures,
    year_to_date_as_of,
};
use crate::store::PayrollStore;

/// Why a recalculation wrote nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The worker has no payroll profile yet.
    NoProfile,
    /// No statement has been ingested for the worker.
    NoStatement,
    /// The statement has neither a usable process date nor a tax period.
    UnresolvableAnchor,
}

/// The result of a recalculation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum RecalculationOutcome {
    /// The ledger was rebuilt and committed.
    Rebuilt {
        /// Correlation id of this run.
        run_id: Uuid,
        /// The committed reconciliation.
        reconciliation: Reconciliation,
    },
    /// Nothing was written.
    Skipped {
        /// Correlation id of this run.
        run_id: Uuid,
        /// Why nothing was written.
        reason: SkipReason,
    },
}

impl RecalculationOutcome {
    /// Returns the reconciliation when the ledger was rebuilt.
    pub fn reconciliation(&self) -> Option<&Reconciliation> {
        match self {
            RecalculationOutcome::Rebuilt { reconciliation, .. } => Some(reconciliation),
            RecalculationOutcome::Skipped { .. } => None,
        }
    }

    /// Returns the skip reason when nothing was written.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            RecalculationOutcome::Rebuilt { .. } => None,
            RecalculationOutcome::Skipped { reason, .. } => Some(*reason),
        }
    }
}

/// Figures for a single week, as shown to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "source", content = "figures")]
pub enum WeekFigures {
    /// The rebuilt ledger row.
    Ledger(WeeklyLedgerEntry),
    /// The statement itself, for its own week when no row exists yet.
    Statement(PayFigures),
}

/// Orchestrates statement ingestion, ledger rebuilds and queries.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use payroll_ledger::config::ConfigLoader;
/// use payroll_ledger::models::WorkerId;
/// use payroll_ledger::service::PayrollService;
/// use payroll_ledger::store::InMemoryStore;
/// use chrono::NaiveDate;
///
/// # async fn run() -> payroll_ledger::error::EngineResult<()> {
/// let config = ConfigLoader::load("./config/uk")?;
/// let service = PayrollService::new(config, Arc::new(InMemoryStore::new()));
///
/// let today = NaiveDate::from_ymd_opt(2025, 11, 21).unwrap();
/// let outcome = service.recalculate(&WorkerId::new("sam"), today).await?;
/// println!("{:?}", outcome.skip_reason());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PayrollService<S> {
    config: Arc<ConfigLoader>,
    store: Arc<S>,
    locks: Arc<WorkerLocks>,
}

impl<S> Clone for PayrollService<S> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            store: Arc::clone(&self.store),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<S: PayrollStore> PayrollService<S> {
    /// Creates a service over a loaded configuration and a store.
    pub fn new(config: ConfigLoader, store: Arc<S>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            locks: Arc::new(WorkerLocks::new()),
        }
    }

    /// Returns the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ingests a statement and stores the resulting profile.
    ///
    /// Year-to-date totals are left as they were; the next recalculation
    /// derives them from the statement.
    pub async fn ingest_statement(
        &self,
        worker: &WorkerId,
        snapshot: StatementSnapshot,
    ) -> EngineResult<PayrollProfile> {
        let _guard = self.locks.acquire(worker).await;

        let prior = self.store.profile(worker).await?;
        let profile = PayrollProfile::ingest_statement(
            prior.as_ref(),
            worker.clone(),
            &snapshot,
            self.config.metadata(),
        );

        info!(
            worker = %worker,
            created = prior.is_none(),
            tax_code = ?profile.tax_code.as_ref().map(|code| code.as_str()),
            pension_percent = %profile.pension_percent,
            baseline_gross = %profile.baseline.gross,
            "Statement ingested"
        );

        self.store
            .commit_statement(worker, snapshot, profile.clone())
            .await?;
        Ok(profile)
    }

    /// Rebuilds the worker's ledger and year-to-date totals.
    ///
    /// Missing prerequisites are not errors: the outcome says what was
    /// missing and the store is left untouched.
    ///
    /// # Errors
    ///
    /// - `TaxYearNotConfigured` when no tax year covers `today`
    /// - `Store` when the store fails
    pub async fn recalculate(
        &self,
        worker: &WorkerId,
        today: NaiveDate,
    ) -> EngineResult<RecalculationOutcome> {
        let run_id = Uuid::new_v4();
        let start_time = Instant::now();
        info!(run_id = %run_id, worker = %worker, today = %today, "Recalculation started");

        let _guard = self.locks.acquire(worker).await;

        let Some(profile) = self.store.profile(worker).await? else {
            return Ok(skipped(run_id, worker, SkipReason::NoProfile));
        };
        let Some(snapshot) = self.store.statement(worker).await? else {
            return Ok(skipped(run_id, worker, SkipReason::NoStatement));
        };
        let hourly_rate = self.store.hourly_rate(worker).await?;
        let time_log = self.store.time_log(worker).await?;
        let config = self.config.config_for(today)?;

        let input = ReconciliationInput {
            today,
            hourly_rate,
            time_log: &time_log,
            snapshot: &snapshot,
            profile: &profile,
            config,
            settings: self.config.settings(),
        };
        let Some(reconciliation) = reconcile(&input) else {
            return Ok(skipped(run_id, worker, SkipReason::UnresolvableAnchor));
        };

        self.store
            .commit_reconciliation(
                worker,
                reconciliation.rows.clone(),
                reconciliation.year_to_date,
            )
            .await?;

        info!(
            run_id = %run_id,
            worker = %worker,
            rows = reconciliation.rows.len(),
            ytd_gross = %reconciliation.year_to_date.gross,
            ytd_tax = %reconciliation.year_to_date.tax,
            ytd_contribution = %reconciliation.year_to_date.contribution,
            ytd_pension = %reconciliation.year_to_date.pension,
            duration_us = start_time.elapsed().as_micros(),
            "Recalculation committed"
        );

        Ok(RecalculationOutcome::Rebuilt {
            run_id,
            reconciliation,
        })
    }

    /// Year-to-date totals as of the week containing `as_of`.
    ///
    /// Falls back to the profile's stored totals when there is no statement
    /// or its anchor cannot be resolved, and to zero when there is no
    /// profile.
    pub async fn year_to_date(&self, worker: &WorkerId, as_of: NaiveDate) -> EngineResult<YearToDate> {
        let anchored = self
            .store
            .statement(worker)
            .await?
            .and_then(|snapshot| resolve_anchor(&snapshot, as_of).map(|anchor| (snapshot, anchor)));
        let Some((snapshot, anchor)) = anchored else {
            return Ok(self
                .store
                .profile(worker)
                .await?
                .map(|profile| profile.year_to_date)
                .unwrap_or_default());
        };

        let ledger = self.store.ledger(worker).await?;
        Ok(year_to_date_as_of(
            snapshot.year_to_date(),
            anchor.week_start,
            &ledger,
            week_monday(as_of),
        ))
    }

    /// Figures for the week containing `date`.
    ///
    /// Prefers the ledger row; the statement's own week is answered from the
    /// statement before any rebuild has run.
    pub async fn week(&self, worker: &WorkerId, date: NaiveDate) -> EngineResult<Option<WeekFigures>> {
        let week_start = week_monday(date);
        if let Some(entry) = self.store.ledger_entry(worker, week_start).await? {
            return Ok(Some(WeekFigures::Ledger(entry)));
        }
        Ok(self
            .store
            .statement(worker)
            .await?
            .and_then(|snapshot| statement_week_figures(&snapshot, week_start))
            .map(WeekFigures::Statement))
    }

    /// Computes an ad-hoc pay period, optionally using a worker's profile.
    ///
    /// # Errors
    ///
    /// - `TaxYearNotConfigured` when no tax year covers `today`
    /// - `Store` when the profile cannot be read
    pub async fn what_if(
        &self,
        worker: Option<&WorkerId>,
        request: &WhatIfRequest,
        today: NaiveDate,
    ) -> EngineResult<PayPeriodResult> {
        let profile = match worker {
            Some(worker) => self.store.profile(worker).await?,
            None => None,
        };
        let config = self.config.config_for(today)?;
        Ok(calculate_what_if(
            request,
            profile.as_ref(),
            self.config.metadata(),
            config,
        ))
    }
}

fn skipped(run_id: Uuid, worker: &WorkerId, reason: SkipReason) -> RecalculationOutcome {
    warn!(run_id = %run_id, worker = %worker, reason = ?reason, "Recalculation skipped");
    RecalculationOutcome::Skipped { run_id, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn config_path() -> &'static str {
        "./config/uk"
    }

    fn service() -> PayrollService<InMemoryStore> {
        PayrollService::new(
            ConfigLoader::load(config_path()).unwrap(),
            Arc::new(InMemoryStore::new()),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_recalculate_without_profile_is_skipped() {
        let service = service();
        let outcome = service
            .recalculate(&WorkerId::new("nobody"), date(2025, 11, 21))
            .await
            .unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::NoProfile));
        assert!(outcome.reconciliation().is_none());
    }

    #[tokio::test]
    async fn test_recalculate_with_unresolvable_anchor_is_skipped() {
        let service = service();
        let worker = WorkerId::new("w1");
        service
            .ingest_statement(
                &worker,
                StatementSnapshot {
                    gross_pay: Some(rust_decimal::Decimal::from(500)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let outcome = service.recalculate(&worker, date(2025, 11, 21)).await.unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::UnresolvableAnchor));
        assert!(service.store().ledger(&worker).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recalculate_before_configured_years_fails() {
        let service = service();
        let worker = WorkerId::new("w1");
        service
            .ingest_statement(
                &worker,
                StatementSnapshot {
                    process_date: Some("14/11/2019".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let result = service.recalculate(&worker, date(2019, 11, 21)).await;
        assert!(matches!(
            result,
            Err(crate::error::EngineError::TaxYearNotConfigured { .. })
        ));
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = RecalculationOutcome::Skipped {
            run_id: Uuid::nil(),
            reason: SkipReason::NoStatement,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"outcome\":\"skipped\""));
        assert!(json.contains("\"reason\":\"no_statement\""));
    }

    #[test]
    fn test_service_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<PayrollService<InMemoryStore>>();
    }
}
