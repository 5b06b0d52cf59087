//! Weekly ledger rebuild.
//!
//! [`reconcile`] rebuilds a worker's entire weekly ledger from the statement
//! snapshot and the time log. The result is a complete replacement: the
//! anchor row copied from the statement, exact rows for every later week with
//! logged time, and approximate rows for every earlier week of the tax year.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculation::{
    Offsets, calc_with_pension, contribution_for_period, round_money, tax_year_start_for,
    week_monday,
};
use crate::config::{ReconciliationSettings, TaxConfig};
use crate::models::{
    AuditStep, PayFigures, PayrollProfile, PeriodKind, StatementSnapshot, TimeLogRow,
    WeeklyLedgerEntry, YearToDate,
};

use super::{Anchor, resolve_anchor};

/// Everything a rebuild reads.
#[derive(Debug, Clone, Copy)]
pub struct ReconciliationInput<'a> {
    /// The date the rebuild runs on; the forward pass stops at its week.
    pub today: NaiveDate,
    /// The worker's hourly rate.
    pub hourly_rate: Decimal,
    /// Every logged time row of the worker, in any order.
    pub time_log: &'a [TimeLogRow],
    /// The most recently ingested statement.
    pub snapshot: &'a StatementSnapshot,
    /// The worker's profile, for the tax code and region.
    pub profile: &'a PayrollProfile,
    /// Tax year configuration used for exact weeks and contributions.
    pub config: &'a TaxConfig,
    /// Pension and fallback constants.
    pub settings: &'a ReconciliationSettings,
}

/// Tax rate applied to weeks before the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "basis", content = "rate")]
pub enum EffectiveTaxRate {
    /// The statement's own tax over gross.
    Baseline(Decimal),
    /// The configured fallback, used when the statement shows no gross.
    Fallback(Decimal),
}

impl EffectiveTaxRate {
    /// Derives the rate from the statement's baseline figures.
    pub fn from_baseline(baseline: &PayFigures, settings: &ReconciliationSettings) -> Self {
        if baseline.gross > Decimal::ZERO {
            EffectiveTaxRate::Baseline(baseline.tax / baseline.gross)
        } else {
            EffectiveTaxRate::Fallback(settings.fallback_tax_rate)
        }
    }

    /// The rate itself.
    pub fn rate(self) -> Decimal {
        match self {
            EffectiveTaxRate::Baseline(rate) | EffectiveTaxRate::Fallback(rate) => rate,
        }
    }

    /// Returns true when the fallback rate applied.
    pub fn is_fallback(self) -> bool {
        matches!(self, EffectiveTaxRate::Fallback(_))
    }
}

/// A rebuilt ledger, ready to commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// The resolved anchor week.
    pub anchor: Anchor,
    /// Every ledger row, ordered by week start.
    pub rows: Vec<WeeklyLedgerEntry>,
    /// Statement year-to-date totals plus every forward row.
    pub year_to_date: YearToDate,
    /// Rate used for the backward pass.
    pub effective_rate: EffectiveTaxRate,
    /// Decisions taken, in order.
    pub audit: Vec<AuditStep>,
}

/// Rebuilds the full weekly ledger.
///
/// Returns `None` when the statement has neither a usable process date nor a
/// tax period number; nothing can be anchored and nothing should be written.
pub fn reconcile(input: &ReconciliationInput<'_>) -> Option<Reconciliation> {
    let anchor = resolve_anchor(input.snapshot, input.today)?;
    debug!(week_start = %anchor.week_start, source = ?anchor.source, "Anchor resolved");

    let mut audit = vec![anchor.audit_step(1)];
    let mut rows = BTreeMap::new();

    let baseline = input.snapshot.figures();
    rows.insert(anchor.week_start, ledger_entry(anchor.week_start, &baseline));
    audit.push(AuditStep {
        step_number: 2,
        rule_id: "anchor_row".to_string(),
        rule_name: "Anchor Row".to_string(),
        input: serde_json::json!({ "week_start": anchor.week_start.to_string() }),
        output: serde_json::json!(baseline),
        reasoning: format!(
            "Statement figures copied verbatim for the week starting {}",
            anchor.week_start
        ),
    });

    let gross_by_week = weekly_gross(input.time_log, input.hourly_rate);

    let mut year_to_date = input.snapshot.year_to_date();
    let forward = forward_pass(input, &anchor, &gross_by_week);
    for entry in &forward {
        year_to_date.add(entry.gross, entry.tax, entry.contribution, entry.pension);
    }
    audit.push(forward_audit_step(3, input, &anchor, &forward));

    let effective_rate = EffectiveTaxRate::from_baseline(&baseline, input.settings);
    let backward = backward_pass(input, &anchor, effective_rate);
    audit.push(backward_audit_step(4, &anchor, effective_rate, &backward));

    audit.push(AuditStep {
        step_number: 5,
        rule_id: "year_to_date".to_string(),
        rule_name: "Year To Date".to_string(),
        input: serde_json::json!({
            "statement": input.snapshot.year_to_date(),
            "forward_rows": forward.len(),
        }),
        output: serde_json::json!(year_to_date),
        reasoning: format!(
            "Statement totals plus {} forward week(s) give gross {}",
            forward.len(),
            year_to_date.gross
        ),
    });

    info!(
        anchor = %anchor.week_start,
        forward_rows = forward.len(),
        backward_rows = backward.len(),
        fallback_rate = effective_rate.is_fallback(),
        "Ledger rebuilt"
    );

    for entry in forward.into_iter().chain(backward) {
        rows.insert(entry.week_start, entry);
    }

    Some(Reconciliation {
        anchor,
        rows: rows.into_values().collect(),
        year_to_date,
        effective_rate,
        audit,
    })
}

/// Sums paid hours per week and prices them, rounded to the penny.
///
/// Only weeks with at least one row appear.
pub fn weekly_gross(time_log: &[TimeLogRow], hourly_rate: Decimal) -> BTreeMap<NaiveDate, Decimal> {
    let mut hours: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for row in time_log {
        *hours.entry(week_monday(row.date)).or_default() += row.paid_hours();
    }
    hours
        .into_iter()
        .map(|(week, hours)| (week, round_money(hours * hourly_rate)))
        .collect()
}

/// Pension on a reconstructed week: the capped gross times the pension rate.
pub fn capped_pension(gross: Decimal, settings: &ReconciliationSettings) -> Decimal {
    round_money(gross.min(settings.pensionable_earnings_cap) * settings.pension_rate)
}

fn forward_pass(
    input: &ReconciliationInput<'_>,
    anchor: &Anchor,
    gross_by_week: &BTreeMap<NaiveDate, Decimal>,
) -> Vec<WeeklyLedgerEntry> {
    if input.hourly_rate <= Decimal::ZERO {
        return Vec::new();
    }

    let first_week = anchor.week_start + Duration::weeks(1);
    let current_week = week_monday(input.today);
    if first_week > current_week {
        return Vec::new();
    }

    let config = input.config.with_tax_code(input.profile.tax_code.clone());

    gross_by_week
        .range(first_week..=current_week)
        .map(|(&week, &gross)| {
            let pension = capped_pension(gross, input.settings);
            let result = calc_with_pension(
                gross,
                pension,
                PeriodKind::Weekly,
                &input.profile.region,
                Offsets::default(),
                &config,
            );
            WeeklyLedgerEntry {
                week_start: week,
                gross: result.gross,
                tax: result.income_tax,
                contribution: result.contribution,
                pension: result.pension,
                net: result.net_pay,
            }
        })
        .collect()
}

fn backward_pass(
    input: &ReconciliationInput<'_>,
    anchor: &Anchor,
    effective_rate: EffectiveTaxRate,
) -> Vec<WeeklyLedgerEntry> {
    let tax_year_start = tax_year_start_for(anchor.week_start);
    let in_range: Vec<TimeLogRow> = input
        .time_log
        .iter()
        .filter(|row| row.date >= tax_year_start && row.date < anchor.week_start)
        .cloned()
        .collect();

    weekly_gross(&in_range, input.hourly_rate)
        .into_iter()
        .map(|(week, gross)| {
            let pension = capped_pension(gross, input.settings);
            let tax = round_money(gross * effective_rate.rate());
            let contribution =
                contribution_for_period(gross - pension, PeriodKind::Weekly, input.config).amount;
            ledger_entry(
                week,
                &PayFigures::from_deductions(gross, tax, contribution, pension),
            )
        })
        .collect()
}

fn ledger_entry(week_start: NaiveDate, figures: &PayFigures) -> WeeklyLedgerEntry {
    WeeklyLedgerEntry {
        week_start,
        gross: figures.gross,
        tax: figures.tax,
        contribution: figures.contribution,
        pension: figures.pension,
        net: figures.net,
    }
}

fn forward_audit_step(
    step_number: u32,
    input: &ReconciliationInput<'_>,
    anchor: &Anchor,
    forward: &[WeeklyLedgerEntry],
) -> AuditStep {
    let first_week = anchor.week_start + Duration::weeks(1);
    let current_week = week_monday(input.today);
    let reasoning = if input.hourly_rate <= Decimal::ZERO {
        format!(
            "No forward weeks computed: hourly rate {} is not positive",
            input.hourly_rate
        )
    } else {
        format!(
            "Computed {} week(s) exactly between {} and {} with tax code {}",
            forward.len(),
            first_week,
            current_week,
            input
                .profile
                .tax_code
                .as_ref()
                .map_or("(none)", |code| code.as_str())
        )
    };

    AuditStep {
        step_number,
        rule_id: "forward_pass".to_string(),
        rule_name: "Forward Pass".to_string(),
        input: serde_json::json!({
            "from_week": first_week.to_string(),
            "to_week": current_week.to_string(),
            "hourly_rate": input.hourly_rate.to_string(),
        }),
        output: serde_json::json!({
            "rows": forward.len(),
            "gross": forward.iter().map(|e| e.gross).sum::<Decimal>().to_string(),
        }),
        reasoning,
    }
}

fn backward_audit_step(
    step_number: u32,
    anchor: &Anchor,
    effective_rate: EffectiveTaxRate,
    backward: &[WeeklyLedgerEntry],
) -> AuditStep {
    let reasoning = match effective_rate {
        EffectiveTaxRate::Baseline(rate) => format!(
            "Approximated {} week(s) at the statement's effective tax rate {}",
            backward.len(),
            rate.round_dp(4)
        ),
        EffectiveTaxRate::Fallback(rate) => format!(
            "Approximated {} week(s) at the fallback tax rate {}: statement shows no gross",
            backward.len(),
            rate
        ),
    };

    AuditStep {
        step_number,
        rule_id: "backward_pass".to_string(),
        rule_name: "Backward Pass".to_string(),
        input: serde_json::json!({
            "tax_year_start": tax_year_start_for(anchor.week_start).to_string(),
            "to_week": anchor.week_start.to_string(),
            "effective_rate": effective_rate,
        }),
        output: serde_json::json!({
            "rows": backward.len(),
        }),
        reasoning,
    }
}
