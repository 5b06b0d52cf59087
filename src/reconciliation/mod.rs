//! Weekly reconciliation engine.
//!
//! This module rebuilds a worker's weekly ledger for the current tax year
//! from a single pay statement and the worker's time log:
//!
//! 1. resolve the anchor week from the statement
//! 2. copy the statement's figures into the anchor row
//! 3. compute every later week with logged time exactly
//! 4. approximate every earlier week of the tax year at the statement's
//!    effective tax rate
//! 5. carry the statement's year-to-date totals forward over the exact weeks
//!
//! Everything here is a pure function of its inputs. Reading the inputs and
//! committing the result belong to [`crate::service`].

mod anchor;
mod engine;
mod year_to_date;

pub use anchor::{Anchor, AnchorSource, resolve_anchor};
pub use engine::{
    EffectiveTaxRate, Reconciliation, ReconciliationInput, capped_pension, reconcile,
    weekly_gross,
};
pub use year_to_date::{statement_week_figures, year_to_date_as_of};
