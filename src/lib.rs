//! Payroll Ledger Engine
//!
//! This crate computes take-home pay under the UK PAYE income tax and
//! national insurance regime, and rebuilds a worker's weekly earnings ledger
//! for the current tax year from one real pay statement plus the worker's
//! logged time.
//!
//! - [`calculation`] maps a gross amount to tax, contribution, pension and
//!   net pay for one period.
//! - [`reconciliation`] anchors on the statement week, computes later weeks
//!   exactly and approximates earlier ones.
//! - [`service`] serializes rebuilds per worker over a [`store::PayrollStore`].

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod reconciliation;
pub mod service;
pub mod store;
