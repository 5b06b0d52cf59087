//! Configuration loading and management for the payroll ledger engine.
//!
//! This module provides functionality to load a tax regime from YAML files:
//! regime metadata, reconciliation constants, and one income tax and
//! contribution configuration per tax year.
//!
//! # Example
//!
//! ```no_run
//! use payroll_ledger::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/uk").unwrap();
//! println!("Loaded regime: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ContributionConfig, ContributionThresholds, IncomeTaxBands, ReconciliationSettings,
    RegimeMetadata, TaxConfig, TaxRegime,
};
