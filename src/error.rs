//! Error types for the payroll ledger engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Pay calculations themselves are total and never fail; errors arise only
//! while loading configuration, parsing caller input, or talking to a store.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll ledger engine.
///
/// # Example
///
/// ```
/// use payroll_ledger::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/regime.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/regime.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but violates an ordering or sign constraint.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// No tax year configuration is effective on the given date.
    #[error("No tax year configuration effective on {date}")]
    TaxYearNotConfigured {
        /// The date that was looked up.
        date: NaiveDate,
    },

    /// A pay period kind string was not one of weekly, monthly or annual.
    #[error("Invalid period kind: {value}")]
    InvalidPeriodKind {
        /// The rejected value.
        value: String,
    },

    /// The persistence collaborator failed.
    #[error("Store error: {message}")]
    Store {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_invalid_config_displays_field_and_message() {
        let error = EngineError::InvalidConfig {
            field: "bands.basic_rate_limit".to_string(),
            message: "must not exceed higher_rate_limit".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration field 'bands.basic_rate_limit': must not exceed higher_rate_limit"
        );
    }

    #[test]
    fn test_tax_year_not_configured_displays_date() {
        let error = EngineError::TaxYearNotConfigured {
            date: NaiveDate::from_ymd_opt(2019, 5, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "No tax year configuration effective on 2019-05-01"
        );
    }

    #[test]
    fn test_invalid_period_kind_displays_value() {
        let error = EngineError::InvalidPeriodKind {
            value: "fortnightly".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid period kind: fortnightly");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_store_error() -> EngineResult<()> {
            Err(EngineError::Store {
                message: "connection reset".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_store_error()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
