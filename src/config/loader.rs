//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a tax regime
//! from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{ReconciliationSettings, RegimeMetadata, TaxConfig, TaxRegime};

/// Loads and provides access to regime configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates every tax year, and answers which year applies on a date.
///
/// # Directory Structure
///
/// ```text
/// config/uk/
/// ├── regime.yaml          # Regime metadata and reconciliation settings
/// └── years/
///     └── 2024-25.yaml     # Tax year effective from its effective_date
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_ledger::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/uk").unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 11, 14).unwrap();
/// let config = loader.config_for(date).unwrap();
/// println!("Personal allowance: £{}", config.personal_allowance);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    regime: TaxRegime,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` when `regime.yaml` or the `years` directory is
    ///   missing, or the directory holds no year files
    /// - `ConfigParseError` when a file is not valid YAML for its type
    /// - `InvalidConfig` when a tax year has non-monotonic boundaries
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_ledger::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/uk")?;
    /// # Ok::<(), payroll_ledger::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RegimeMetadata>(&path.join("regime.yaml"))?;
        let years = Self::load_years(&path.join("years"))?;

        Self::from_parts(metadata, years)
    }

    /// Builds a loader from already-constructed parts, validating every year.
    pub fn from_parts(metadata: RegimeMetadata, years: Vec<TaxConfig>) -> EngineResult<Self> {
        for year in &years {
            year.validate()?;
        }
        Ok(Self {
            regime: TaxRegime::new(metadata, years),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all tax year files from the years directory.
    fn load_years(years_dir: &Path) -> EngineResult<Vec<TaxConfig>> {
        let years_dir_str = years_dir.display().to_string();

        let entries = fs::read_dir(years_dir).map_err(|_| EngineError::ConfigNotFound {
            path: years_dir_str.clone(),
        })?;

        let mut years = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: years_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                years.push(Self::load_yaml::<TaxConfig>(&path)?);
            }
        }

        if years.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no tax year files found)", years_dir_str),
            });
        }

        Ok(years)
    }

    /// Returns the underlying regime.
    pub fn regime(&self) -> &TaxRegime {
        &self.regime
    }

    /// Returns the regime metadata.
    pub fn metadata(&self) -> &RegimeMetadata {
        self.regime.metadata()
    }

    /// Returns the reconciliation settings.
    pub fn settings(&self) -> &ReconciliationSettings {
        &self.regime.metadata().reconciliation
    }

    /// Gets the tax year configuration in force on a date.
    ///
    /// Picks the most recent year whose `effective_date` is on or before
    /// `date`.
    pub fn config_for(&self, date: NaiveDate) -> EngineResult<&TaxConfig> {
        self.regime
            .years()
            .iter()
            .rfind(|year| year.effective_date <= date)
            .ok_or(EngineError::TaxYearNotConfigured { date })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn config_path() -> &'static str {
        "./config/uk"
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scratch_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("payroll-ledger-{}", Uuid::new_v4()));
        fs::create_dir_all(dir.join("years")).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().code, "UK");
        assert_eq!(loader.metadata().region, "rUK");
        assert_eq!(loader.settings(), &ReconciliationSettings::default());
    }

    #[test]
    fn test_shipped_2024_25_matches_builtin() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let config = loader.config_for(date(2024, 6, 1)).unwrap();
        assert_eq!(config, &TaxConfig::uk_2024_25());
    }

    #[test]
    fn test_config_for_picks_latest_effective_year() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let config = loader.config_for(date(2025, 4, 5)).unwrap();
        assert_eq!(config.effective_date, date(2024, 4, 6));

        let config = loader.config_for(date(2025, 4, 6)).unwrap();
        assert_eq!(config.effective_date, date(2025, 4, 6));
    }

    #[test]
    fn test_config_for_date_before_any_year() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        match loader.config_for(date(2020, 1, 1)) {
            Err(EngineError::TaxYearNotConfigured { date: d }) => assert_eq!(d, date(2020, 1, 1)),
            other => panic!("Expected TaxYearNotConfigured, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        match ConfigLoader::load("/nonexistent/path") {
            Err(EngineError::ConfigNotFound { path }) => assert!(path.contains("regime.yaml")),
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_reversed_bands() {
        let dir = scratch_dir();
        fs::copy(
            Path::new(config_path()).join("regime.yaml"),
            dir.join("regime.yaml"),
        )
        .unwrap();
        let year = fs::read_to_string(Path::new(config_path()).join("years/2024-25.yaml"))
            .unwrap()
            .replace("basic_rate_limit: \"37700\"", "basic_rate_limit: \"200000\"");
        fs::write(dir.join("years/2024-25.yaml"), year).unwrap();

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).ok();

        match result {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "bands.basic_rate_limit")
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = scratch_dir();
        fs::write(dir.join("regime.yaml"), "code: [unterminated").unwrap();

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).ok();

        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_load_without_year_files() {
        let dir = scratch_dir();
        fs::copy(
            Path::new(config_path()).join("regime.yaml"),
            dir.join("regime.yaml"),
        )
        .unwrap();

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).ok();

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("no tax year files found"))
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_from_parts_validates() {
        let mut year = TaxConfig::uk_2024_25();
        year.contribution.weekly.primary = Decimal::from(1000);

        let metadata = ConfigLoader::load(config_path()).unwrap().metadata().clone();
        assert!(matches!(
            ConfigLoader::from_parts(metadata, vec![year]),
            Err(EngineError::InvalidConfig { .. })
        ));
    }
}
