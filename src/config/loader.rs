//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading ledger
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};

use super::types::{LedgerConfig, PayrollSettings, StoreSettings};

/// Environment variable that overrides `spreadsheet_id` from `store.yaml`.
pub const SPREADSHEET_ID_ENV: &str = "SHEETS_SPREADSHEET_ID";

/// Loads and provides access to ledger configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── payroll.yaml   # daily rate, period epoch, currency
/// └── store.yaml     # spreadsheet id, API key variable, sheet names
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_ledger::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Daily rate: {}", loader.daily_rate());
/// # Ok::<(), attendance_ledger::error::LedgerError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: LedgerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, contains invalid YAML, or
    /// sets a non-positive daily rate. `SHEETS_SPREADSHEET_ID`, when set,
    /// replaces the spreadsheet id from `store.yaml`.
    pub fn load<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref();

        let payroll = Self::load_yaml::<PayrollSettings>(&path.join("payroll.yaml"))?;
        let store = Self::load_yaml::<StoreSettings>(&path.join("store.yaml"))?;

        let mut config = LedgerConfig::new(payroll, store);
        Self::apply_spreadsheet_override(&mut config, std::env::var(SPREADSHEET_ID_ENV).ok());
        Self::validate(&config)?;

        debug!(
            path = %path.display(),
            daily_rate = %config.payroll().daily_rate,
            epoch = %config.payroll().epoch_date,
            "Loaded ledger configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration, validating it first.
    pub fn from_config(config: LedgerConfig) -> LedgerResult<Self> {
        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> LedgerResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| LedgerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| LedgerError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn apply_spreadsheet_override(config: &mut LedgerConfig, spreadsheet_id: Option<String>) {
        if let Some(id) = spreadsheet_id.filter(|id| !id.trim().is_empty()) {
            config.store_mut().spreadsheet_id = id;
        }
    }

    fn validate(config: &LedgerConfig) -> LedgerResult<()> {
        if config.payroll().daily_rate <= Decimal::ZERO {
            return Err(LedgerError::InvalidConfig {
                field: "daily_rate".to_string(),
                message: format!(
                    "must be positive, got {}",
                    config.payroll().daily_rate
                ),
            });
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Returns the payroll settings.
    pub fn payroll(&self) -> &PayrollSettings {
        self.config.payroll()
    }

    /// Returns the store settings.
    pub fn store(&self) -> &StoreSettings {
        self.config.store()
    }

    /// Returns the configured daily rate.
    pub fn daily_rate(&self) -> Decimal {
        self.config.payroll().daily_rate
    }

    /// Returns the configured period epoch.
    pub fn epoch(&self) -> NaiveDate {
        self.config.payroll().epoch_date
    }
}
