//! Configuration types for the attendance ledger.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::default_epoch;

/// Default pay per worked day.
pub const DEFAULT_DAILY_RATE: i64 = 550;

fn default_daily_rate() -> Decimal {
    Decimal::from(DEFAULT_DAILY_RATE)
}

fn default_currency() -> String {
    "ILS".to_string()
}

fn default_base_url() -> String {
    "https://sheets.googleapis.com/v4/spreadsheets".to_string()
}

fn default_api_key_env() -> String {
    "SHEETS_API_KEY".to_string()
}

/// Payroll settings from `payroll.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSettings {
    /// Currency units paid per worked or substituted day.
    #[serde(default = "default_daily_rate")]
    pub daily_rate: Decimal,
    /// First day of period 1.
    #[serde(default = "default_epoch")]
    pub epoch_date: NaiveDate,
    /// ISO currency code used when presenting pay.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            daily_rate: default_daily_rate(),
            epoch_date: default_epoch(),
            currency: default_currency(),
        }
    }
}

/// Names of the three sheets in the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetNames {
    /// Roster sheet: email, full name, credential hash.
    pub employees: String,
    /// Append-only attendance log.
    pub attendance: String,
    /// Remotely maintained period totals.
    pub totals: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            employees: "עובדים".to_string(),
            attendance: "נוכחות".to_string(),
            totals: "סה\"כ תשלומים".to_string(),
        }
    }
}

/// Spreadsheet store settings from `store.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Base URL of the spreadsheet values API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Spreadsheet id, or the full URL of the spreadsheet.
    #[serde(default)]
    pub spreadsheet_id: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Sheet names.
    #[serde(default)]
    pub sheets: SheetNames,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            spreadsheet_id: String::new(),
            api_key_env: default_api_key_env(),
            sheets: SheetNames::default(),
        }
    }
}

impl StoreSettings {
    /// Returns the bare spreadsheet id.
    ///
    /// A full spreadsheet URL (`.../d/<id>/edit`) is reduced to `<id>`.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_ledger::config::StoreSettings;
    ///
    /// let settings = StoreSettings {
    ///     spreadsheet_id: "https://docs.google.com/spreadsheets/d/1AbcSheet/edit#gid=0".to_string(),
    ///     ..StoreSettings::default()
    /// };
    /// assert_eq!(settings.spreadsheet_id(), "1AbcSheet");
    /// ```
    pub fn spreadsheet_id(&self) -> &str {
        match self.spreadsheet_id.split_once("/d/") {
            Some((_, rest)) => rest.split('/').next().unwrap_or(rest),
            None => self.spreadsheet_id.trim(),
        }
    }

    /// Reads the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Range covering the roster columns.
    pub fn employees_range(&self) -> String {
        format!("{}!A:C", self.sheets.employees)
    }

    /// Range covering the whole attendance log.
    pub fn attendance_range(&self) -> String {
        format!("{}!A:Z", self.sheets.attendance)
    }

    /// Range that attendance rows are appended to.
    pub fn attendance_append_range(&self) -> String {
        format!("{}!A:G", self.sheets.attendance)
    }

    /// Range covering the totals columns.
    pub fn totals_range(&self) -> String {
        format!("{}!A:O", self.sheets.totals)
    }
}

/// The complete ledger configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerConfig {
    payroll: PayrollSettings,
    store: StoreSettings,
}

impl LedgerConfig {
    /// Creates a configuration from its component parts.
    pub fn new(payroll: PayrollSettings, store: StoreSettings) -> Self {
        Self { payroll, store }
    }

    /// Returns the payroll settings.
    pub fn payroll(&self) -> &PayrollSettings {
        &self.payroll
    }

    /// Returns the store settings.
    pub fn store(&self) -> &StoreSettings {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut StoreSettings {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payroll_defaults() {
        let settings = PayrollSettings::default();
        assert_eq!(settings.daily_rate, Decimal::from(550));
        assert_eq!(
            settings.epoch_date,
            NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()
        );
        assert_eq!(settings.currency, "ILS");
    }

    #[test]
    fn test_payroll_yaml_fills_missing_fields() {
        let settings: PayrollSettings = serde_yaml::from_str("daily_rate: 600\n").unwrap();
        assert_eq!(settings.daily_rate, Decimal::from(600));
        assert_eq!(settings.epoch_date, default_epoch());
    }

    #[test]
    fn test_spreadsheet_id_plain() {
        let settings = StoreSettings {
            spreadsheet_id: " 1AbcSheet ".to_string(),
            ..StoreSettings::default()
        };
        assert_eq!(settings.spreadsheet_id(), "1AbcSheet");
    }

    #[test]
    fn test_spreadsheet_id_from_url_without_suffix() {
        let settings = StoreSettings {
            spreadsheet_id: "https://docs.google.com/spreadsheets/d/1AbcSheet".to_string(),
            ..StoreSettings::default()
        };
        assert_eq!(settings.spreadsheet_id(), "1AbcSheet");
    }

    #[test]
    fn test_ranges_use_sheet_names() {
        let settings = StoreSettings {
            sheets: SheetNames {
                employees: "staff".to_string(),
                attendance: "log".to_string(),
                totals: "totals".to_string(),
            },
            ..StoreSettings::default()
        };
        assert_eq!(settings.employees_range(), "staff!A:C");
        assert_eq!(settings.attendance_range(), "log!A:Z");
        assert_eq!(settings.attendance_append_range(), "log!A:G");
        assert_eq!(settings.totals_range(), "totals!A:O");
    }

    #[test]
    fn test_api_key_missing_variable() {
        let settings = StoreSettings {
            api_key_env: "ATTENDANCE_LEDGER_TEST_UNSET_KEY".to_string(),
            ..StoreSettings::default()
        };
        assert!(settings.api_key().is_none());
    }
}
