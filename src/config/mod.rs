//! Configuration loading and management for the attendance ledger.
//!
//! This module loads payroll and spreadsheet-store settings from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_ledger::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Period epoch: {}", config.epoch());
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, SPREADSHEET_ID_ENV};
pub use types::{DEFAULT_DAILY_RATE, LedgerConfig, PayrollSettings, SheetNames, StoreSettings};
