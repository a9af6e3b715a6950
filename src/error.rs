//! Error types for the attendance ledger.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the ledger can report. An incomplete roster is not an
//! error: see [`crate::calculation::IncompleteRoster`].

use thiserror::Error;

/// The main error type for the attendance ledger.
///
/// # Example
///
/// ```
/// use attendance_ledger::error::LedgerError;
///
/// let error = LedgerError::InvalidDate {
///     input: "2025-02-30".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid calendar date: '2025-02-30'");
/// ```
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A date string could not be interpreted as a calendar date.
    #[error("Invalid calendar date: '{input}'")]
    InvalidDate {
        /// The input that failed to parse.
        input: String,
    },

    /// A period's dates fall outside the representable calendar range.
    #[error("Period {period} is outside the supported date range")]
    PeriodOutOfRange {
        /// The period id that could not be mapped to dates.
        period: i64,
    },

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

    /// A configuration value was present but unusable.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The spreadsheet store could not be reached or returned unusable data.
    #[error("Spreadsheet gateway error on '{range}': {message}")]
    Gateway {
        /// The sheet range being read or appended.
        range: String,
        /// A description of the failure.
        message: String,
    },

    /// The spreadsheet service answered with a non-success status.
    #[error("Spreadsheet service returned status {status} for '{range}'")]
    UnexpectedStatus {
        /// The sheet range being read or appended.
        range: String,
        /// The HTTP status code.
        status: u16,
    },

    /// A period's pay does not fit in a decimal amount.
    #[error("Pay for period {period} exceeds the representable amount")]
    AmountOverflow {
        /// The period whose totals overflowed.
        period: i64,
    },

    /// A stored credential hash is not a valid PHC string.
    #[error("Stored credential for '{email}' is not a valid hash")]
    InvalidCredentialHash {
        /// The employee whose credential is malformed.
        email: String,
    },

    /// A secret could not be hashed.
    #[error("Credential hashing failed: {message}")]
    CredentialHashing {
        /// A description of the failure.
        message: String,
    },

    /// The session backend failed to load, save or clear an identity.
    #[error("Session store error: {message}")]
    SessionStore {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;
