//! Attendance records and per-slot status codes.
//!
//! An [`AttendanceRecord`] is one row of the append-only attendance sheet:
//! a date, one [`StatusCode`] per roster slot, and the period the date
//! belongs to.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::{parse_calendar_date, period_id_for_date};
use crate::error::LedgerResult;

/// Number of roster slots carried by every attendance and totals row.
pub const ROSTER_SLOTS: usize = 5;

/// The marker the admin form writes for a substitute day.
pub const SUBSTITUTE_MARKER: &str = "מחליף";

/// A per-day, per-employee attendance marker.
///
/// Parsing is exact: `"V"` is worked, `"X"` is absent, the empty string is
/// unset, and any other text is a substitute day. Unrecognised codes are
/// therefore counted as substitutes; the raw text is kept so the record
/// still round-trips to the sheet unchanged.
///
/// # Example
///
/// ```
/// use attendance_ledger::models::StatusCode;
///
/// assert_eq!(StatusCode::parse("V"), StatusCode::Worked);
/// assert_eq!(StatusCode::parse("X"), StatusCode::Absent);
/// assert_eq!(StatusCode::parse(""), StatusCode::Unset);
/// assert!(StatusCode::parse("מחליף").is_substitute());
/// assert_eq!(StatusCode::parse("?").as_str(), "?");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusCode {
    /// No entry for this slot on this day.
    #[default]
    Unset,
    /// The employee worked (`V`).
    Worked,
    /// The employee was absent (`X`).
    Absent,
    /// A substitute covered the slot; holds the raw marker.
    Substitute(String),
}

impl StatusCode {
    /// Parses a raw sheet cell.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" => StatusCode::Unset,
            "V" => StatusCode::Worked,
            "X" => StatusCode::Absent,
            other => StatusCode::Substitute(other.to_string()),
        }
    }

    /// The substitute code written by the admin form.
    pub fn substitute() -> Self {
        StatusCode::Substitute(SUBSTITUTE_MARKER.to_string())
    }

    /// Returns the raw cell text for this code.
    pub fn as_str(&self) -> &str {
        match self {
            StatusCode::Unset => "",
            StatusCode::Worked => "V",
            StatusCode::Absent => "X",
            StatusCode::Substitute(marker) => marker,
        }
    }

    /// Returns true unless the slot is unset.
    pub fn is_set(&self) -> bool {
        !matches!(self, StatusCode::Unset)
    }

    /// Returns true for any substitute marker.
    pub fn is_substitute(&self) -> bool {
        matches!(self, StatusCode::Substitute(_))
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for StatusCode {
    fn from(raw: &str) -> Self {
        StatusCode::parse(raw)
    }
}

impl From<String> for StatusCode {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "" | "V" | "X" => StatusCode::parse(&raw),
            _ => StatusCode::Substitute(raw),
        }
    }
}

impl From<StatusCode> for String {
    fn from(code: StatusCode) -> Self {
        match code {
            StatusCode::Substitute(marker) => marker,
            other => other.as_str().to_string(),
        }
    }
}

/// One row of the attendance sheet.
///
/// The date is kept as the raw sheet text; use [`AttendanceRecord::calendar_date`]
/// to interpret it. `period_id` is stored with the row and is what the
/// payroll aggregator groups by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The calendar date as written in the sheet.
    pub date: String,
    /// One status code per roster slot.
    pub statuses: [StatusCode; ROSTER_SLOTS],
    /// The 14-day period this row belongs to.
    pub period_id: i64,
}

impl AttendanceRecord {
    /// Builds a record for `date`, deriving its period from `epoch`.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_ledger::models::{AttendanceRecord, StatusCode};
    /// use chrono::NaiveDate;
    ///
    /// let epoch = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
    /// let record = AttendanceRecord::new(
    ///     NaiveDate::from_ymd_opt(2025, 3, 16).unwrap(),
    ///     [StatusCode::Worked, StatusCode::Absent, StatusCode::Unset, StatusCode::Unset, StatusCode::Unset],
    ///     epoch,
    /// );
    ///
    /// assert_eq!(record.date, "2025-03-16");
    /// assert_eq!(record.period_id, 2);
    /// assert_eq!(record.to_row(), vec!["2025-03-16", "V", "X", "", "", "", "2"]);
    /// ```
    pub fn new(date: NaiveDate, statuses: [StatusCode; ROSTER_SLOTS], epoch: NaiveDate) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            statuses,
            period_id: period_id_for_date(date, epoch),
        }
    }

    /// Returns the status code for a roster slot, if the slot exists.
    pub fn status(&self, slot: usize) -> Option<&StatusCode> {
        self.statuses.get(slot)
    }

    /// Interprets the raw date text as a calendar date.
    pub fn calendar_date(&self) -> LedgerResult<NaiveDate> {
        parse_calendar_date(&self.date)
    }

    /// Serializes the record as one flat sheet row: date, each slot's code,
    /// then the period id.
    pub fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(ROSTER_SLOTS + 2);
        row.push(self.date.clone());
        row.extend(self.statuses.iter().map(|code| code.as_str().to_string()));
        row.push(self.period_id.to_string());
        row
    }
}
