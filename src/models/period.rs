//! Pay period model.
//!
//! This module contains the [`Period`] type: the derived date window of a
//! numbered 14-day pay period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::{period_end_date, period_id_for_date, period_start_date};
use crate::error::LedgerResult;

/// A numbered 14-day pay period with its inclusive date range.
///
/// Periods are never stored; they are derived from an id and the epoch.
///
/// # Example
///
/// ```
/// use attendance_ledger::models::Period;
/// use chrono::NaiveDate;
///
/// let epoch = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
/// let period = Period::new(2, epoch).unwrap();
///
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2025, 3, 16).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2025, 3, 29).unwrap());
/// assert_eq!(period.range_label(), "16/03/2025 - 29/03/2025");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// The period number; period 1 starts at the epoch.
    pub id: i64,
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl Period {
    /// Builds the period with the given id.
    pub fn new(id: i64, epoch: NaiveDate) -> LedgerResult<Self> {
        Ok(Self {
            id,
            start_date: period_start_date(id, epoch)?,
            end_date: period_end_date(id, epoch)?,
        })
    }

    /// Builds the period that contains `date`.
    pub fn containing(date: NaiveDate, epoch: NaiveDate) -> LedgerResult<Self> {
        Self::new(period_id_for_date(date, epoch), epoch)
    }

    /// Checks if a given date falls within this period, inclusive of both ends.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_ledger::models::Period;
    /// use chrono::NaiveDate;
    ///
    /// let epoch = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
    /// let period = Period::new(1, epoch).unwrap();
    ///
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 3, 2).unwrap())); // start date
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap())); // end date
    /// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 3, 16).unwrap())); // after
    /// ```
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true for periods that may be shown to users (id ≥ 1).
    pub fn is_displayable(&self) -> bool {
        self.id >= 1
    }

    /// Formats the range as `dd/MM/yyyy - dd/MM/yyyy`.
    pub fn range_label(&self) -> String {
        format!(
            "{} - {}",
            self.start_date.format("%d/%m/%Y"),
            self.end_date.format("%d/%m/%Y")
        )
    }
}
