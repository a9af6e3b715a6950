//! Month calendar of worked days.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calculation::parse_calendar_date;
use crate::error::{LedgerError, LedgerResult};
use crate::models::AttendanceRecord;

const DAYS_PER_WEEK: usize = 7;

/// Dates on which `slot` worked.
///
/// A code counts as worked when it reads `V` after trimming and
/// upper-casing. Records whose date cannot be read are skipped.
pub fn worked_dates(records: &[AttendanceRecord], slot: usize) -> BTreeSet<NaiveDate> {
    records
        .iter()
        .filter(|record| {
            record
                .status(slot)
                .is_some_and(|code| code.as_str().trim().eq_ignore_ascii_case("V"))
        })
        .filter_map(|record| parse_calendar_date(&record.date).ok())
        .collect()
}

/// One cell of the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The date shown in the cell.
    pub date: NaiveDate,
    /// False for the leading and trailing days of neighbouring months.
    pub in_month: bool,
    /// True if the employee worked that day.
    pub worked: bool,
}

/// A month laid out in whole Sunday-to-Saturday weeks.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use attendance_ledger::views::MonthCalendar;
/// use chrono::NaiveDate;
///
/// let worked = BTreeSet::from([NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()]);
/// let calendar = MonthCalendar::build(2025, 3, &worked)?;
///
/// // March 2025 starts on a Saturday and ends on a Monday.
/// assert_eq!(calendar.weeks().count(), 6);
/// assert_eq!(calendar.worked_days(), 1);
/// assert_eq!(calendar.next(), (2025, 4));
/// # Ok::<(), attendance_ledger::error::LedgerError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCalendar {
    year: i32,
    month: u32,
    days: Vec<CalendarDay>,
}

impl MonthCalendar {
    /// Lays out `month` of `year`, marking the dates in `worked`.
    pub fn build(year: i32, month: u32, worked: &BTreeSet<NaiveDate>) -> LedgerResult<Self> {
        let invalid = || LedgerError::InvalidDate {
            input: format!("{year}-{month:02}"),
        };
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let (next_year, next_month) = next_month(year, month);
        let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .ok_or_else(invalid)?;

        let lead = i64::from(first.weekday().num_days_from_sunday());
        let trail = 6 - i64::from(last.weekday().num_days_from_sunday());
        let grid_start = first
            .checked_sub_signed(Duration::days(lead))
            .ok_or_else(invalid)?;
        let grid_end = last
            .checked_add_signed(Duration::days(trail))
            .ok_or_else(invalid)?;

        let days = grid_start
            .iter_days()
            .take_while(|date| *date <= grid_end)
            .map(|date| CalendarDay {
                date,
                in_month: date.month() == month && date.year() == year,
                worked: worked.contains(&date),
            })
            .collect();

        Ok(Self { year, month, days })
    }

    /// Returns the calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the calendar month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Every cell of the grid, Sunday first.
    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    /// The grid split into weeks of seven days.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(DAYS_PER_WEEK)
    }

    /// Number of worked days inside the month itself.
    pub fn worked_days(&self) -> usize {
        self.days.iter().filter(|d| d.in_month && d.worked).count()
    }

    /// Year and month before this one.
    pub fn previous(&self) -> (i32, u32) {
        if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        }
    }

    /// Year and month after this one.
    pub fn next(&self) -> (i32, u32) {
        next_month(self.year, self.month)
    }
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}
