//! Per-employee tables: pay per period and the attendance log.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{is_displayable_period, parse_calendar_date};
use crate::error::LedgerResult;
use crate::models::{AttendanceRecord, Period, StatusCode, TotalsRow};

/// Label shown for a worked day.
pub const WORKED_LABEL: &str = "עבד";
/// Label shown for an absence.
pub const ABSENT_LABEL: &str = "לא הגיע";
/// Label shown for a day with no code.
pub const UNSET_LABEL: &str = "לא רשום";
/// Shown in place of a date that cannot be read.
pub const MISSING_DATE: &str = "-";

/// Returns the display label of a status code.
///
/// Substitute codes are shown as written.
pub fn status_label(status: &StatusCode) -> &str {
    match status {
        StatusCode::Worked => WORKED_LABEL,
        StatusCode::Absent => ABSENT_LABEL,
        StatusCode::Unset => UNSET_LABEL,
        StatusCode::Substitute(code) => code.as_str(),
    }
}

/// One employee's figures for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePeriodLine {
    /// The period with its date range.
    pub period: Period,
    /// `dd/MM/yyyy - dd/MM/yyyy`.
    pub range_label: String,
    /// Days worked in the period.
    pub worked_days: u32,
    /// Pay for those days.
    pub pay: Decimal,
}

/// Extracts the figures of `slot` from each displayable period.
///
/// Periods before the epoch (id 0 or below) are left out.
pub fn employee_period_lines(
    totals: &[TotalsRow],
    slot: usize,
    epoch: NaiveDate,
) -> LedgerResult<Vec<EmployeePeriodLine>> {
    totals
        .iter()
        .filter(|row| is_displayable_period(row.period))
        .map(|row| {
            let period = Period::new(row.period, epoch)?;
            let figures = row.employee(slot).cloned().unwrap_or_default();
            Ok(EmployeePeriodLine {
                period,
                range_label: period.range_label(),
                worked_days: figures.worked_days,
                pay: figures.pay,
            })
        })
        .collect()
}

/// One row of an employee's attendance log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// `yyyy-MM-dd`, or `-` when the stored date cannot be read.
    pub date: String,
    /// The employee's code that day.
    pub status: StatusCode,
    /// Display label of the code.
    pub label: String,
    /// The stored period id.
    pub period_id: i64,
    /// Date range of the period, for displayable periods.
    pub period_range: Option<String>,
}

/// Lists the records in which `slot` has a code, in record order.
pub fn attendance_entries(
    records: &[AttendanceRecord],
    slot: usize,
    epoch: NaiveDate,
) -> Vec<AttendanceEntry> {
    records
        .iter()
        .filter_map(|record| {
            let status = record.status(slot).filter(|s| s.is_set())?;
            let date = parse_calendar_date(&record.date)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|_| MISSING_DATE.to_string());
            let period_range = is_displayable_period(record.period_id)
                .then(|| Period::new(record.period_id, epoch).ok())
                .flatten()
                .map(|p| p.range_label());

            Some(AttendanceEntry {
                date,
                label: status_label(status).to_string(),
                status: status.clone(),
                period_id: record.period_id,
                period_range,
            })
        })
        .collect()
}
