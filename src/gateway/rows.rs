//! Conversion between raw sheet rows and typed records.
//!
//! Every sheet starts with a header row, which is skipped. Missing or
//! malformed cells default to the empty string or zero; parsing never fails.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calculation::period_id_for_date_str;
use crate::models::{AttendanceRecord, Employee, ROSTER_SLOTS, StatusCode, TotalsRow};

/// Column holding the period id in attendance rows.
const ATTENDANCE_PERIOD_COLUMN: usize = ROSTER_SLOTS + 1;

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Parses the leading integer of a cell, ignoring anything after it.
///
/// `"550"`, `" 550.75"` and `"550 ILS"` all give 550; text with no leading
/// digits gives `None`.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let value = unsigned[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

fn count_cell(row: &[String], index: usize) -> u32 {
    leading_integer(cell(row, index))
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

fn amount_cell(row: &[String], index: usize) -> Decimal {
    leading_integer(cell(row, index))
        .map(Decimal::from)
        .unwrap_or(Decimal::ZERO)
}

/// Parses roster rows: email, full name, credential hash.
pub fn parse_employee_rows(rows: &[Vec<String>]) -> Vec<Employee> {
    rows.iter()
        .skip(1)
        .map(|row| Employee::new(cell(row, 0), cell(row, 1), cell(row, 2)))
        .collect()
}

/// Parses attendance rows: date, one code per slot, period id.
///
/// Blank rows are skipped. When the period cell is missing or not a number
/// the period is derived from the date; if the date is unreadable too, the
/// period is 0.
pub fn parse_attendance_rows(rows: &[Vec<String>], epoch: NaiveDate) -> Vec<AttendanceRecord> {
    rows.iter()
        .skip(1)
        .filter(|row| row.iter().any(|value| !value.trim().is_empty()))
        .map(|row| {
            let date = cell(row, 0).to_string();
            let statuses: [StatusCode; ROSTER_SLOTS] =
                std::array::from_fn(|slot| StatusCode::parse(cell(row, slot + 1)));
            let period_id = leading_integer(cell(row, ATTENDANCE_PERIOD_COLUMN))
                .or_else(|| period_id_for_date_str(&date, epoch).ok())
                .unwrap_or(0);

            AttendanceRecord {
                date,
                statuses,
                period_id,
            }
        })
        .collect()
}

/// Parses rows of the remote totals sheet.
///
/// Layout: period, then days and pay for each of the five slots, total
/// substitute days, substitute pay, notes, grand total. Only worked days are
/// stored remotely, so absent and substituted counts are zero.
pub fn parse_totals_rows(rows: &[Vec<String>]) -> Vec<TotalsRow> {
    rows.iter()
        .skip(1)
        .map(|row| {
            let mut totals = TotalsRow::empty(leading_integer(cell(row, 0)).unwrap_or(0));
            for (slot, employee) in totals.employees.iter_mut().enumerate() {
                employee.worked_days = count_cell(row, 1 + slot * 2);
                employee.pay = amount_cell(row, 2 + slot * 2);
            }
            let tail = 1 + ROSTER_SLOTS * 2;
            totals.total_subs = count_cell(row, tail);
            totals.subs_pay = amount_cell(row, tail + 1);
            totals.notes = cell(row, tail + 2).to_string();
            totals.grand_total = amount_cell(row, tail + 3);
            totals
        })
        .collect()
}
