//! Payroll aggregation.
//!
//! This module turns attendance records into one [`TotalsRow`] per period.
//! Records are grouped by their stored period id, and every roster slot is
//! tallied independently.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AttendanceRecord, Employee, EmployeeTotals, ROSTER_SLOTS, StatusCode, TotalsRow};

/// Attendance data exists for slots that have no roster entry.
///
/// This is reported, never raised: those slots are zero-filled in the totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompleteRoster {
    /// Number of employees supplied.
    pub roster_len: usize,
    /// Slots carrying at least one status code but no employee.
    pub unassigned_slots: Vec<usize>,
}

/// Tallies one slot across a group of records.
pub(crate) fn tally_slot<'a, I>(records: I, slot: usize) -> EmployeeTotals
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut totals = EmployeeTotals::default();
    for record in records {
        match record.status(slot) {
            Some(StatusCode::Worked) => totals.worked_days += 1,
            Some(StatusCode::Absent) => totals.absent_days += 1,
            Some(StatusCode::Substitute(_)) => totals.substituted_days += 1,
            Some(StatusCode::Unset) | None => {}
        }
    }
    totals
}

/// Aggregates attendance into per-period totals.
///
/// For each distinct `period_id`, and for each roster slot, `V` counts as a
/// worked day, `X` as an absent day, and any other non-empty code as a
/// substitute day. Employee pay is worked days × `daily_rate`; substitute
/// pay is all substitute days × `daily_rate`; the grand total is their sum.
///
/// Slots beyond the roster length are zero-filled. The output is sorted by
/// period and does not depend on the input order.
///
/// Fails with [`LedgerError::AmountOverflow`] if any amount in a period
/// exceeds the decimal range.
///
/// # Example
///
/// ```
/// use attendance_ledger::calculation::aggregate_totals;
/// use attendance_ledger::models::{AttendanceRecord, Employee, StatusCode};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let epoch = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
/// let roster = vec![
///     Employee::new("a@example.com", "A", ""),
///     Employee::new("b@example.com", "B", ""),
///     Employee::new("c@example.com", "C", ""),
/// ];
/// let record = AttendanceRecord::new(
///     NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     [StatusCode::Worked, StatusCode::Absent, StatusCode::substitute(), StatusCode::Unset, StatusCode::Unset],
///     epoch,
/// );
///
/// let totals = aggregate_totals(&[record], &roster, Decimal::from(550))?;
/// assert_eq!(totals.len(), 1);
/// assert_eq!(totals[0].employees[0].pay, Decimal::from(550));
/// assert_eq!(totals[0].total_subs, 1);
/// assert_eq!(totals[0].grand_total, Decimal::from(1100));
/// # Ok::<(), attendance_ledger::error::LedgerError>(())
/// ```
pub fn aggregate_totals(
    records: &[AttendanceRecord],
    roster: &[Employee],
    daily_rate: Decimal,
) -> LedgerResult<Vec<TotalsRow>> {
    if roster.len() > ROSTER_SLOTS {
        warn!(
            roster_len = roster.len(),
            max_slots = ROSTER_SLOTS,
            "Roster exceeds available slots; extra employees are ignored"
        );
    }
    if let Some(incomplete) = check_roster(records, roster) {
        debug!(
            roster_len = incomplete.roster_len,
            unassigned_slots = ?incomplete.unassigned_slots,
            "Attendance data present for slots without an employee; zero-filling"
        );
    }

    let counted_slots = roster.len().min(ROSTER_SLOTS);

    let mut by_period: BTreeMap<i64, Vec<&AttendanceRecord>> = BTreeMap::new();
    for record in records {
        by_period.entry(record.period_id).or_default().push(record);
    }

    let totals = by_period
        .into_iter()
        .map(|(period, group)| {
            let overflow = || LedgerError::AmountOverflow { period };
            let mut row = TotalsRow::empty(period);

            for slot in 0..counted_slots {
                let mut employee = tally_slot(group.iter().copied(), slot);
                employee.pay = Decimal::from(employee.worked_days)
                    .checked_mul(daily_rate)
                    .ok_or_else(overflow)?;
                row.total_subs += employee.substituted_days;
                row.employees[slot] = employee;
            }

            row.subs_pay = Decimal::from(row.total_subs)
                .checked_mul(daily_rate)
                .ok_or_else(overflow)?;
            row.grand_total = row
                .employees_pay()
                .and_then(|pay| pay.checked_add(row.subs_pay))
                .ok_or_else(overflow)?;
            Ok(row)
        })
        .collect::<LedgerResult<Vec<TotalsRow>>>()?;

    debug!(
        records = records.len(),
        periods = totals.len(),
        daily_rate = %daily_rate,
        "Aggregated attendance into period totals"
    );

    Ok(totals)
}

/// Reports slots that carry attendance codes but have no roster entry.
///
/// Returns `None` when every populated slot has an employee.
pub fn check_roster(records: &[AttendanceRecord], roster: &[Employee]) -> Option<IncompleteRoster> {
    let unassigned_slots: Vec<usize> = (roster.len()..ROSTER_SLOTS)
        .filter(|&slot| {
            records
                .iter()
                .any(|record| record.status(slot).is_some_and(StatusCode::is_set))
        })
        .collect();

    if unassigned_slots.is_empty() {
        None
    } else {
        Some(IncompleteRoster {
            roster_len: roster.len(),
            unassigned_slots,
        })
    }
}
