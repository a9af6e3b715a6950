//! Period totals models.
//!
//! A [`TotalsRow`] holds one period's pay figures, one [`EmployeeTotals`]
//! per roster slot. The same shape is produced by local aggregation and
//! parsed from the remote totals sheet.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ROSTER_SLOTS;

/// Day counts and pay for one roster slot in one period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTotals {
    /// Days marked `V`.
    pub worked_days: u32,
    /// Days marked `X`.
    pub absent_days: u32,
    /// Days with any other non-empty marker.
    pub substituted_days: u32,
    /// Worked days multiplied by the daily rate.
    pub pay: Decimal,
}

/// One row of period totals.
///
/// # Example
///
/// ```
/// use attendance_ledger::models::TotalsRow;
/// use rust_decimal::Decimal;
///
/// let row = TotalsRow::empty(3);
/// assert_eq!(row.period, 3);
/// assert_eq!(row.grand_total, Decimal::ZERO);
/// assert_eq!(row.employee(0).map(|e| e.worked_days), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsRow {
    /// The period these totals cover.
    pub period: i64,
    /// Per-slot figures, indexed by roster position.
    pub employees: [EmployeeTotals; ROSTER_SLOTS],
    /// Substitute days summed over all slots.
    pub total_subs: u32,
    /// Substitute days multiplied by the daily rate.
    pub subs_pay: Decimal,
    /// Free-text notes kept on the remote totals sheet.
    #[serde(default)]
    pub notes: String,
    /// Sum of all employee pay plus substitute pay.
    pub grand_total: Decimal,
}

impl TotalsRow {
    /// Creates a zero-filled row for a period.
    pub fn empty(period: i64) -> Self {
        Self {
            period,
            employees: Default::default(),
            total_subs: 0,
            subs_pay: Decimal::ZERO,
            notes: String::new(),
            grand_total: Decimal::ZERO,
        }
    }

    /// Returns the figures for a roster slot, if the slot exists.
    pub fn employee(&self, slot: usize) -> Option<&EmployeeTotals> {
        self.employees.get(slot)
    }

    /// Sum of per-employee pay, excluding substitutes.
    ///
    /// `None` if the sum overflows.
    pub fn employees_pay(&self) -> Option<Decimal> {
        self.employees
            .iter()
            .try_fold(Decimal::ZERO, |total, e| total.checked_add(e.pay))
    }
}

/// Attendance tallies for one roster slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceStats {
    /// Days marked `V`.
    pub worked_days: u32,
    /// Days marked `X`.
    pub absent_days: u32,
    /// Days with any other non-empty marker.
    pub substituted_days: u32,
    /// Sum of the three counts above.
    pub total_days: u32,
}
