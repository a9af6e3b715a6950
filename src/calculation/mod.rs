//! Calculation logic for the attendance ledger.
//!
//! This module contains the pure functions of the ledger: period numbering
//! and date-range derivation, attendance-to-totals aggregation, per-employee
//! attendance statistics, and reconciliation against remote totals. None of
//! them perform I/O or hold state.

mod aggregation;
mod period;
mod reconcile;
mod stats;

pub use aggregation::{IncompleteRoster, aggregate_totals, check_roster};
pub use period::{
    PERIOD_LENGTH_DAYS, default_epoch, is_displayable_period, parse_calendar_date,
    period_end_date, period_id_for_date, period_id_for_date_str, period_start_date,
};
pub use reconcile::{ReconciledTotals, TotalsDiscrepancy, reconcile_totals};
pub use stats::attendance_stats;
