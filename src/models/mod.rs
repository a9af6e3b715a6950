//! Core data models for the attendance ledger.
//!
//! This module contains the value records passed between the gateway, the
//! calculation engine and the views.

mod attendance;
mod employee;
mod period;
mod totals;

pub use attendance::{AttendanceRecord, ROSTER_SLOTS, SUBSTITUTE_MARKER, StatusCode};
pub use employee::Employee;
pub use period::Period;
pub use totals::{AttendanceStats, EmployeeTotals, TotalsRow};
