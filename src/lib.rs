//! Attendance and bi-weekly payroll ledger for a small team.
//!
//! This crate numbers 14-day pay periods from a fixed epoch, aggregates
//! per-employee attendance into period totals, and provides the spreadsheet
//! gateway, session handling and view shaping that sit around that core.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod session;
pub mod views;
