//! Access to the spreadsheet that holds the roster, the attendance log and
//! the remote totals.
//!
//! [`SheetStore`] is the seam: [`GoogleSheetsClient`] talks to the live
//! service and [`MemorySheetStore`] backs tests and offline use.
//! [`PayrollLedger`] layers typed reads, attendance recording and totals
//! reconciliation on top of any store.

mod ledger;
mod rows;
mod sheets;
mod store;

pub use ledger::{LedgerSnapshot, PayrollLedger};
pub use rows::{parse_attendance_rows, parse_employee_rows, parse_totals_rows};
pub use sheets::GoogleSheetsClient;
pub use store::{MemorySheetStore, SheetStore, sheet_name};
