//! The spreadsheet store abstraction and its in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};

/// Returns the sheet name of an A1 range such as `"Sheet!A:C"`.
pub fn sheet_name(range: &str) -> &str {
    range.split_once('!').map(|(sheet, _)| sheet).unwrap_or(range)
}

/// Row-oriented access to a spreadsheet.
///
/// Ranges use A1 notation (`"<sheet>!A:C"`). Rows are returned as strings
/// exactly as the store holds them, header row included.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Reads every row in `range`.
    async fn read_range(&self, range: &str) -> LedgerResult<Vec<Vec<String>>>;

    /// Appends one row after the last non-empty row of `range`.
    async fn append_row(&self, range: &str, row: Vec<String>) -> LedgerResult<()>;
}

fn missing_sheet(range: &str) -> LedgerError {
    LedgerError::Gateway {
        range: range.to_string(),
        message: format!("no sheet named '{}'", sheet_name(range)),
    }
}

/// A [`SheetStore`] held in process memory.
///
/// Rows are kept per sheet name. Reading or appending to a sheet that was
/// never added is a gateway error, as it is for the remote service.
///
/// # Example
///
/// ```
/// use attendance_ledger::gateway::{MemorySheetStore, SheetStore};
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemorySheetStore::new().with_sheet("log", vec![vec!["date".to_string()]]);
///
/// store.append_row("log!A:G", vec!["2025-03-02".to_string()]).await.unwrap();
/// let rows = store.read_range("log!A:Z").await.unwrap();
/// assert_eq!(rows.len(), 2);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemorySheetStore {
    sheets: Mutex<HashMap<String, Vec<Vec<String>>>>,
}

impl MemorySheetStore {
    /// Creates a store with no sheets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a sheet with the given rows.
    pub fn with_sheet(mut self, name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        self.sheets.get_mut().insert(name.into(), rows);
        self
    }

    /// Returns a copy of the rows of a sheet, if it exists.
    pub async fn sheet(&self, name: &str) -> Option<Vec<Vec<String>>> {
        self.sheets.lock().await.get(name).cloned()
    }
}

#[async_trait]
impl SheetStore for MemorySheetStore {
    async fn read_range(&self, range: &str) -> LedgerResult<Vec<Vec<String>>> {
        let rows = self
            .sheets
            .lock()
            .await
            .get(sheet_name(range))
            .cloned()
            .ok_or_else(|| missing_sheet(range))?;
        debug!(range, rows = rows.len(), "Read sheet range from memory");
        Ok(rows)
    }

    async fn append_row(&self, range: &str, row: Vec<String>) -> LedgerResult<()> {
        self.sheets
            .lock()
            .await
            .get_mut(sheet_name(range))
            .ok_or_else(|| missing_sheet(range))?
            .push(row);
        debug!(range, "Appended row in memory");
        Ok(())
    }
}
