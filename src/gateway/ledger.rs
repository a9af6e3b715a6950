//! The payroll ledger service: typed reads and writes over a [`SheetStore`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{ReconciledTotals, aggregate_totals, reconcile_totals};
use crate::config::LedgerConfig;
use crate::error::LedgerResult;
use crate::models::{AttendanceRecord, Employee, ROSTER_SLOTS, StatusCode, TotalsRow};

use super::rows::{parse_attendance_rows, parse_employee_rows, parse_totals_rows};
use super::store::SheetStore;

/// Roster and attendance log read together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Employees in roster order; position is the attendance slot.
    pub roster: Vec<Employee>,
    /// Every attendance record, in sheet order.
    pub attendance: Vec<AttendanceRecord>,
}

/// Reads and records attendance, and derives period totals.
///
/// Totals are always computed locally from the attendance log. The remote
/// totals sheet is only consulted for notes and to report disagreement.
///
/// # Example
///
/// ```
/// use attendance_ledger::config::LedgerConfig;
/// use attendance_ledger::gateway::{MemorySheetStore, PayrollLedger};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), attendance_ledger::error::LedgerError> {
/// let config = LedgerConfig::default();
/// let store = MemorySheetStore::new()
///     .with_sheet(config.store().sheets.employees.clone(), vec![])
///     .with_sheet(config.store().sheets.attendance.clone(), vec![]);
///
/// let ledger = PayrollLedger::new(store, config);
/// assert!(ledger.local_totals().await?.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PayrollLedger<S> {
    store: S,
    config: LedgerConfig,
}

impl<S: SheetStore> PayrollLedger<S> {
    /// Creates a ledger over `store`.
    pub fn new(store: S, config: LedgerConfig) -> Self {
        Self { store, config }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    fn epoch(&self) -> NaiveDate {
        self.config.payroll().epoch_date
    }

    /// Reads the roster.
    pub async fn roster(&self) -> LedgerResult<Vec<Employee>> {
        let rows = self
            .store
            .read_range(&self.config.store().employees_range())
            .await?;
        Ok(parse_employee_rows(&rows))
    }

    /// Reads the attendance log.
    pub async fn attendance(&self) -> LedgerResult<Vec<AttendanceRecord>> {
        let rows = self
            .store
            .read_range(&self.config.store().attendance_range())
            .await?;
        Ok(parse_attendance_rows(&rows, self.epoch()))
    }

    /// Reads the remote totals sheet.
    pub async fn remote_totals(&self) -> LedgerResult<Vec<TotalsRow>> {
        let rows = self
            .store
            .read_range(&self.config.store().totals_range())
            .await?;
        Ok(parse_totals_rows(&rows))
    }

    /// Reads roster and attendance concurrently.
    pub async fn snapshot(&self) -> LedgerResult<LedgerSnapshot> {
        let (roster, attendance) = tokio::try_join!(self.roster(), self.attendance())?;
        Ok(LedgerSnapshot { roster, attendance })
    }

    /// Appends one day of attendance and returns the stored record.
    ///
    /// The period id is derived from `date`. Recording the same date twice
    /// appends a second row.
    pub async fn record_attendance(
        &self,
        date: NaiveDate,
        statuses: [StatusCode; ROSTER_SLOTS],
    ) -> LedgerResult<AttendanceRecord> {
        let correlation_id = Uuid::new_v4();
        let record = AttendanceRecord::new(date, statuses, self.epoch());

        self.store
            .append_row(&self.config.store().attendance_append_range(), record.to_row())
            .await?;

        info!(
            correlation_id = %correlation_id,
            date = %record.date,
            period = record.period_id,
            "Recorded attendance"
        );
        Ok(record)
    }

    /// Aggregates a snapshot into period totals at the configured rate.
    pub fn totals_for(&self, snapshot: &LedgerSnapshot) -> LedgerResult<Vec<TotalsRow>> {
        aggregate_totals(
            &snapshot.attendance,
            &snapshot.roster,
            self.config.payroll().daily_rate,
        )
    }

    /// Reads the store and computes period totals locally.
    pub async fn local_totals(&self) -> LedgerResult<Vec<TotalsRow>> {
        let snapshot = self.snapshot().await?;
        self.totals_for(&snapshot)
    }

    /// Computes local totals and reconciles them with the remote sheet.
    ///
    /// If the remote totals cannot be read, the local totals are returned
    /// with no notes and no discrepancies. Failing to read the roster or the
    /// attendance log is still an error.
    pub async fn reconciled_totals(&self) -> LedgerResult<ReconciledTotals> {
        let correlation_id = Uuid::new_v4();
        let local = self.local_totals().await?;

        let reconciled = match self.remote_totals().await {
            Ok(remote) => reconcile_totals(&local, &remote),
            Err(error) => {
                warn!(
                    correlation_id = %correlation_id,
                    error = %error,
                    "Remote totals unavailable; using local totals only"
                );
                ReconciledTotals {
                    totals: local,
                    discrepancies: Vec::new(),
                }
            }
        };

        info!(
            correlation_id = %correlation_id,
            periods = reconciled.totals.len(),
            discrepancies = reconciled.discrepancies.len(),
            "Reconciled period totals"
        );
        Ok(reconciled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::gateway::MemorySheetStore;
    use rust_decimal::Decimal;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn create_test_store(config: &LedgerConfig) -> MemorySheetStore {
        let sheets = &config.store().sheets;
        MemorySheetStore::new()
            .with_sheet(
                sheets.employees.clone(),
                vec![
                    row(&["email", "name", "password"]),
                    row(&["a@example.com", "Avi", ""]),
                    row(&["b@example.com", "Bat", ""]),
                ],
            )
            .with_sheet(
                sheets.attendance.clone(),
                vec![
                    row(&["date", "1", "2", "3", "4", "5", "period"]),
                    row(&["2025-03-02", "V", "X", "", "", "", "1"]),
                    row(&["2025-03-03", "V", "V", "", "", "", "1"]),
                    row(&["2025-03-16", "מחליף", "V", "", "", "", "2"]),
                ],
            )
    }

    fn create_test_ledger() -> PayrollLedger<MemorySheetStore> {
        let config = LedgerConfig::default();
        PayrollLedger::new(create_test_store(&config), config)
    }

    #[tokio::test]
    async fn test_snapshot_reads_roster_and_attendance() {
        let ledger = create_test_ledger();
        let snapshot = ledger.snapshot().await.unwrap();
        assert_eq!(snapshot.roster.len(), 2);
        assert_eq!(snapshot.attendance.len(), 3);
        assert_eq!(snapshot.roster[1].full_name, "Bat");
    }

    #[tokio::test]
    async fn test_local_totals() {
        let ledger = create_test_ledger();
        let totals = ledger.local_totals().await.unwrap();

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].period, 1);
        assert_eq!(totals[0].employees[0].worked_days, 2);
        assert_eq!(totals[0].employees[1].worked_days, 1);
        assert_eq!(totals[0].grand_total, Decimal::from(1650));
        assert_eq!(totals[1].total_subs, 1);
        assert_eq!(totals[1].grand_total, Decimal::from(1100));
    }

    #[tokio::test]
    async fn test_record_attendance_appends_row() {
        let ledger = create_test_ledger();
        let record = ledger
            .record_attendance(
                date("2025-03-17"),
                [
                    StatusCode::Worked,
                    StatusCode::Absent,
                    StatusCode::Unset,
                    StatusCode::Unset,
                    StatusCode::Unset,
                ],
            )
            .await
            .unwrap();

        assert_eq!(record.period_id, 2);
        let sheet = ledger
            .store()
            .sheet(&ledger.config().store().sheets.attendance)
            .await
            .unwrap();
        assert_eq!(sheet.len(), 5);
        assert_eq!(sheet[4], row(&["2025-03-17", "V", "X", "", "", "", "2"]));

        let attendance = ledger.attendance().await.unwrap();
        assert_eq!(attendance.len(), 4);
    }

    #[tokio::test]
    async fn test_reconciled_totals_without_remote_sheet_falls_back() {
        let ledger = create_test_ledger();
        let reconciled = ledger.reconciled_totals().await.unwrap();
        assert_eq!(reconciled.totals, ledger.local_totals().await.unwrap());
        assert!(reconciled.discrepancies.is_empty());
    }

    #[tokio::test]
    async fn test_reconciled_totals_merges_notes_and_reports_drift() {
        let config = LedgerConfig::default();
        let store = create_test_store(&config).with_sheet(
            config.store().sheets.totals.clone(),
            vec![
                row(&["period"]),
                row(&[
                    "1", "2", "1100", "1", "550", "0", "0", "0", "0", "0", "0", "0", "0",
                    "paid", "1650",
                ]),
                row(&[
                    "2", "0", "0", "1", "550", "0", "0", "0", "0", "0", "0", "1", "550",
                    "", "9999",
                ]),
            ],
        );
        let ledger = PayrollLedger::new(store, config);

        let reconciled = ledger.reconciled_totals().await.unwrap();
        assert_eq!(reconciled.totals[0].notes, "paid");
        assert_eq!(reconciled.totals[1].grand_total, Decimal::from(1100));
        assert_eq!(reconciled.discrepancies.len(), 1);
        assert_eq!(reconciled.discrepancies[0].period, 2);
        assert_eq!(reconciled.discrepancies[0].field, "grand_total");
        assert_eq!(reconciled.discrepancies[0].remote, "9999");
    }

    #[tokio::test]
    async fn test_missing_attendance_sheet_is_error() {
        let config = LedgerConfig::default();
        let store = MemorySheetStore::new().with_sheet(config.store().sheets.employees.clone(), vec![]);
        let ledger = PayrollLedger::new(store, config);

        match ledger.local_totals().await {
            Err(LedgerError::Gateway { range, .. }) => assert!(range.ends_with("!A:Z")),
            other => panic!("Expected Gateway error, got {:?}", other),
        }
    }
}
