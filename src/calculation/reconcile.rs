//! Reconciliation of locally computed totals with the remote totals sheet.
//!
//! Locally aggregated totals are the single source of truth for every
//! figure. The remote sheet contributes only its free-text notes. Any
//! disagreement is reported rather than silently resolved.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::TotalsRow;

/// A single disagreement between local and remote totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsDiscrepancy {
    /// The period in disagreement.
    pub period: i64,
    /// The differing field, e.g. `employee3_days` or `grand_total`.
    pub field: String,
    /// The locally computed value, or `missing`.
    pub local: String,
    /// The remote value, or `missing`.
    pub remote: String,
}

/// Local totals with remote notes merged in, plus every disagreement found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledTotals {
    /// The authoritative totals, sorted by period.
    pub totals: Vec<TotalsRow>,
    /// Disagreements between the two sources.
    pub discrepancies: Vec<TotalsDiscrepancy>,
}

const MISSING: &str = "missing";

fn compare(
    discrepancies: &mut Vec<TotalsDiscrepancy>,
    period: i64,
    field: impl Into<String>,
    local: impl ToString,
    remote: impl ToString,
) {
    let (local, remote) = (local.to_string(), remote.to_string());
    if local != remote {
        discrepancies.push(TotalsDiscrepancy {
            period,
            field: field.into(),
            local,
            remote,
        });
    }
}

/// Compares one local row against its remote counterpart.
///
/// Only the figures the remote sheet carries are compared: per-slot worked
/// days and pay, substitute days and pay, and the grand total.
fn compare_rows(local: &TotalsRow, remote: &TotalsRow, out: &mut Vec<TotalsDiscrepancy>) {
    let period = local.period;
    for (slot, (l, r)) in local.employees.iter().zip(remote.employees.iter()).enumerate() {
        compare(out, period, format!("employee{}_days", slot + 1), l.worked_days, r.worked_days);
        compare(
            out,
            period,
            format!("employee{}_pay", slot + 1),
            l.pay.normalize(),
            r.pay.normalize(),
        );
    }
    compare(out, period, "total_subs", local.total_subs, remote.total_subs);
    compare(
        out,
        period,
        "subs_pay",
        local.subs_pay.normalize(),
        remote.subs_pay.normalize(),
    );
    compare(
        out,
        period,
        "grand_total",
        local.grand_total.normalize(),
        remote.grand_total.normalize(),
    );
}

/// Reconciles local totals against remote totals.
///
/// The returned totals are exactly `local` (re-sorted by period) with the
/// `notes` of matching remote rows copied in. Periods present on only one
/// side are reported with a `period` discrepancy; remote-only periods are not
/// added to the result.
///
/// # Example
///
/// ```
/// use attendance_ledger::calculation::reconcile_totals;
/// use attendance_ledger::models::TotalsRow;
/// use rust_decimal::Decimal;
///
/// let mut local = TotalsRow::empty(1);
/// local.grand_total = Decimal::from(550);
/// let mut remote = local.clone();
/// remote.notes = "paid in cash".to_string();
///
/// let reconciled = reconcile_totals(&[local], &[remote]);
/// assert!(reconciled.discrepancies.is_empty());
/// assert_eq!(reconciled.totals[0].notes, "paid in cash");
/// ```
pub fn reconcile_totals(local: &[TotalsRow], remote: &[TotalsRow]) -> ReconciledTotals {
    let mut discrepancies = Vec::new();
    let mut totals: Vec<TotalsRow> = local.to_vec();
    totals.sort_by_key(|row| row.period);

    for row in &mut totals {
        match remote.iter().find(|r| r.period == row.period) {
            Some(remote_row) => {
                compare_rows(row, remote_row, &mut discrepancies);
                row.notes = remote_row.notes.clone();
            }
            None => discrepancies.push(TotalsDiscrepancy {
                period: row.period,
                field: "period".to_string(),
                local: row.period.to_string(),
                remote: MISSING.to_string(),
            }),
        }
    }

    for remote_row in remote {
        if !totals.iter().any(|row| row.period == remote_row.period) {
            discrepancies.push(TotalsDiscrepancy {
                period: remote_row.period,
                field: "period".to_string(),
                local: MISSING.to_string(),
                remote: remote_row.period.to_string(),
            });
        }
    }

    if !discrepancies.is_empty() {
        warn!(
            count = discrepancies.len(),
            "Remote totals disagree with locally computed totals"
        );
    }

    ReconciledTotals {
        totals,
        discrepancies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn row(period: i64, worked: u32) -> TotalsRow {
        let mut row = TotalsRow::empty(period);
        row.employees[0].worked_days = worked;
        row.employees[0].pay = Decimal::from(worked * 550);
        row.grand_total = Decimal::from(worked * 550);
        row
    }

    #[test]
    fn test_matching_sources_have_no_discrepancies() {
        let local = vec![row(1, 2), row(2, 3)];
        let reconciled = reconcile_totals(&local, &local);
        assert!(reconciled.discrepancies.is_empty());
        assert_eq!(reconciled.totals, local);
    }

    #[test]
    fn test_remote_notes_are_merged() {
        let local = vec![row(1, 2)];
        let mut remote = vec![row(1, 2)];
        remote[0].notes = "bonus owed".to_string();

        let reconciled = reconcile_totals(&local, &remote);
        assert_eq!(reconciled.totals[0].notes, "bonus owed");
    }

    #[test]
    fn test_local_figures_win() {
        let local = vec![row(1, 2)];
        let remote = vec![row(1, 3)];

        let reconciled = reconcile_totals(&local, &remote);
        assert_eq!(reconciled.totals[0].employees[0].worked_days, 2);

        let fields: Vec<&str> = reconciled
            .discrepancies
            .iter()
            .map(|d| d.field.as_str())
            .collect();
        assert_eq!(fields, vec!["employee1_days", "employee1_pay", "grand_total"]);
        assert_eq!(reconciled.discrepancies[0].local, "2");
        assert_eq!(reconciled.discrepancies[0].remote, "3");
    }

    #[test]
    fn test_decimal_scale_is_not_a_discrepancy() {
        let local = vec![row(1, 1)];
        let mut remote = vec![row(1, 1)];
        remote[0].employees[0].pay = Decimal::new(55000, 2);
        remote[0].grand_total = Decimal::new(55000, 2);

        assert!(reconcile_totals(&local, &remote).discrepancies.is_empty());
    }

    #[test]
    fn test_period_missing_remotely() {
        let reconciled = reconcile_totals(&[row(1, 1)], &[]);
        assert_eq!(reconciled.discrepancies.len(), 1);
        assert_eq!(reconciled.discrepancies[0].field, "period");
        assert_eq!(reconciled.discrepancies[0].remote, "missing");
    }

    #[test]
    fn test_period_missing_locally_is_not_added() {
        let reconciled = reconcile_totals(&[row(1, 1)], &[row(1, 1), row(4, 2)]);
        assert_eq!(reconciled.totals.len(), 1);
        assert_eq!(reconciled.discrepancies.len(), 1);
        assert_eq!(reconciled.discrepancies[0].period, 4);
        assert_eq!(reconciled.discrepancies[0].local, "missing");
    }

    #[test]
    fn test_output_sorted_by_period() {
        let local = vec![row(3, 1), row(1, 1)];
        let reconciled = reconcile_totals(&local, &local);
        let periods: Vec<i64> = reconciled.totals.iter().map(|r| r.period).collect();
        assert_eq!(periods, vec![1, 3]);
    }
}
