//! Per-employee attendance statistics across all periods.

use crate::models::{AttendanceRecord, AttendanceStats};

use super::aggregation::tally_slot;

/// Tallies one roster slot over every record.
///
/// Uses the same classification as [`super::aggregate_totals`], without
/// grouping by period.
///
/// # Example
///
/// ```
/// use attendance_ledger::calculation::attendance_stats;
/// use attendance_ledger::models::{AttendanceRecord, StatusCode};
/// use chrono::NaiveDate;
///
/// let epoch = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
/// let day = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
/// let mut codes: [StatusCode; 5] = Default::default();
/// codes[1] = StatusCode::Worked;
/// let records = vec![
///     AttendanceRecord::new(day(3), codes.clone(), epoch),
///     AttendanceRecord::new(day(20), codes, epoch),
/// ];
///
/// let stats = attendance_stats(&records, 1);
/// assert_eq!(stats.worked_days, 2);
/// assert_eq!(stats.total_days, 2);
/// ```
pub fn attendance_stats(records: &[AttendanceRecord], slot: usize) -> AttendanceStats {
    let totals = tally_slot(records, slot);
    AttendanceStats {
        worked_days: totals.worked_days,
        absent_days: totals.absent_days,
        substituted_days: totals.substituted_days,
        total_days: totals.worked_days + totals.absent_days + totals.substituted_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatusCode;
    use chrono::NaiveDate;

    fn record(date: &str, codes: [&str; 5]) -> AttendanceRecord {
        AttendanceRecord::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            codes.map(StatusCode::parse),
            NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
        )
    }

    #[test]
    fn test_stats_counts_each_kind() {
        let records = vec![
            record("2025-03-03", ["V", "", "", "", ""]),
            record("2025-03-04", ["X", "", "", "", ""]),
            record("2025-03-05", ["מחליף", "", "", "", ""]),
            record("2025-03-06", ["", "V", "", "", ""]),
            record("2025-03-20", ["V", "", "", "", ""]),
        ];

        let stats = attendance_stats(&records, 0);
        assert_eq!(
            stats,
            AttendanceStats {
                worked_days: 2,
                absent_days: 1,
                substituted_days: 1,
                total_days: 4,
            }
        );
    }

    #[test]
    fn test_stats_for_empty_slot() {
        let records = vec![record("2025-03-03", ["V", "", "", "", ""])];
        assert_eq!(attendance_stats(&records, 3), AttendanceStats::default());
    }

    #[test]
    fn test_stats_for_slot_outside_rows() {
        let records = vec![record("2025-03-03", ["V", "V", "V", "V", "V"])];
        assert_eq!(attendance_stats(&records, 9), AttendanceStats::default());
    }
}
