//! Period numbering.
//!
//! Pay periods are contiguous 14-day windows. Period 1 starts on the epoch;
//! dates before the epoch map to periods ≤ 0, which callers treat as out of
//! range for display.

use chrono::{Duration, NaiveDate};

use crate::error::{LedgerError, LedgerResult};

/// Length of every pay period in days.
pub const PERIOD_LENGTH_DAYS: i64 = 14;

/// Returns the default period epoch, 2025-03-02.
pub fn default_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 2).expect("2025-03-02 is a valid date")
}

/// Parses a calendar date from sheet or form text.
///
/// Accepts ISO `YYYY-MM-DD`, optionally followed by a `T` time part in any
/// ISO form (offsets, `Z`, fractional or missing seconds). The time is
/// ignored and the date is taken as written. Falls back to `dd/MM/yyyy`. Surrounding whitespace is
/// trimmed.
///
/// # Example
///
/// ```
/// use attendance_ledger::calculation::parse_calendar_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2025, 3, 16).unwrap();
/// assert_eq!(parse_calendar_date("2025-03-16").unwrap(), expected);
/// assert_eq!(parse_calendar_date("16/03/2025").unwrap(), expected);
/// assert!(parse_calendar_date("2025-02-30").is_err());
/// ```
pub fn parse_calendar_date(input: &str) -> LedgerResult<NaiveDate> {
    let trimmed = input.trim();

    if let Ok((date, rest)) = NaiveDate::parse_and_remainder(trimmed, "%Y-%m-%d") {
        if rest.is_empty() || rest.starts_with('T') {
            return Ok(date);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").map_err(|_| LedgerError::InvalidDate {
        input: input.to_string(),
    })
}

/// Returns the period id containing `date`.
///
/// Computed as `floor((date - epoch) / 14 days) + 1`.
///
/// # Example
///
/// ```
/// use attendance_ledger::calculation::{default_epoch, period_id_for_date};
/// use chrono::NaiveDate;
///
/// let epoch = default_epoch();
/// assert_eq!(period_id_for_date(NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(), epoch), 1);
/// assert_eq!(period_id_for_date(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(), epoch), 1);
/// assert_eq!(period_id_for_date(NaiveDate::from_ymd_opt(2025, 3, 16).unwrap(), epoch), 2);
/// assert_eq!(period_id_for_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), epoch), 0);
/// ```
pub fn period_id_for_date(date: NaiveDate, epoch: NaiveDate) -> i64 {
    let days = date.signed_duration_since(epoch).num_days();
    days.div_euclid(PERIOD_LENGTH_DAYS) + 1
}

/// Parses `input` and returns the period id containing it.
pub fn period_id_for_date_str(input: &str, epoch: NaiveDate) -> LedgerResult<i64> {
    parse_calendar_date(input).map(|date| period_id_for_date(date, epoch))
}

/// Returns the first day of a period: `epoch + (period_id - 1) * 14 days`.
///
/// Fails only when the date is outside chrono's representable range.
pub fn period_start_date(period_id: i64, epoch: NaiveDate) -> LedgerResult<NaiveDate> {
    period_id
        .checked_sub(1)
        .and_then(|offset| offset.checked_mul(PERIOD_LENGTH_DAYS))
        .and_then(Duration::try_days)
        .and_then(|offset| epoch.checked_add_signed(offset))
        .ok_or(LedgerError::PeriodOutOfRange { period: period_id })
}

/// Returns the last day of a period: its start date plus 13 days.
pub fn period_end_date(period_id: i64, epoch: NaiveDate) -> LedgerResult<NaiveDate> {
    period_start_date(period_id, epoch)?
        .checked_add_signed(Duration::days(PERIOD_LENGTH_DAYS - 1))
        .ok_or(LedgerError::PeriodOutOfRange { period: period_id })
}

/// Returns true for period ids that may be shown to users.
pub fn is_displayable_period(period_id: i64) -> bool {
    period_id >= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_epoch_is_period_one() {
        assert_eq!(period_id_for_date(date("2025-03-02"), default_epoch()), 1);
    }

    #[test]
    fn test_last_day_of_period_one() {
        assert_eq!(period_id_for_date(date("2025-03-15"), default_epoch()), 1);
    }

    #[test]
    fn test_first_day_of_period_two() {
        assert_eq!(period_id_for_date(date("2025-03-16"), default_epoch()), 2);
    }

    #[test]
    fn test_dates_before_epoch_floor_towards_negative() {
        let epoch = default_epoch();
        assert_eq!(period_id_for_date(date("2025-03-01"), epoch), 0);
        assert_eq!(period_id_for_date(date("2025-02-16"), epoch), 0);
        assert_eq!(period_id_for_date(date("2025-02-15"), epoch), -1);
    }

    #[test]
    fn test_period_two_dates() {
        let epoch = default_epoch();
        assert_eq!(period_start_date(2, epoch).unwrap(), date("2025-03-16"));
        assert_eq!(period_end_date(2, epoch).unwrap(), date("2025-03-29"));
    }

    #[test]
    fn test_period_zero_dates() {
        let epoch = default_epoch();
        assert_eq!(period_start_date(0, epoch).unwrap(), date("2025-02-16"));
        assert_eq!(period_end_date(0, epoch).unwrap(), date("2025-03-01"));
    }

    #[test]
    fn test_period_boundaries_invert() {
        let epoch = default_epoch();
        for period in -30..=60 {
            let start = period_start_date(period, epoch).unwrap();
            let end = period_end_date(period, epoch).unwrap();
            assert_eq!(period_id_for_date(start, epoch), period);
            assert_eq!(period_id_for_date(end, epoch), period);
        }
    }

    #[test]
    fn test_custom_epoch() {
        let epoch = date("2024-01-01");
        assert_eq!(period_id_for_date(date("2024-01-14"), epoch), 1);
        assert_eq!(period_id_for_date(date("2024-01-15"), epoch), 2);
    }

    #[test]
    fn test_period_start_out_of_range() {
        let result = period_start_date(i64::MAX, default_epoch());
        match result {
            Err(LedgerError::PeriodOutOfRange { period }) => assert_eq!(period, i64::MAX),
            other => panic!("Expected PeriodOutOfRange, got {:?}", other),
        }
        assert!(period_start_date(i64::MIN, default_epoch()).is_err());
    }

    #[test]
    fn test_period_id_for_date_str_valid() {
        assert_eq!(
            period_id_for_date_str("2025-03-16", default_epoch()).unwrap(),
            2
        );
    }

    #[test]
    fn test_period_id_for_date_str_invalid() {
        let result = period_id_for_date_str("03/16/2025", default_epoch());
        match result {
            Err(LedgerError::InvalidDate { input }) => assert_eq!(input, "03/16/2025"),
            other => panic!("Expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_calendar_date_variants() {
        assert_eq!(parse_calendar_date(" 2025-03-16 ").unwrap(), date("2025-03-16"));
        assert_eq!(
            parse_calendar_date("2025-03-16T08:30:00").unwrap(),
            date("2025-03-16")
        );
        assert_eq!(parse_calendar_date("01/04/2025").unwrap(), date("2025-04-01"));
    }

    #[test]
    fn test_parse_calendar_date_iso_timestamps() {
        for input in [
            "2025-03-16T08:30:00Z",
            "2025-03-16T08:30:00.000Z",
            "2025-03-16T08:30",
            "2025-03-16T08:30:00+02:00",
            "2025-03-16T23:59:59.999-05:00",
        ] {
            assert_eq!(
                parse_calendar_date(input).unwrap(),
                date("2025-03-16"),
                "failed on {input}"
            );
        }
    }

    #[test]
    fn test_parse_calendar_date_rejects_trailing_text() {
        assert!(parse_calendar_date("2025-03-16 and more").is_err());
        assert!(parse_calendar_date("2025-03-161").is_err());
    }

    #[test]
    fn test_parse_calendar_date_rejects_empty() {
        assert!(parse_calendar_date("").is_err());
        assert!(parse_calendar_date("   ").is_err());
    }

    #[test]
    fn test_is_displayable_period() {
        assert!(is_displayable_period(1));
        assert!(!is_displayable_period(0));
        assert!(!is_displayable_period(-3));
    }
}
