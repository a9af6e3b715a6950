//! Presentation-ready data for one employee.
//!
//! Nothing here renders; these functions only shape ledger data into
//! calendars and table rows.

mod calendar;
mod summary;

pub use calendar::{CalendarDay, MonthCalendar, worked_dates};
pub use summary::{
    ABSENT_LABEL, AttendanceEntry, EmployeePeriodLine, MISSING_DATE, UNSET_LABEL, WORKED_LABEL,
    attendance_entries, employee_period_lines, status_label,
};
