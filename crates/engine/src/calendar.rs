use chrono::{Datelike, Days, NaiveDate};

use crate::model::{DateRange, Holiday, HolidaySettings, Leave, LeaveStatus};

// ---------------------------------------------------------------------------
// Date axis
// ---------------------------------------------------------------------------

/// The contiguous sequence of calendar dates covered by `range`, inclusive
/// of both endpoints. An inverted range yields an empty axis.
pub fn date_axis(range: &DateRange) -> Vec<NaiveDate> {
    span_days(range.start, range.end)
}

/// Enumerate every date from `start` through `end` inclusive. Empty when
/// `start > end`.
pub fn span_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(current);
        current = match current.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    days
}

// ---------------------------------------------------------------------------
// Day predicates
// ---------------------------------------------------------------------------

/// Whether `date` falls on a configured weekend day. Weekday indices use
/// 0 = Sunday .. 6 = Saturday, matching the settings representation.
pub fn is_weekend(date: NaiveDate, weekend_days: &[u32]) -> bool {
    weekend_days.contains(&date.weekday().num_days_from_sunday())
}

/// Find the holiday covering `date`, if any. Non-recurring holidays match
/// on the exact date; recurring ones match by month and day, ignoring the
/// year. The first match in collection order wins.
pub fn find_holiday(date: NaiveDate, holidays: &[Holiday]) -> Option<&Holiday> {
    holidays.iter().find(|h| {
        if h.recurring {
            h.date.month() == date.month() && h.date.day() == date.day()
        } else {
            h.date == date
        }
    })
}

/// Find the approved leave of `resource_id` covering `date`, if any.
/// Pending and rejected leave never matches.
pub fn find_leave<'a>(
    date: NaiveDate,
    resource_id: &str,
    leaves: &'a [Leave],
) -> Option<&'a Leave> {
    leaves.iter().find(|l| {
        l.status == LeaveStatus::Approved
            && l.resource_id == resource_id
            && l.start_date <= date
            && date <= l.end_date
    })
}

/// A work day is neither a weekend day nor a holiday. A date that is both
/// at once is still a single non-work day.
pub fn is_work_day(date: NaiveDate, settings: &HolidaySettings) -> bool {
    !is_weekend(date, &settings.weekend_days) && find_holiday(date, &settings.holidays).is_none()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
