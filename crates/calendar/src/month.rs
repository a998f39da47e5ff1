//! Calendar month helpers.

use chrono::NaiveDate;

use crate::error::CalendarError;

/// English month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Returns the English name of `month` (1..=12).
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
pub fn month_name(month: u32) -> Result<&'static str, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    Ok(MONTH_NAMES[(month - 1) as usize])
}

/// Number of days in `month` of `year` in the proleptic Gregorian calendar.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidMonth { month })?;
    let next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or(CalendarError::InvalidMonth { month })?;
    Ok((next - first).num_days() as u32)
}
