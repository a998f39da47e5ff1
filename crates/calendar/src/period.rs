//! Inclusive calendar-day ranges.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::CalendarError;
use crate::month::days_in_month;

/// A contiguous range of calendar days, inclusive at both ends.
///
/// A timestamp belongs to the period when its date falls inside the range,
/// so `2010-06-01..=2010-06-30` covers every hour of June 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

impl Period {
    /// Creates a new period.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidPeriod`] if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a period from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if either string fails to parse,
    /// or [`CalendarError::InvalidPeriod`] if the range is reversed.
    pub fn parse(start: &str, end: &str) -> Result<Self, CalendarError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// The whole of one calendar month.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn month(year: i32, month: u32) -> Result<Self, CalendarError> {
        let last = days_in_month(year, month)?;
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(CalendarError::InvalidMonth { month })?;
        let end = NaiveDate::from_ymd_opt(year, month, last)
            .ok_or(CalendarError::InvalidMonth { month })?;
        Self::new(start, end)
    }

    /// The same calendar month in every year of `first_year..=last_year`,
    /// e.g. "June of each year from 2010 to 2015".
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn month_of_years(
        first_year: i32,
        last_year: i32,
        month: u32,
    ) -> Result<Vec<Self>, CalendarError> {
        (first_year..=last_year)
            .map(|year| Self::month(year, month))
            .collect()
    }

    /// First day of the period.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the period (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns `true` if the date of `ts` lies inside the period.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        let date = ts.date();
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered.
    pub fn n_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Largest day-of-month that occurs inside the period.
    pub fn max_day_of_month(&self) -> u32 {
        let mut max = 0;
        for date in self.start.iter_days().take_while(|d| *d <= self.end) {
            max = max.max(date.day());
            if max == 31 {
                break;
            }
        }
        max
    }
}

fn parse_date(text: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| CalendarError::InvalidDate {
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_rejects_reversed() {
        assert!(matches!(
            Period::new(day(2010, 7, 1), day(2010, 6, 1)),
            Err(CalendarError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn single_day_is_valid() {
        let p = Period::new(day(2010, 6, 1), day(2010, 6, 1)).unwrap();
        assert_eq!(p.n_days(), 1);
    }

    #[test]
    fn contains_whole_last_day() {
        let p = Period::parse("2010-06-01", "2010-06-30").unwrap();
        let late = day(2010, 6, 30).and_hms_opt(23, 0, 0).unwrap();
        let after = day(2010, 7, 1).and_hms_opt(0, 0, 0).unwrap();
        assert!(p.contains(late));
        assert!(!p.contains(after));
    }

    #[test]
    fn parse_invalid_date() {
        assert!(matches!(
            Period::parse("2010-13-01", "2010-12-31"),
            Err(CalendarError::InvalidDate { .. })
        ));
    }

    #[test]
    fn month_covers_february_leap_year() {
        let p = Period::month(2012, 2).unwrap();
        assert_eq!(p.end(), day(2012, 2, 29));
        assert_eq!(p.max_day_of_month(), 29);
    }

    #[test]
    fn month_of_years() {
        let windows = Period::month_of_years(2010, 2015, 6).unwrap();
        assert_eq!(windows.len(), 6);
        assert_eq!(windows[0].start(), day(2010, 6, 1));
        assert_eq!(windows[5].end(), day(2015, 6, 30));
    }

    #[test]
    fn max_day_of_month_partial() {
        let p = Period::new(day(2010, 6, 3), day(2010, 6, 10)).unwrap();
        assert_eq!(p.max_day_of_month(), 10);
        let long = Period::new(day(2010, 1, 1), day(2010, 3, 31)).unwrap();
        assert_eq!(long.max_day_of_month(), 31);
    }
}
