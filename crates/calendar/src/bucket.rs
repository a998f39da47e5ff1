//! Temporal aggregation buckets.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::error::CalendarError;

/// Aggregation granularity applied when resampling a raw time series.
///
/// Buckets are calendar-aligned: hourly buckets start on the full hour,
/// daily buckets at midnight and monthly buckets on the first of the month.
/// N-daily buckets are anchored at midnight of a caller-chosen day, usually
/// the start of the comparison period, so series that start on different
/// days still share one grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Bucket {
    /// Pass-through: rows are kept as they are.
    #[default]
    None,
    /// One bucket per clock hour.
    Hourly,
    /// One bucket per calendar day.
    Daily,
    /// One bucket per `n` consecutive days.
    NDaily(NonZeroU32),
    /// One bucket per calendar month.
    Monthly,
}

/// Widest accepted N-daily bucket, in days (about a century).
pub const MAX_N_DAILY: u32 = 36_600;

impl Bucket {
    /// Creates an N-daily bucket.
    ///
    /// `n_daily(1)` is normalised to [`Bucket::Daily`].
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::ZeroWidthBucket`] if `n` is zero, or
    /// [`CalendarError::BucketTooWide`] if `n` exceeds [`MAX_N_DAILY`].
    pub fn n_daily(n: u32) -> Result<Self, CalendarError> {
        if n > MAX_N_DAILY {
            return Err(CalendarError::BucketTooWide {
                days: n,
                max: MAX_N_DAILY,
            });
        }
        match NonZeroU32::new(n) {
            None => Err(CalendarError::ZeroWidthBucket),
            Some(w) if w.get() == 1 => Ok(Self::Daily),
            Some(w) => Ok(Self::NDaily(w)),
        }
    }

    /// Returns the start of the bucket containing `ts`.
    ///
    /// `anchor` is the day the N-daily grid starts from and only matters for
    /// [`Bucket::NDaily`]; it may lie before or after `ts`. [`Bucket::None`]
    /// returns `ts` unchanged.
    pub fn floor(self, ts: NaiveDateTime, anchor: NaiveDate) -> NaiveDateTime {
        match self {
            Self::None => ts,
            Self::Hourly => ts
                .date()
                .and_hms_opt(ts.hour(), 0, 0)
                .expect("hour of a valid timestamp is always valid"),
            Self::Daily => ts.date().and_time(NaiveTime::MIN),
            Self::NDaily(n) => {
                let width = i64::from(n.get());
                let offset = (ts.date() - anchor).num_days().div_euclid(width);
                // A bucket opening before the first representable day starts there.
                anchor
                    .checked_add_signed(TimeDelta::days(offset * width))
                    .unwrap_or(NaiveDate::MIN)
                    .and_time(NaiveTime::MIN)
            }
            Self::Monthly => first_of_month(ts.year(), ts.month()).and_time(NaiveTime::MIN),
        }
    }

    /// Returns the start of the bucket following the one that starts at `start`.
    ///
    /// Returns `None` for [`Bucket::None`], which has no regular grid, and
    /// when the next bucket would fall past the last representable date.
    pub fn step(self, start: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Self::None => None,
            Self::Hourly => start.checked_add_signed(TimeDelta::hours(1)),
            Self::Daily => start.checked_add_signed(TimeDelta::days(1)),
            Self::NDaily(n) => start.checked_add_signed(TimeDelta::days(i64::from(n.get()))),
            Self::Monthly => {
                let (year, month) = if start.month() == 12 {
                    (start.year() + 1, 1)
                } else {
                    (start.year(), start.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1).map(|d| d.and_time(NaiveTime::MIN))
            }
        }
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("first day of a valid month exists")
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Hourly => write!(f, "hourly"),
            Self::Daily => write!(f, "daily"),
            Self::NDaily(n) => write!(f, "{n}d"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for Bucket {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_lowercase();
        match text.as_str() {
            "none" | "raw" => Ok(Self::None),
            "hourly" | "h" | "1h" => Ok(Self::Hourly),
            "daily" | "d" => Ok(Self::Daily),
            "monthly" | "m" => Ok(Self::Monthly),
            other => {
                let n: u32 = other
                    .strip_suffix('d')
                    .and_then(|n| n.parse().ok())
                    .ok_or_else(|| CalendarError::InvalidBucket {
                        text: s.to_string(),
                    })?;
                Self::n_daily(n)
            }
        }
    }
}
