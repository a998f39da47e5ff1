//! Error types for the aeolus-calendar crate.

/// Error type for all fallible operations in the aeolus-calendar crate.
///
/// Covers invalid month numbers, reversed date ranges, unparsable dates and
/// bucket specifications that cannot be turned into an aggregation width.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u32,
    },

    /// Returned when a period ends before it starts.
    #[error("invalid period: start {start} is after end {end}")]
    InvalidPeriod {
        /// First day of the rejected range.
        start: chrono::NaiveDate,
        /// Last day of the rejected range.
        end: chrono::NaiveDate,
    },

    /// Returned when a date string cannot be parsed as `YYYY-MM-DD`.
    #[error("invalid date: '{text}' (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The text that failed to parse.
        text: String,
    },

    /// Returned when a bucket specification is not recognised.
    #[error("invalid bucket: '{text}' (expected none, hourly, daily, <n>d or monthly)")]
    InvalidBucket {
        /// The text that failed to parse.
        text: String,
    },

    /// Returned when an N-daily bucket is requested with a width of zero days.
    #[error("N-daily bucket width must be at least 1 day")]
    ZeroWidthBucket,

    /// Returned when an N-daily bucket is wider than the supported maximum.
    #[error("N-daily bucket width {days} exceeds the maximum of {max} days")]
    BucketTooWide {
        /// Requested width in days.
        days: u32,
        /// Largest accepted width.
        max: u32,
    },
}
