//! # aeolus-calendar
//!
//! Date ranges and aggregation buckets for station-scale climate series.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["NaiveDateTime"] -->|"Bucket::floor()"| B["bucket start"]
//!     B -->|"Bucket::step()"| B
//!     C["Period"] -->|".contains()"| A
//!     C -->|"Period::month_of_years()"| D["Vec of Period windows"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use aeolus_calendar::{Bucket, Period};
//!
//! let june = Period::parse("2010-06-01", "2010-06-30").unwrap();
//! assert_eq!(june.n_days(), 30);
//!
//! let bucket: Bucket = "5d".parse().unwrap();
//! assert_eq!(bucket, Bucket::n_daily(5).unwrap());
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `bucket` | Aggregation granularity and bucket flooring |
//! | `period` | Inclusive calendar-day ranges |
//! | `month` | Month names and lengths |
//! | `error` | Error types |

mod bucket;
mod error;
mod month;
mod period;

pub use bucket::{Bucket, MAX_N_DAILY};
pub use error::CalendarError;
pub use month::{MONTH_NAMES, days_in_month, month_name};
pub use period::Period;
