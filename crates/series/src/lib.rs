//! # aeolus-series
//!
//! In-memory data model shared by every stage of the comparison pipeline:
//! single [`TimeSeries`], multi-column [`Frame`]s produced by the dataset
//! adapters, [`AlignedSet`]/[`AlignedPair`] on common timestamps, and
//! [`FieldSample`]s for gridded summaries.
//!
//! ```
//! use aeolus_series::{AlignedPair, TimeSeries};
//! use chrono::NaiveDate;
//!
//! let t0 = NaiveDate::from_ymd_opt(2010, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let t1 = NaiveDate::from_ymd_opt(2010, 6, 1).unwrap().and_hms_opt(1, 0, 0).unwrap();
//! let obs = TimeSeries::from_pairs("obs", [(t0, 1.0), (t1, 2.0)]);
//! let model = TimeSeries::from_pairs("model", [(t1, 2.5)]);
//! let pair = AlignedPair::new(&obs, &model);
//! assert_eq!(pair.len(), 1);
//! ```

mod align;
mod error;
mod field;
mod frame;
mod series;

pub use align::{AlignedPair, AlignedSet, align};
pub use error::SeriesError;
pub use field::{FieldSample, FieldSet};
pub use frame::{Frame, MissingPolicy};
pub use series::TimeSeries;
