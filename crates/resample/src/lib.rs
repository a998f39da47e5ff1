//! Temporal resampling for the Aeolus comparison pipeline.
//!
//! Turns a raw time-indexed series into an aggregated one on a calendar
//! [`Bucket`](aeolus_calendar::Bucket), applying the unit, sign and clamp
//! rules of the parameter being resampled. Rules live in a
//! [`ParameterTable`], looked up once per call by the dataset's own source
//! column name.
//!
//! # Pipeline
//!
//! ```text
//!  ┌─────────┐    ┌──────────────┐    ┌─────────────┐    ┌───────────────────┐
//!  │  slice  │───▶│ clamp (copy) │───▶│  aggregate  │───▶│ sign/scale/offset │
//!  │ (Period)│    │              │    │ (mean/sum)  │    │                   │
//!  └─────────┘    └──────────────┘    └─────────────┘    └───────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```
//! use aeolus_calendar::Bucket;
//! use aeolus_resample::{ParameterTable, resample};
//! use aeolus_series::TimeSeries;
//! use chrono::NaiveDate;
//!
//! let t = NaiveDate::from_ymd_opt(2010, 6, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let raw = TimeSeries::from_pairs("LHFL_S", [(t, -50.0)]);
//! let table = ParameterTable::standard();
//! let daily = resample(&raw, None, &table.resolve("LHFL_S"), Bucket::Daily);
//! assert_eq!(daily.values(), &[50.0]);
//! ```

mod error;
mod parameter;
mod resample;

pub use error::ResampleError;
pub use parameter::{
    Aggregation, KELVIN_OFFSET, PA_PER_HPA, ParameterSpec, ParameterTable, SECONDS_PER_HOUR,
    STOMATAL_RESISTANCE_MAX, Sign,
};
pub use resample::{
    grid_anchor, resample, resample_from, resample_parameter, resample_parameter_from,
};
