//! Climatological reduction of resampled climate series.
//!
//! A climatology collapses a series onto a recurring calendar position:
//! the month of the year, the day of the month or the hour of the day.
//! Inputs are resampled first (see `aeolus-resample`) so unit and sign
//! rules are applied before any averaging.
//!
//! ```text
//! monthly:        frames ──▶ resample ──▶ pool by month ──▶ mean      (12 slots)
//! day-of-month:   window ──▶ resample ──▶ mean by day   ─┐
//!                 window ──▶ resample ──▶ mean by day   ─┴▶ mean     (≤ 31 slots)
//! diurnal:        same two-stage shape, grouped by hour              (24 slots)
//! ```
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `cycle` | [`Cycle`] and the reduced [`Climatology`] table |
//! | `reduce` | The reducers |
//! | `error` | [`ClimatologyError`] |

mod cycle;
mod error;
mod reduce;

pub use cycle::{Climatology, Cycle};
pub use error::ClimatologyError;
pub use reduce::{
    day_of_month_climatology, diurnal_climatology, monthly_climatology, monthly_climatology_over,
};
