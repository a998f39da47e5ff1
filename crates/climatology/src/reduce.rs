//! Reduction of resampled series to climatological cycles.

use aeolus_calendar::{Bucket, Period};
use aeolus_resample::{ParameterTable, ResampleError, resample_parameter};
use aeolus_series::{Frame, SeriesError, TimeSeries};
use tracing::{debug, warn};

use crate::cycle::{Climatology, Cycle};
use crate::error::ClimatologyError;

const MONTHS: usize = 12;
const HOURS: usize = 24;
const MAX_DAYS: usize = 31;

/// Mean seasonal cycle pooled over every frame.
///
/// Each frame's `parameter` column is resampled onto `bucket`; all rows are
/// then pooled by calendar month and averaged, ignoring `NaN`. Frames that
/// lack the column are skipped. The result always has 12 slots.
///
/// # Errors
///
/// Returns [`ClimatologyError::NoDatasets`] if `frames` is empty, or a
/// resampling error other than a missing column.
pub fn monthly_climatology(
    frames: &[Frame],
    parameter: &str,
    bucket: Bucket,
    table: &ParameterTable,
) -> Result<Climatology, ClimatologyError> {
    monthly_climatology_over(frames, None, parameter, bucket, table)
}

/// [`monthly_climatology`] restricted to `period`.
///
/// Rows outside the period are dropped before pooling, so the cycle
/// describes the same span as a comparison run over that period.
///
/// # Errors
///
/// As [`monthly_climatology`].
pub fn monthly_climatology_over(
    frames: &[Frame],
    period: Option<&Period>,
    parameter: &str,
    bucket: Bucket,
    table: &ParameterTable,
) -> Result<Climatology, ClimatologyError> {
    if frames.is_empty() {
        return Err(ClimatologyError::NoDatasets {
            parameter: parameter.to_string(),
        });
    }

    let mut slots: Vec<Vec<f64>> = vec![Vec::new(); MONTHS];
    let mut found = false;
    for frame in frames {
        let Some(series) = load(frame, parameter, period, bucket, table)? else {
            continue;
        };
        found = true;
        bin(&series, Cycle::Monthly, &mut slots);
    }

    if !found {
        warn!(parameter, "parameter absent from every dataset, table is all NaN");
    }
    let values = slots.iter().map(|s| aeolus_stats::nan_mean(s)).collect();
    Ok(Climatology::from_slots(parameter, Cycle::Monthly, values))
}

/// Mean value per day of month, averaged in two stages.
///
/// For every window the resampled series is averaged by day of month, then
/// the per-window profiles are averaged slot by slot. Each window therefore
/// weighs the same regardless of how many rows it holds.
///
/// The table has as many slots as the largest day of month covered by any
/// window (31 when `windows` is empty).
///
/// # Errors
///
/// Returns a resampling error other than a missing column.
pub fn day_of_month_climatology(
    frame: &Frame,
    windows: &[Period],
    parameter: &str,
    bucket: Bucket,
    table: &ParameterTable,
) -> Result<Climatology, ClimatologyError> {
    let n_slots = windows
        .iter()
        .map(|w| w.max_day_of_month() as usize)
        .max()
        .unwrap_or(MAX_DAYS);
    two_stage(frame, windows, parameter, bucket, table, Cycle::DayOfMonth, n_slots)
}

/// Mean diurnal cycle (hours 0..=23), averaged in two stages over `windows`.
///
/// Use a sub-daily `bucket` ([`Bucket::None`] or [`Bucket::Hourly`]);
/// coarser buckets collapse everything onto hour 0.
///
/// # Errors
///
/// Returns a resampling error other than a missing column.
pub fn diurnal_climatology(
    frame: &Frame,
    windows: &[Period],
    parameter: &str,
    bucket: Bucket,
    table: &ParameterTable,
) -> Result<Climatology, ClimatologyError> {
    two_stage(frame, windows, parameter, bucket, table, Cycle::Diurnal, HOURS)
}

fn two_stage(
    frame: &Frame,
    windows: &[Period],
    parameter: &str,
    bucket: Bucket,
    table: &ParameterTable,
    cycle: Cycle,
    n_slots: usize,
) -> Result<Climatology, ClimatologyError> {
    let mut profiles: Vec<Vec<f64>> = vec![Vec::new(); n_slots];
    let mut found = false;

    for window in windows {
        let Some(series) = load(frame, parameter, Some(window), bucket, table)? else {
            // The column is missing for every window alike.
            break;
        };
        found = true;
        let mut slots: Vec<Vec<f64>> = vec![Vec::new(); n_slots];
        bin(&series, cycle, &mut slots);
        for (profile, slot) in profiles.iter_mut().zip(&slots) {
            profile.push(aeolus_stats::nan_mean(slot));
        }
    }

    if !found {
        warn!(
            parameter,
            dataset = frame.name(),
            %cycle,
            "no data for climatology, table is all NaN"
        );
    }
    let values = profiles.iter().map(|p| aeolus_stats::nan_mean(p)).collect();
    Ok(Climatology::from_slots(parameter, cycle, values))
}

/// Resamples one column, mapping a missing column to `None`.
fn load(
    frame: &Frame,
    parameter: &str,
    period: Option<&Period>,
    bucket: Bucket,
    table: &ParameterTable,
) -> Result<Option<TimeSeries>, ClimatologyError> {
    match resample_parameter(frame, parameter, period, bucket, table) {
        Ok(series) => Ok(Some(series)),
        Err(ResampleError::Series(SeriesError::MissingColumn { .. })) => {
            debug!(parameter, dataset = frame.name(), "skipping dataset without column");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn bin(series: &TimeSeries, cycle: Cycle, slots: &mut [Vec<f64>]) {
    let first = cycle.first_key();
    for (ts, v) in series.iter() {
        let idx = (cycle.key(ts) - first) as usize;
        if let Some(slot) = slots.get_mut(idx) {
            slot.push(v);
        }
    }
}
