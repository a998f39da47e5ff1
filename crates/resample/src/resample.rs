//! Temporal resampling.

use aeolus_calendar::{Bucket, Period};
use aeolus_series::{Frame, TimeSeries};
use chrono::NaiveDate;
use tracing::debug;

use crate::error::ResampleError;
use crate::parameter::{Aggregation, ParameterSpec, ParameterTable};

/// Resamples `series` onto `bucket` over `period` using the rules of `spec`.
///
/// With `period = None` the series' own range is used. A period that does
/// not intersect the data yields an empty series. The input is never
/// modified; the clamp acts on a private copy.
///
/// Every bucket between the first and the last populated one is emitted, so
/// gaps show up as `NaN` (mean) or `0.0` (sum) before the post-transform.
///
/// N-daily buckets start at `period.start()`, or at the first sample's day
/// without a period. Use [`resample_from`] to choose the grid anchor.
pub fn resample(
    series: &TimeSeries,
    period: Option<&Period>,
    spec: &ParameterSpec,
    bucket: Bucket,
) -> TimeSeries {
    resample_from(series, period, spec, bucket, period.map(Period::start))
}

/// [`resample`] with an explicit N-daily grid anchor.
///
/// Series resampled with the same anchor share bucket starts and therefore
/// align. `anchor = None` falls back to the first sample's day.
pub fn resample_from(
    series: &TimeSeries,
    period: Option<&Period>,
    spec: &ParameterSpec,
    bucket: Bucket,
    anchor: Option<NaiveDate>,
) -> TimeSeries {
    let sliced = match period {
        Some(p) => series.slice(p),
        None => series.clone(),
    };
    if sliced.is_empty() {
        debug!(series = series.name(), "no rows inside requested period");
        return TimeSeries::empty(series.name());
    }

    let clamped = if spec.clamp_max().is_some() {
        sliced.map_values(|v| spec.clamp(v))
    } else {
        sliced
    };

    aggregate(&clamped, spec.aggregation(), bucket, anchor).map_values(|v| spec.transform(v))
}

/// Reads source `column` from `frame` (honouring its missing-column policy)
/// and resamples it with the spec resolved from `table` for that column.
///
/// The spec follows the dataset's own column name, so a model's `T_2M` in
/// Kelvin is converted while an observed `TA_F` in °C is left alone.
///
/// # Errors
///
/// Returns [`ResampleError::Series`] if the column is missing and the
/// column's policy does not substitute it.
pub fn resample_parameter(
    frame: &Frame,
    column: &str,
    period: Option<&Period>,
    bucket: Bucket,
    table: &ParameterTable,
) -> Result<TimeSeries, ResampleError> {
    resample_parameter_from(frame, column, period, bucket, table, period.map(Period::start))
}

/// [`resample_parameter`] with an explicit N-daily grid anchor.
///
/// # Errors
///
/// Same as [`resample_parameter`].
pub fn resample_parameter_from(
    frame: &Frame,
    column: &str,
    period: Option<&Period>,
    bucket: Bucket,
    table: &ParameterTable,
    anchor: Option<NaiveDate>,
) -> Result<TimeSeries, ResampleError> {
    let spec = table.resolve(column);
    let series = frame.series_or(column, spec.missing_policy())?;
    Ok(resample_from(&series, period, &spec, bucket, anchor))
}

/// Common N-daily anchor for several frames.
///
/// The period start when one is given, otherwise the earliest first day
/// over `frames`. `None` when every frame is empty and no period is set.
pub fn grid_anchor<'a, I>(period: Option<&Period>, frames: I) -> Option<NaiveDate>
where
    I: IntoIterator<Item = &'a Frame>,
{
    if let Some(p) = period {
        return Some(p.start());
    }
    frames
        .into_iter()
        .filter_map(|f| f.timestamps().first())
        .map(|t| t.date())
        .min()
}

fn aggregate(
    series: &TimeSeries,
    aggregation: Aggregation,
    bucket: Bucket,
    anchor: Option<NaiveDate>,
) -> TimeSeries {
    let (Some(first), Some(last)) = (series.first_timestamp(), series.last_timestamp()) else {
        return TimeSeries::empty(series.name());
    };
    if bucket == Bucket::None {
        return series.clone();
    }

    let anchor = anchor.unwrap_or(first.date());
    let end = bucket.floor(last, anchor);
    let mut cursor = bucket.floor(first, anchor);
    let mut rows = series.iter().peekable();
    let mut scratch = Vec::new();
    let mut out = Vec::new();

    loop {
        // No successor past the last representable date: the bucket is open.
        let next = bucket.step(cursor);
        scratch.clear();
        while let Some((_, v)) = rows.next_if(|(t, _)| next.is_none_or(|n| *t < n)) {
            scratch.push(v);
        }
        let value = match aggregation {
            Aggregation::Mean => aeolus_stats::nan_mean(&scratch),
            Aggregation::Sum => aeolus_stats::nan_sum(&scratch),
        };
        out.push((cursor, value));
        match next {
            Some(n) if cursor < end => cursor = n,
            _ => break,
        }
    }

    TimeSeries::from_pairs(series.name(), out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

    fn hourly(values: &[f64]) -> TimeSeries {
        let base = NaiveDate::from_ymd_opt(2010, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        TimeSeries::from_pairs(
            "x",
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (base + TimeDelta::hours(i as i64), v)),
        )
    }

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2010, 6, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn none_bucket_is_pass_through() {
        let s = hourly(&[1.0, 2.0, 3.0]);
        let out = resample(&s, None, &ParameterSpec::mean("x"), Bucket::None);
        assert_eq!(out, s);
    }

    #[test]
    fn daily_mean_skips_nan() {
        let mut values = vec![1.0; 24];
        values[5] = f64::NAN;
        values.extend(vec![3.0; 24]);
        let out = resample(&hourly(&values), None, &ParameterSpec::mean("x"), Bucket::Daily);
        assert_eq!(out.timestamps(), &[day(1), day(2)]);
        assert_eq!(out.values(), &[1.0, 3.0]);
    }

    #[test]
    fn gap_buckets_are_emitted() {
        let s = TimeSeries::from_pairs("x", [(day(1), 1.0), (day(4), 4.0)]);
        let mean = resample(&s, None, &ParameterSpec::mean("x"), Bucket::Daily);
        assert_eq!(mean.len(), 4);
        assert!(mean.values()[1].is_nan());
        let sum = resample(&s, None, &ParameterSpec::sum("x"), Bucket::Daily);
        assert_eq!(sum.values(), &[1.0, 0.0, 0.0, 4.0]);
    }

    #[test]
    fn clamp_does_not_touch_input() {
        let s = hourly(&[25000.0, 15000.0]);
        let spec = ParameterSpec::mean("RSTOM").clamped_at(20000.0);
        let out = resample(&s, None, &spec, Bucket::Daily);
        assert_eq!(out.values(), &[17500.0]);
        assert_eq!(s.values(), &[25000.0, 15000.0]);
    }

    #[test]
    fn n_daily_grid_starts_at_period_start() {
        let s = TimeSeries::from_pairs("x", (3..=12).map(|d| (day(d), f64::from(d))));
        let period = Period::parse("2010-06-01", "2010-06-30").unwrap();
        let bucket = Bucket::n_daily(5).unwrap();
        let out = resample(&s, Some(&period), &ParameterSpec::mean("x"), bucket);
        assert_eq!(out.timestamps(), &[day(1), day(6), day(11)]);
        assert_eq!(out.values(), &[4.0, 8.0, 11.5]);
    }

    #[test]
    fn explicit_anchor_overrides_first_day() {
        let s = TimeSeries::from_pairs("x", (3..=7).map(|d| (day(d), 1.0)));
        let bucket = Bucket::n_daily(5).unwrap();
        let spec = ParameterSpec::sum("x");
        let own = resample_from(&s, None, &spec, bucket, None);
        assert_eq!(own.timestamps(), &[day(3)]);
        let shared = resample_from(&s, None, &spec, bucket, Some(day(1).date()));
        assert_eq!(shared.timestamps(), &[day(1), day(6)]);
        assert_eq!(shared.values(), &[3.0, 2.0]);
    }

    #[test]
    fn grid_end_at_calendar_limit() {
        let last = NaiveDate::MAX.and_hms_opt(0, 0, 0).unwrap();
        let s = TimeSeries::from_pairs("x", [(last - TimeDelta::days(1), 1.0), (last, 3.0)]);
        let out = resample(&s, None, &ParameterSpec::mean("x"), Bucket::Daily);
        assert_eq!(out.values(), &[1.0, 3.0]);
        let wide = Bucket::n_daily(aeolus_calendar::MAX_N_DAILY).unwrap();
        let out = resample(&s, None, &ParameterSpec::mean("x"), wide);
        assert_eq!(out.values(), &[2.0]);
    }

    #[test]
    fn period_outside_data_is_empty() {
        let s = hourly(&[1.0, 2.0]);
        let period = Period::parse("2012-01-01", "2012-01-31").unwrap();
        let out = resample(&s, Some(&period), &ParameterSpec::mean("x"), Bucket::Daily);
        assert!(out.is_empty());
        assert_eq!(out.name(), "x");
    }
}
