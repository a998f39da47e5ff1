use aeolus_metrics::{DAV_BINS, Histogram, MetricError, correlation, dav, kge, rmsd_pair};
use aeolus_series::{AlignedPair, TimeSeries};
use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2012, 7, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Helper: hourly series starting `offset` hours after `base()`.
fn hourly(name: &str, offset: i64, values: &[f64]) -> TimeSeries {
    TimeSeries::from_pairs(
        name,
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| (base() + TimeDelta::hours(offset + i as i64), v)),
    )
}

fn wave(n: usize) -> Vec<f64> {
    (0..n).map(|i| 15.0 + 8.0 * (i as f64 * 0.26).sin()).collect()
}

#[test]
fn self_comparison_is_perfect() {
    let obs = hourly("obs", 0, &wave(240));
    let pair = AlignedPair::new(&obs, &obs);
    assert_eq!(kge(&pair).unwrap(), 1.0);
    assert_eq!(rmsd_pair(&pair).unwrap(), 0.0);
}

#[test]
fn two_hour_offset_alignment() {
    let values = wave(48);
    let obs = hourly("obs", 0, &values);
    let model = hourly("model", 2, &values);
    let pair = AlignedPair::new(&obs, &model);
    assert_eq!(pair.len(), 46);
    assert_eq!(pair.timestamps()[0], base() + TimeDelta::hours(2));
    // The candidate lags the reference by two hours.
    assert_eq!(pair.candidate()[0], values[0]);
    assert_eq!(pair.reference()[0], values[2]);
    let r = correlation(&pair).unwrap();
    assert!(r < 1.0);
}

#[test]
fn gaps_are_dropped_before_scoring() {
    let mut with_gaps = wave(100);
    with_gaps[10] = f64::NAN;
    with_gaps[55] = f64::NAN;
    let obs = hourly("obs", 0, &with_gaps);
    let model = hourly("model", 0, &wave(100));
    let pair = AlignedPair::new(&obs, &model);
    assert_eq!(pair.complete().len(), 98);
    assert_relative_eq!(kge(&pair).unwrap(), 1.0, epsilon = 1e-12);
}

#[test]
fn dav_identical_runs_is_zero() {
    let observed = wave(500);
    let run: Vec<f64> = observed.iter().map(|v| v * 1.3 - 4.0).collect();
    assert_eq!(dav(&run, &run, &observed).unwrap(), 0.0);
}

#[test]
fn one_value_per_bin() {
    let values = [-20.0, -7.0, -2.0, 3.0, 7.0, 12.0, 17.0, 22.0, 27.0, 35.0];
    let h = Histogram::from_values(&values);
    assert_eq!(h.counts(), &[1; DAV_BINS]);
    for f in h.frequencies() {
        assert_relative_eq!(f, 0.1);
    }
}

#[test]
fn empty_observation_makes_dav_undefined() {
    let err = dav(&[1.0], &[2.0], &[]).unwrap_err();
    assert!(matches!(err, MetricError::UndefinedMetric { .. }));
}
