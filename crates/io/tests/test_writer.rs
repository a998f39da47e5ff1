//! Integration tests: write keyed tables and read them back as text.

use std::collections::BTreeMap;
use std::fs;

use aeolus_calendar::{Bucket, Period};
use aeolus_climatology::{day_of_month_climatology, monthly_climatology};
use aeolus_io::{IoError, write_aligned_csv, write_climatology_csv, write_field_csv};
use aeolus_resample::ParameterTable;
use aeolus_series::{FieldSample, FieldSet, Frame, TimeSeries, align};
use chrono::{NaiveDate, TimeDelta};

fn frame(values: &[f64]) -> Frame {
    let start = NaiveDate::from_ymd_opt(2010, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let timestamps = (0..values.len())
        .map(|i| start + TimeDelta::days(i as i64))
        .collect();
    let mut columns = BTreeMap::new();
    columns.insert("TA_F".to_string(), values.to_vec());
    Frame::new("site", timestamps, columns).unwrap()
}

#[test]
fn aligned_table_layout() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("T_2M").join("Daily").join("aligned.csv");

    let t = |h: i64| {
        NaiveDate::from_ymd_opt(2010, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + TimeDelta::hours(h)
    };
    let obs = TimeSeries::from_pairs("obs", [(t(0), 1.0), (t(1), f64::NAN)]);
    let model = TimeSeries::from_pairs("model", [(t(0), 2.0), (t(1), 3.0)]);
    let set = align(&[&obs, &model]).unwrap();

    write_aligned_csv(&path, &set).expect("write succeeds");
    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "timestamp,obs,model");
    assert_eq!(lines[1], "2010-06-01 00:00:00,1,2");
    assert_eq!(lines[2], "2010-06-01 01:00:00,,3");
}

#[test]
fn climatology_table_layout() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("monthly.csv");
    let table = ParameterTable::standard();
    let a = monthly_climatology(&[frame(&[1.0; 40])], "TA_F", Bucket::Daily, &table).unwrap();
    let b = monthly_climatology(&[frame(&[2.0; 10])], "TA_F", Bucket::Daily, &table).unwrap();

    write_climatology_csv(&path, &[("obs", &a), ("model", &b)]).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[0], "key,label,obs,model");
    assert_eq!(lines[1], "1,January,1,2");
    assert_eq!(lines[2], "2,February,1,");
    assert_eq!(lines[12], "12,December,,");
}

#[test]
fn climatology_mismatch_rejected() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let table = ParameterTable::standard();
    let monthly = monthly_climatology(&[frame(&[1.0; 5])], "TA_F", Bucket::Daily, &table).unwrap();
    let windows = [Period::parse("2010-01-01", "2010-01-31").unwrap()];
    let daily =
        day_of_month_climatology(&frame(&[1.0; 5]), &windows, "TA_F", Bucket::Daily, &table)
            .unwrap();
    let err = write_climatology_csv(&dir.path().join("x.csv"), &[("a", &monthly), ("b", &daily)])
        .unwrap_err();
    assert!(matches!(err, IoError::Validation { count: 1, .. }));
}

#[test]
fn field_table_layout() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("field.csv");
    let field = FieldSet::new(vec![FieldSample {
        lon: 10.0,
        lat: 50.5,
        mean: 1.0,
        sd: 1.0,
        correlation: 0.5,
    }]);
    write_field_csv(&path, &field, &[("kge", &[0.25]), ("rmsd", &[f64::NAN])]).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().nth(1), Some("10,50.5,0.25,"));

    let err = write_field_csv(&path, &field, &[("kge", &[])]).unwrap_err();
    assert!(matches!(err, IoError::Validation { .. }));
}
