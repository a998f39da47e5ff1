//! Reading delimited-text datasets into frames.

use std::collections::BTreeMap;
use std::path::Path;

use aeolus_series::{FieldSample, FieldSet, Frame};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::IoError;
use crate::profile::{Delimiter, FormatProfile};

/// Reads a dataset file laid out according to `profile`.
///
/// Every column except the timestamp columns becomes a numeric column of
/// the frame. The frame is named after the file stem. Rows are sorted by
/// timestamp and repeated timestamps are dropped, keeping the first.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::MissingColumn`] if a timestamp column is absent,
/// [`IoError::InvalidTime`] if a timestamp cannot be parsed, or
/// [`IoError::Csv`] on malformed input.
pub fn read_frame(path: &Path, profile: &FormatProfile) -> Result<Frame, IoError> {
    profile.validate()?;
    let text = std::fs::read_to_string(path).map_err(|e| IoError::filesystem(path, e))?;
    let body = prepare(&text, profile);

    let delimiter = match profile.delimiter() {
        Delimiter::Byte(b) => b,
        Delimiter::Whitespace => b',',
    };
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IoError::csv(path, e))?
        .iter()
        .map(|h| profile.rename(h).to_string())
        .collect();

    let mut time_idx = Vec::with_capacity(profile.timestamp_columns().len());
    for column in profile.timestamp_columns() {
        let idx = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| IoError::MissingColumn {
                name: column.clone(),
                path: path.to_path_buf(),
            })?;
        time_idx.push(idx);
    }
    let value_idx: Vec<usize> = (0..headers.len())
        .filter(|i| !time_idx.contains(i))
        .collect();

    let mut timestamps = Vec::new();
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); value_idx.len()];
    for record in reader.records() {
        let record = record.map_err(|e| IoError::csv(path, e))?;
        let line = record.position().map_or(0, |p| p.line()) + profile.header_skip() as u64;

        let stamp = time_idx
            .iter()
            .map(|&i| record.get(i).unwrap_or(""))
            .collect::<Vec<_>>()
            .join(" ");
        let ts = parse_timestamp(&stamp, profile.timestamp_format()).ok_or_else(|| {
            IoError::InvalidTime {
                text: stamp.clone(),
                line,
                path: path.to_path_buf(),
            }
        })?;
        timestamps.push(ts);

        for (column, &i) in values.iter_mut().zip(&value_idx) {
            column.push(record.get(i).map_or(f64::NAN, |c| profile.parse_value(c)));
        }
    }

    let columns: BTreeMap<String, Vec<f64>> = value_idx
        .iter()
        .map(|&i| headers[i].clone())
        .zip(values)
        .collect();
    let name = path
        .file_stem()
        .map_or_else(|| profile.name().to_string(), |s| s.to_string_lossy().into_owned());

    info!(
        path = %path.display(),
        format = profile.name(),
        rows = timestamps.len(),
        columns = columns.len(),
        "read dataset"
    );
    Ok(Frame::new(name, timestamps, columns)?)
}

/// Drops the preamble and turns whitespace-separated rows into
/// comma-separated ones.
fn prepare(text: &str, profile: &FormatProfile) -> String {
    let lines = text.lines().skip(profile.header_skip());
    match profile.delimiter() {
        Delimiter::Byte(_) => lines.collect::<Vec<_>>().join("\n"),
        Delimiter::Whitespace => lines
            .map(|l| l.split_whitespace().collect::<Vec<_>>().join(","))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn parse_timestamp(text: &str, format: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, format)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[derive(Debug, Deserialize)]
struct FieldRecord {
    lon: f64,
    lat: f64,
    mean: f64,
    sd: f64,
    correlation: f64,
}

/// Reads per-grid-point moments from a `lon,lat,mean,sd,correlation` CSV.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist, or
/// [`IoError::Csv`] if a row is malformed.
pub fn read_field_samples(path: &Path) -> Result<FieldSet, IoError> {
    let file = std::fs::File::open(path).map_err(|e| IoError::filesystem(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut samples = Vec::new();
    for record in reader.deserialize::<FieldRecord>() {
        let r = record.map_err(|e| IoError::csv(path, e))?;
        samples.push(FieldSample {
            lon: r.lon,
            lat: r.lat,
            mean: r.mean,
            sd: r.sd,
            correlation: r.correlation,
        });
    }
    debug!(path = %path.display(), points = samples.len(), "read field samples");
    Ok(FieldSet::new(samples))
}
