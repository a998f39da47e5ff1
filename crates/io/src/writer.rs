//! CSV table writers for the plotting layer.
//!
//! Missing values are written as empty cells.

use std::fs::File;
use std::path::Path;

use aeolus_climatology::Climatology;
use aeolus_series::{AlignedSet, FieldSet};
use tracing::debug;

use crate::error::IoError;

/// Timestamp format used in every written table.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn create(path: &Path) -> Result<csv::Writer<File>, IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| IoError::filesystem(parent, e))?;
    }
    csv::Writer::from_path(path).map_err(|e| IoError::csv(path, e))
}

fn cell(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

/// Writes aligned series as `timestamp,<name>,<name>,...`.
///
/// # Errors
///
/// Returns [`IoError::Filesystem`] if the parent directory cannot be
/// created, or [`IoError::Csv`] if writing fails.
pub fn write_aligned_csv(path: &Path, set: &AlignedSet) -> Result<(), IoError> {
    let mut writer = create(path)?;
    let mut header = vec!["timestamp".to_string()];
    header.extend(set.names().iter().cloned());
    writer
        .write_record(&header)
        .map_err(|e| IoError::csv(path, e))?;

    for (row, ts) in set.timestamps().iter().enumerate() {
        let mut record = vec![ts.format(TIMESTAMP_FORMAT).to_string()];
        record.extend((0..set.n_series()).map(|i| cell(set.column(i)[row])));
        writer
            .write_record(&record)
            .map_err(|e| IoError::csv(path, e))?;
    }
    writer
        .flush()
        .map_err(|e| IoError::filesystem(path, e))?;
    debug!(path = %path.display(), rows = set.len(), "wrote aligned table");
    Ok(())
}

/// Writes climatologies side by side as `key,label,<column>,...`.
///
/// Each entry pairs a column name (usually the dataset) with its table.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the tables differ in cycle or
/// length, or an I/O error if writing fails.
pub fn write_climatology_csv(
    path: &Path,
    columns: &[(&str, &Climatology)],
) -> Result<(), IoError> {
    let Some((_, first)) = columns.first() else {
        return Err(IoError::Validation {
            count: 1,
            details: "no climatology to write".to_string(),
        });
    };
    let mismatched: Vec<String> = columns
        .iter()
        .filter(|(_, c)| c.cycle() != first.cycle() || c.len() != first.len())
        .map(|(name, c)| format!("{name} has {} {} slots", c.len(), c.cycle()))
        .collect();
    if !mismatched.is_empty() {
        return Err(IoError::Validation {
            count: mismatched.len(),
            details: mismatched.join("; "),
        });
    }

    let mut writer = create(path)?;
    let mut header = vec!["key".to_string(), "label".to_string()];
    header.extend(columns.iter().map(|(name, _)| name.to_string()));
    writer
        .write_record(&header)
        .map_err(|e| IoError::csv(path, e))?;

    for (slot, (key, label)) in first.keys().iter().zip(first.labels()).enumerate() {
        let mut record = vec![key.to_string(), label];
        record.extend(columns.iter().map(|(_, c)| cell(c.values()[slot])));
        writer
            .write_record(&record)
            .map_err(|e| IoError::csv(path, e))?;
    }
    writer
        .flush()
        .map_err(|e| IoError::filesystem(path, e))?;
    Ok(())
}

/// Writes per-grid-point metrics as `lon,lat,<metric>,...`.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if a metric column does not have one
/// value per grid point, or an I/O error if writing fails.
pub fn write_field_csv(
    path: &Path,
    field: &FieldSet,
    metrics: &[(&str, &[f64])],
) -> Result<(), IoError> {
    let bad: Vec<String> = metrics
        .iter()
        .filter(|(_, v)| v.len() != field.len())
        .map(|(name, v)| format!("{name} has {} values for {} points", v.len(), field.len()))
        .collect();
    if !bad.is_empty() {
        return Err(IoError::Validation {
            count: bad.len(),
            details: bad.join("; "),
        });
    }

    let mut writer = create(path)?;
    let mut header = vec!["lon".to_string(), "lat".to_string()];
    header.extend(metrics.iter().map(|(name, _)| name.to_string()));
    writer
        .write_record(&header)
        .map_err(|e| IoError::csv(path, e))?;

    for (i, sample) in field.iter().enumerate() {
        let mut record = vec![sample.lon.to_string(), sample.lat.to_string()];
        record.extend(metrics.iter().map(|(_, v)| cell(v[i])));
        writer
            .write_record(&record)
            .map_err(|e| IoError::csv(path, e))?;
    }
    writer
        .flush()
        .map_err(|e| IoError::filesystem(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_cell_is_empty() {
        assert_eq!(cell(f64::NAN), "");
        assert_eq!(cell(1.5), "1.5");
    }
}
