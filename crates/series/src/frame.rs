//! Multi-column datasets as delivered by the adapters.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::error::SeriesError;
use crate::series::TimeSeries;

/// What to do when a requested column is absent from a dataset.
///
/// Each physical parameter carries exactly one policy; the blanket default
/// is [`MissingPolicy::Fail`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Propagate [`SeriesError::MissingColumn`].
    #[default]
    Fail,
    /// Substitute an all-`NaN` series on the dataset's index.
    SubstituteNan,
    /// Substitute an all-zero series on the dataset's index.
    SubstituteZero,
    /// Read another column instead; fails if that column is missing too.
    SubstituteColumn(String),
}

/// A dataset: one timestamp index shared by named numeric columns.
#[derive(Debug, Clone)]
pub struct Frame {
    name: String,
    timestamps: Vec<NaiveDateTime>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl Frame {
    /// Builds a frame from an index and columns of the same length.
    ///
    /// Rows are sorted by timestamp and repeated timestamps are dropped,
    /// keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] if any column length differs
    /// from the index length.
    pub fn new(
        name: impl Into<String>,
        timestamps: Vec<NaiveDateTime>,
        columns: BTreeMap<String, Vec<f64>>,
    ) -> Result<Self, SeriesError> {
        let name = name.into();
        for (column, values) in &columns {
            if values.len() != timestamps.len() {
                return Err(SeriesError::LengthMismatch {
                    field: column.clone(),
                    expected: timestamps.len(),
                    got: values.len(),
                });
            }
        }

        let mut order: Vec<usize> = (0..timestamps.len()).collect();
        order.sort_by_key(|&i| timestamps[i]);
        order.dedup_by_key(|i| timestamps[*i]);
        let dropped = timestamps.len() - order.len();
        if dropped > 0 {
            debug!(dataset = %name, dropped, "dropped duplicate timestamps");
        }

        let sorted_ts = order.iter().map(|&i| timestamps[i]).collect();
        let sorted_columns = columns
            .into_iter()
            .map(|(column, values)| {
                let v = order.iter().map(|&i| values[i]).collect();
                (column, v)
            })
            .collect();

        Ok(Self {
            name,
            timestamps: sorted_ts,
            columns: sorted_columns,
        })
    }

    /// Same rows under a different dataset identifier.
    pub fn renamed(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Dataset identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared timestamp index.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Returns `true` if the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Column names in sorted order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Returns `true` if the column exists.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Raw values of a column.
    pub fn column(&self, column: &str) -> Option<&[f64]> {
        self.columns.get(column).map(Vec::as_slice)
    }

    /// Extracts a column as a [`TimeSeries`].
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::MissingColumn`] if the column is absent.
    pub fn series(&self, column: &str) -> Result<TimeSeries, SeriesError> {
        let values = self
            .columns
            .get(column)
            .ok_or_else(|| SeriesError::MissingColumn {
                column: column.to_string(),
                dataset: self.name.clone(),
            })?;
        TimeSeries::new(column, self.timestamps.clone(), values.clone())
    }

    /// Extracts a column, applying `policy` when it is absent.
    ///
    /// Substituted series carry the requested column name.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::MissingColumn`] when the policy is
    /// [`MissingPolicy::Fail`] or the substitute column is also absent.
    pub fn series_or(
        &self,
        column: &str,
        policy: &MissingPolicy,
    ) -> Result<TimeSeries, SeriesError> {
        if self.has_column(column) {
            return self.series(column);
        }
        match policy {
            MissingPolicy::Fail => self.series(column),
            MissingPolicy::SubstituteNan => {
                warn!(dataset = %self.name, column, "column missing, substituting NaN series");
                Ok(TimeSeries::constant(column, &self.timestamps, f64::NAN))
            }
            MissingPolicy::SubstituteZero => {
                warn!(dataset = %self.name, column, "column missing, substituting zero series");
                Ok(TimeSeries::constant(column, &self.timestamps, 0.0))
            }
            MissingPolicy::SubstituteColumn(other) => {
                warn!(
                    dataset = %self.name,
                    column,
                    substitute = %other,
                    "column missing, reading substitute column"
                );
                self.series(other)
                    .map(|s| s.renamed(column))
                    .map_err(|_| SeriesError::MissingColumn {
                        column: column.to_string(),
                        dataset: self.name.clone(),
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2010, 6, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn sample() -> Frame {
        let mut columns = BTreeMap::new();
        columns.insert("LE_F_MDS".to_string(), vec![1.0, 2.0, 3.0]);
        columns.insert("TA_F".to_string(), vec![10.0, 11.0, 12.0]);
        Frame::new("fluxnet", vec![ts(0), ts(1), ts(2)], columns).unwrap()
    }

    #[test]
    fn new_rejects_ragged_columns() {
        let mut columns = BTreeMap::new();
        columns.insert("a".to_string(), vec![1.0]);
        let err = Frame::new("f", vec![ts(0), ts(1)], columns).unwrap_err();
        assert!(matches!(err, SeriesError::LengthMismatch { .. }));
    }

    #[test]
    fn new_sorts_and_drops_duplicate_rows() {
        let mut columns = BTreeMap::new();
        columns.insert("a".to_string(), vec![2.0, 1.0, 9.0]);
        columns.insert("b".to_string(), vec![20.0, 10.0, 90.0]);
        let frame = Frame::new("f", vec![ts(1), ts(0), ts(1)], columns).unwrap();
        assert_eq!(frame.timestamps(), &[ts(0), ts(1)]);
        assert_eq!(frame.column("a").unwrap(), &[1.0, 2.0]);
        assert_eq!(frame.column("b").unwrap(), &[10.0, 20.0]);
    }

    #[test]
    fn series_missing_column() {
        let err = sample().series("H_F_MDS").unwrap_err();
        assert_eq!(
            err,
            SeriesError::MissingColumn {
                column: "H_F_MDS".to_string(),
                dataset: "fluxnet".to_string(),
            }
        );
    }

    #[test]
    fn policy_substitute_nan() {
        let s = sample()
            .series_or("G_F_MDS", &MissingPolicy::SubstituteNan)
            .unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.n_missing(), 3);
        assert_eq!(s.name(), "G_F_MDS");
    }

    #[test]
    fn policy_substitute_zero() {
        let s = sample()
            .series_or("Et", &MissingPolicy::SubstituteZero)
            .unwrap();
        assert_eq!(s.values(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn policy_substitute_column() {
        let policy = MissingPolicy::SubstituteColumn("LE_F_MDS".to_string());
        let s = sample().series_or("LE_CORR", &policy).unwrap();
        assert_eq!(s.name(), "LE_CORR");
        assert_eq!(s.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn policy_substitute_column_also_missing() {
        let policy = MissingPolicy::SubstituteColumn("H_F_MDS".to_string());
        let err = sample().series_or("H_CORR", &policy).unwrap_err();
        assert!(matches!(err, SeriesError::MissingColumn { column, .. } if column == "H_CORR"));
    }

    #[test]
    fn renamed_keeps_rows() {
        let frame = sample().renamed("DE-Tha");
        assert_eq!(frame.name(), "DE-Tha");
        assert_eq!(frame.len(), 3);
    }

    #[test]
    fn policy_fail() {
        assert!(sample().series_or("X", &MissingPolicy::Fail).is_err());
    }

    #[test]
    fn present_column_ignores_policy() {
        let s = sample()
            .series_or("TA_F", &MissingPolicy::SubstituteZero)
            .unwrap();
        assert_eq!(s.values(), &[10.0, 11.0, 12.0]);
    }
}
