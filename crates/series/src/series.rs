//! Single named time series.

use aeolus_calendar::Period;
use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::SeriesError;

/// An ordered sequence of `(timestamp, value)` pairs.
///
/// Timestamps are strictly increasing and unique. Missing values are `NaN`.
/// A series is read-only once built; every transform returns a new series.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    name: String,
    timestamps: Vec<NaiveDateTime>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Builds a series from parallel timestamp and value vectors.
    ///
    /// Rows are sorted by timestamp (stable) and repeated timestamps are
    /// dropped, keeping the first occurrence in input order.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] if the vectors differ in length.
    pub fn new(
        name: impl Into<String>,
        timestamps: Vec<NaiveDateTime>,
        values: Vec<f64>,
    ) -> Result<Self, SeriesError> {
        let name = name.into();
        if timestamps.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                field: name,
                expected: timestamps.len(),
                got: values.len(),
            });
        }
        Ok(Self::from_pairs(name, timestamps.into_iter().zip(values)))
    }

    /// Builds a series from `(timestamp, value)` pairs.
    ///
    /// Same ordering and de-duplication rules as [`TimeSeries::new`].
    pub fn from_pairs(
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (NaiveDateTime, f64)>,
    ) -> Self {
        let name = name.into();
        let mut rows: Vec<(NaiveDateTime, f64)> = pairs.into_iter().collect();
        let already_sorted = rows.windows(2).all(|w| w[0].0 < w[1].0);
        if !already_sorted {
            rows.sort_by_key(|(t, _)| *t);
            let before = rows.len();
            rows.dedup_by_key(|(t, _)| *t);
            let dropped = before - rows.len();
            if dropped > 0 {
                debug!(series = %name, dropped, "dropped duplicate timestamps");
            }
        }
        let (timestamps, values) = rows.into_iter().unzip();
        Self {
            name,
            timestamps,
            values,
        }
    }

    /// An empty series.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timestamps: Vec::new(),
            values: Vec::new(),
        }
    }

    /// A series with every value set to `value` on the given index.
    pub fn constant(name: impl Into<String>, timestamps: &[NaiveDateTime], value: f64) -> Self {
        Self::from_pairs(name, timestamps.iter().map(|&t| (t, value)))
    }

    /// Returns the series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the timestamps.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Returns the values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of `NaN` values.
    pub fn n_missing(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }

    /// First timestamp, if any.
    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamps.first().copied()
    }

    /// Last timestamp, if any.
    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamps.last().copied()
    }

    /// Iterates over `(timestamp, value)` rows.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Value at exactly `ts`, if the timestamp is present.
    pub fn value_at(&self, ts: NaiveDateTime) -> Option<f64> {
        self.timestamps
            .binary_search(&ts)
            .ok()
            .map(|i| self.values[i])
    }

    /// Rows whose date lies inside `period`. Empty if nothing overlaps.
    pub fn slice(&self, period: &Period) -> Self {
        let lo = self
            .timestamps
            .partition_point(|t| t.date() < period.start());
        let hi = self
            .timestamps
            .partition_point(|t| t.date() <= period.end());
        let hi = hi.max(lo);
        Self {
            name: self.name.clone(),
            timestamps: self.timestamps[lo..hi].to_vec(),
            values: self.values[lo..hi].to_vec(),
        }
    }

    /// New series with `f` applied to every value.
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            name: self.name.clone(),
            timestamps: self.timestamps.clone(),
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Same rows under a different name.
    pub fn renamed(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }
}
