//! Alignment of series onto their common timestamps.

use chrono::NaiveDateTime;

use crate::error::SeriesError;
use crate::series::TimeSeries;

/// Two or more series restricted to the intersection of their indices.
///
/// All members share identical timestamps. Rows may still contain `NaN`;
/// use [`AlignedSet::complete_rows`] before computing summary statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSet {
    timestamps: Vec<NaiveDateTime>,
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

/// Aligns `series` onto the timestamps present in every one of them.
///
/// # Errors
///
/// Returns [`SeriesError::TooFewSeries`] if fewer than two series are given.
pub fn align(series: &[&TimeSeries]) -> Result<AlignedSet, SeriesError> {
    if series.len() < 2 {
        return Err(SeriesError::TooFewSeries { got: series.len() });
    }

    // Walk the shortest index and look each timestamp up in the others.
    let pivot = series
        .iter()
        .min_by_key(|s| s.len())
        .expect("at least two series");

    let mut timestamps = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); series.len()];
    for &ts in pivot.timestamps() {
        let row: Option<Vec<f64>> = series.iter().map(|s| s.value_at(ts)).collect();
        if let Some(row) = row {
            timestamps.push(ts);
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }
    }

    Ok(AlignedSet {
        timestamps,
        names: series.iter().map(|s| s.name().to_string()).collect(),
        columns,
    })
}

impl AlignedSet {
    /// Shared timestamps.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Member names, in input order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Returns `true` if the intersection is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Number of member series.
    pub fn n_series(&self) -> usize {
        self.columns.len()
    }

    /// Values of the `i`-th member.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.n_series()`.
    pub fn column(&self, i: usize) -> &[f64] {
        &self.columns[i]
    }

    /// Values of the member called `name`.
    pub fn column_by_name(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }

    /// Drops every row in which any member is `NaN`.
    pub fn complete_rows(&self) -> Self {
        let keep: Vec<usize> = (0..self.len())
            .filter(|&row| self.columns.iter().all(|c| !c[row].is_nan()))
            .collect();
        Self {
            timestamps: keep.iter().map(|&r| self.timestamps[r]).collect(),
            names: self.names.clone(),
            columns: self
                .columns
                .iter()
                .map(|c| keep.iter().map(|&r| c[r]).collect())
                .collect(),
        }
    }
}

/// A reference/candidate pair on shared timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    set: AlignedSet,
}

impl AlignedPair {
    /// Aligns `reference` and `candidate` onto their common timestamps.
    pub fn new(reference: &TimeSeries, candidate: &TimeSeries) -> Self {
        let set = align(&[reference, candidate]).expect("two series are always enough");
        Self { set }
    }

    /// Builds a pair directly from already aligned values.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] if the slices differ in length.
    pub fn from_values(reference: &[f64], candidate: &[f64]) -> Result<Self, SeriesError> {
        if reference.len() != candidate.len() {
            return Err(SeriesError::LengthMismatch {
                field: "candidate".to_string(),
                expected: reference.len(),
                got: candidate.len(),
            });
        }
        let epoch = NaiveDateTime::default();
        let timestamps = (0..reference.len())
            .map(|i| epoch + chrono::TimeDelta::hours(i as i64))
            .collect();
        Ok(Self {
            set: AlignedSet {
                timestamps,
                names: vec!["reference".to_string(), "candidate".to_string()],
                columns: vec![reference.to_vec(), candidate.to_vec()],
            },
        })
    }

    /// The pair with incomplete rows removed.
    pub fn complete(&self) -> Self {
        Self {
            set: self.set.complete_rows(),
        }
    }

    /// Shared timestamps.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        self.set.timestamps()
    }

    /// Reference (observation) values.
    pub fn reference(&self) -> &[f64] {
        self.set.column(0)
    }

    /// Candidate (model) values.
    pub fn candidate(&self) -> &[f64] {
        self.set.column(1)
    }

    /// Reference series name.
    pub fn reference_name(&self) -> &str {
        &self.set.names()[0]
    }

    /// Candidate series name.
    pub fn candidate_name(&self) -> &str {
        &self.set.names()[1]
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Returns `true` if the pair has no rows.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
