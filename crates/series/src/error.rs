//! Error types for the aeolus-series crate.

/// Error type for all fallible operations in the aeolus-series crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when parallel arrays have different lengths.
    #[error("{field}: expected {expected} elements, got {got}")]
    LengthMismatch {
        /// Name of the mismatched field.
        field: String,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when a requested column is absent from a dataset and its
    /// missing-column policy does not allow a substitute.
    #[error("column '{column}' not found in dataset '{dataset}'")]
    MissingColumn {
        /// Name of the requested column.
        column: String,
        /// Identifier of the dataset that was searched.
        dataset: String,
    },

    /// Returned when alignment is requested for fewer than two series.
    #[error("alignment needs at least 2 series, got {got}")]
    TooFewSeries {
        /// Number of series supplied.
        got: usize,
    },
}
