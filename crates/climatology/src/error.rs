//! Error types for the aeolus-climatology crate.

use aeolus_resample::ResampleError;

/// Error type for all fallible operations in the aeolus-climatology crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClimatologyError {
    /// Returned when a pooled climatology is requested over zero datasets.
    #[error("no datasets given for climatology of '{parameter}'")]
    NoDatasets {
        /// Requested parameter.
        parameter: String,
    },

    /// Returned when a synthetic index year cannot hold the cycle.
    #[error("year {year} cannot index a {cycle} cycle")]
    InvalidIndexYear {
        /// Requested year.
        year: i32,
        /// Cycle name.
        cycle: String,
    },

    /// Resampling error other than a missing column.
    #[error(transparent)]
    Resample(#[from] ResampleError),
}
