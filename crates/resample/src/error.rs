//! Error types for the aeolus-resample crate.

/// Error type for all fallible operations in the aeolus-resample crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResampleError {
    /// Returned when a parameter table would hold two specs for one name.
    #[error("duplicate parameter spec: '{name}'")]
    DuplicateParameter {
        /// The repeated parameter name.
        name: String,
    },

    /// Returned when a spec carries a non-finite scale, offset or clamp.
    #[error("invalid parameter spec for '{name}': {reason}")]
    InvalidSpec {
        /// Parameter name.
        name: String,
        /// Description of the problem.
        reason: String,
    },

    /// Series error.
    #[error(transparent)]
    Series(#[from] aeolus_series::SeriesError),
}
