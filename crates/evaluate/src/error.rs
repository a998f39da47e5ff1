//! Evaluation error types.

use std::path::PathBuf;

/// Errors that can occur during evaluation.
#[derive(Debug, thiserror::Error)]
pub enum EvaluateError {
    /// One or more validation checks failed.
    #[error("{count} validation error(s): {details}")]
    Validation { count: usize, details: String },

    /// A dataset named in the configuration was not loaded.
    #[error("{role} dataset '{name}' not found")]
    MissingDataset { name: String, role: String },

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// Writing an export file failed.
    #[error("export to {} failed: {reason}", path.display())]
    Export { path: PathBuf, reason: String },
}
