//! Error types for aeolus-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the aeolus-io crate.
///
/// Covers missing files, malformed delimited text, unparsable timestamps,
/// unknown format profiles and failures while writing tables.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error from the CSV reader or writer.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        /// File being read or written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps a filesystem error other than a missing file.
    #[error("i/o error on {}: {reason}", path.display())]
    Filesystem {
        /// File or directory involved.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a required column is not present in a file header.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a timestamp cell cannot be parsed with the profile's format.
    #[error("invalid timestamp '{text}' on line {line} of {}", path.display())]
    InvalidTime {
        /// Offending cell text.
        text: String,
        /// 1-based line number in the file.
        line: u64,
        /// File being read.
        path: PathBuf,
    },

    /// Returned when a format profile name is not one of the built-ins.
    #[error("unknown format profile '{name}'")]
    UnknownFormat {
        /// Requested profile name.
        name: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Wraps an error from the aeolus-series crate.
    #[error("series error: {reason}")]
    Series {
        /// Description of the underlying failure.
        reason: String,
    },
}

impl From<aeolus_series::SeriesError> for IoError {
    fn from(e: aeolus_series::SeriesError) -> Self {
        IoError::Series {
            reason: e.to_string(),
        }
    }
}

impl IoError {
    pub(crate) fn csv(path: &std::path::Path, e: csv::Error) -> Self {
        IoError::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }

    pub(crate) fn filesystem(path: &std::path::Path, e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            return IoError::FileNotFound {
                path: path.to_path_buf(),
            };
        }
        IoError::Filesystem {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}
