//! # aeolus-io
//!
//! Read heterogeneous delimited-text climate datasets into
//! [`Frame`](aeolus_series::Frame)s and write the keyed CSV tables the
//! plotting layer consumes.
//!
//! Each dataset family is described by a [`FormatProfile`]: delimiter,
//! timestamp columns and format, header preamble, column renames and
//! missing-value sentinels. Built-in profiles cover regional-model output,
//! flux-tower networks, gridded products and station exports.

mod error;
mod profile;
mod reader;
mod writer;

pub use error::IoError;
pub use profile::{BUILTIN_FORMATS, Delimiter, FormatProfile};
pub use reader::{read_field_samples, read_frame};
pub use writer::{TIMESTAMP_FORMAT, write_aligned_csv, write_climatology_csv, write_field_csv};
