//! Aeolus evaluation: compare candidate datasets against a reference.
//!
//! The driver resamples every configured parameter of the reference and of
//! each candidate, aligns them on shared timestamps and computes one
//! [`SummaryRow`] per parameter and dataset pair. Failures are isolated per
//! parameter and per candidate so one bad column never aborts a batch.
//!
//! ```mermaid
//! flowchart LR
//!     F[Frames] --> R[resample_parameter]
//!     R --> A[align / AlignedPair]
//!     A --> S[SummaryRow]
//!     S --> J[results.json]
//!     S --> C[summary.csv]
//!     R -. error .-> X[ParameterFailure]
//! ```

mod compare;
mod config;
mod error;
mod output;

pub use compare::compare;
pub use config::EvaluateConfig;
pub use error::EvaluateError;
pub use output::{
    ComparisonReport, ComparisonResult, ParameterComparison, ParameterFailure, SummaryRow,
    to_json, write_summary_csv,
};
