//! Comparison metrics between a reference (observation) and a candidate
//! (model) dataset.
//!
//! Series metrics take an [`AlignedPair`](aeolus_series::AlignedPair) and
//! drop incomplete rows first. Field metrics take two
//! [`FieldSet`](aeolus_series::FieldSet)s of per-grid-point moments.
//!
//! ```mermaid
//! flowchart LR
//!     P[AlignedPair] --> C[complete rows]
//!     C --> K[kge]
//!     C --> R[rmsd_pair]
//!     C --> E[rmse / mae / bias / correlation]
//!     F[FieldSet x2] --> FK[field_kge] --> FR[repair_field_kge]
//!     F --> FD[field_rmsd]
//!     V[low / high / observed values] --> H[Histogram] --> D[dav]
//! ```
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `kge` | Kling-Gupta efficiency, field KGE and its outlier repair |
//! | `rmsd` | Centred RMSD with the negative-radicand sentinel |
//! | `pointwise` | RMSE, MAE, bias, Pearson correlation, [`Moments`] |
//! | `dav` | Fixed-edge [`Histogram`] and distribution added value |
//! | `error` | [`MetricError`] |

mod dav;
mod error;
mod kge;
mod pointwise;
mod rmsd;

pub use dav::{DAV_BINS, DAV_EDGES, Histogram, dav};
pub use error::MetricError;
pub use kge::{KGE_REPAIR_THRESHOLD, field_kge, kge, kge_from_moments, repair_field_kge};
pub use pointwise::{Moments, bias, correlation, mae, rmse};
pub use rmsd::{field_rmsd, rmsd, rmsd_pair};
