//! Kling-Gupta efficiency for series and for gridded fields.

use aeolus_series::{AlignedPair, FieldSet};
use tracing::debug;

use crate::error::MetricError;
use crate::pointwise::Moments;

/// Field KGE values below this are treated as artefacts and repaired.
pub const KGE_REPAIR_THRESHOLD: f64 = -1.5;

/// KGE of the complete rows of `pair`.
///
/// `1 - sqrt((r - 1)^2 + (sd_m / sd_o - 1)^2 + (mean_m / mean_o - 1)^2)`,
/// with `o` the reference and `m` the candidate. A perfect match is 1.
///
/// # Errors
///
/// Returns [`MetricError::DivisionByZero`] if the reference mean or
/// standard deviation is 0, or [`MetricError::Undefined`] if the
/// correlation cannot be computed.
pub fn kge(pair: &AlignedPair) -> Result<f64, MetricError> {
    let complete = pair.complete();
    let reference = Moments::of(complete.reference());
    let candidate = Moments::of(complete.candidate());
    check_denominators(&reference)?;
    let r = aeolus_stats::pearson_correlation(complete.reference(), complete.candidate())
        .ok_or(MetricError::Undefined {
            rows: complete.len(),
        })?;
    kge_from_moments(r, &reference, &candidate)
}

/// KGE from a correlation and the moments of both sides.
///
/// # Errors
///
/// Returns [`MetricError::DivisionByZero`] if the reference mean or
/// standard deviation is 0, or [`MetricError::Undefined`] if `r` is `NaN`.
pub fn kge_from_moments(
    r: f64,
    reference: &Moments,
    candidate: &Moments,
) -> Result<f64, MetricError> {
    check_denominators(reference)?;
    if r.is_nan() {
        return Err(MetricError::Undefined { rows: 0 });
    }
    let alpha = candidate.sd / reference.sd;
    let beta = candidate.mean / reference.mean;
    let distance = ((r - 1.0).powi(2) + (alpha - 1.0).powi(2) + (beta - 1.0).powi(2)).sqrt();
    Ok(1.0 - distance)
}

fn check_denominators(reference: &Moments) -> Result<(), MetricError> {
    if reference.sd == 0.0 {
        return Err(MetricError::DivisionByZero {
            denominator: "reference standard deviation".to_string(),
        });
    }
    if reference.mean == 0.0 {
        return Err(MetricError::DivisionByZero {
            denominator: "reference mean".to_string(),
        });
    }
    Ok(())
}

/// KGE per grid point.
///
/// The correlation of each point is taken from the candidate sample, which
/// carries the reference/candidate correlation at that point.
///
/// # Errors
///
/// Returns [`MetricError::LengthMismatch`] if the fields differ in size.
/// Per-point failures are reported in the returned vector.
pub fn field_kge(
    reference: &FieldSet,
    candidate: &FieldSet,
) -> Result<Vec<Result<f64, MetricError>>, MetricError> {
    check_lengths(reference, candidate)?;
    Ok(reference
        .iter()
        .zip(candidate.iter())
        .map(|(o, m)| {
            kge_from_moments(
                m.correlation,
                &Moments {
                    mean: o.mean,
                    sd: o.sd,
                },
                &Moments {
                    mean: m.mean,
                    sd: m.sd,
                },
            )
        })
        .collect())
}

pub(crate) fn check_lengths(reference: &FieldSet, candidate: &FieldSet) -> Result<(), MetricError> {
    if reference.len() != candidate.len() {
        return Err(MetricError::LengthMismatch {
            reference: reference.len(),
            candidate: candidate.len(),
        });
    }
    Ok(())
}

/// Smooths field KGE outliers.
///
/// Walking the values in order, every value below
/// [`KGE_REPAIR_THRESHOLD`] is replaced by the mean of its predecessor and
/// successor. The predecessor of the first value is the last one; the last
/// value has no successor and takes its predecessor's value. Replacements
/// are visible to later points. `NaN` is left alone.
pub fn repair_field_kge(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    let n = out.len();
    for i in 0..n {
        if out[i] >= KGE_REPAIR_THRESHOLD || out[i].is_nan() {
            continue;
        }
        let prev = out[(i + n - 1) % n];
        let next = if i + 1 == n { prev } else { out[i + 1] };
        debug!(index = i, value = out[i], "repairing field KGE outlier");
        out[i] = (prev + next) / 2.0;
    }
    out
}
