//! Centred root-mean-square difference, as drawn on a Taylor diagram.

use aeolus_series::{AlignedPair, FieldSet};
use tracing::warn;

use crate::error::MetricError;
use crate::kge::check_lengths;
use crate::pointwise::Moments;

/// Centred RMSD from standard deviations and correlation:
/// `sqrt(sd_ref^2 + sd_cand^2 - 2 * sd_ref * sd_cand * r)`.
///
/// Rounding can push the radicand slightly below zero for near-perfect
/// matches; the result is then `-sqrt(|radicand|)` so the sign flags the
/// case to the caller.
pub fn rmsd(sd_ref: f64, sd_cand: f64, r: f64) -> f64 {
    let radicand = sd_ref * sd_ref + sd_cand * sd_cand - 2.0 * sd_ref * sd_cand * r;
    if radicand < 0.0 {
        warn!(radicand, "negative RMSD radicand, returning negative sentinel");
        return -radicand.abs().sqrt();
    }
    radicand.sqrt()
}

/// Centred RMSD of the complete rows of `pair`.
///
/// # Errors
///
/// Returns [`MetricError::Undefined`] if the correlation cannot be computed.
pub fn rmsd_pair(pair: &AlignedPair) -> Result<f64, MetricError> {
    let complete = pair.complete();
    let r = aeolus_stats::pearson_correlation(complete.reference(), complete.candidate())
        .ok_or(MetricError::Undefined {
            rows: complete.len(),
        })?;
    let reference = Moments::of(complete.reference());
    let candidate = Moments::of(complete.candidate());
    Ok(rmsd(reference.sd, candidate.sd, r))
}

/// Centred RMSD per grid point, using the candidate's stored correlation.
///
/// # Errors
///
/// Returns [`MetricError::LengthMismatch`] if the fields differ in size.
pub fn field_rmsd(reference: &FieldSet, candidate: &FieldSet) -> Result<Vec<f64>, MetricError> {
    check_lengths(reference, candidate)?;
    Ok(reference
        .iter()
        .zip(candidate.iter())
        .map(|(o, m)| rmsd(o.sd, m.sd, m.correlation))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeolus_series::FieldSample;
    use approx::assert_relative_eq;

    #[test]
    fn identical_series_is_exactly_zero() {
        let obs = [0.3, 1.9, 2.4, 7.7, 5.1];
        let pair = AlignedPair::from_values(&obs, &obs).unwrap();
        assert_eq!(rmsd_pair(&pair).unwrap(), 0.0);
    }

    #[test]
    fn uncorrelated_is_pythagorean() {
        assert_relative_eq!(rmsd(3.0, 4.0, 0.0), 5.0);
    }

    #[test]
    fn negative_radicand_sentinel() {
        // 1 + 1 - 2 * 1.01 = -0.02
        let value = rmsd(1.0, 1.0, 1.01);
        assert!(value < 0.0);
        assert_relative_eq!(value, -(0.02f64.sqrt()), epsilon = 1e-12);
    }

    #[test]
    fn field_rmsd_per_point() {
        let point = |sd, correlation| FieldSample {
            lon: 0.0,
            lat: 0.0,
            mean: 1.0,
            sd,
            correlation,
        };
        let reference = FieldSet::new(vec![point(3.0, 1.0), point(1.0, 1.0)]);
        let candidate = FieldSet::new(vec![point(4.0, 0.0), point(1.0, 1.0)]);
        let values = field_rmsd(&reference, &candidate).unwrap();
        assert_relative_eq!(values[0], 5.0);
        assert_eq!(values[1], 0.0);
    }
}
