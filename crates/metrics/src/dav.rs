//! Distribution added value (DAV) of a high-resolution over a
//! low-resolution simulation, measured on fixed histograms.

use crate::error::MetricError;

/// Bin edges, right-closed: bin `i` holds `edges[i] < v <= edges[i + 1]`.
pub const DAV_EDGES: [f64; 11] = [
    f64::NEG_INFINITY,
    -10.0,
    -5.0,
    0.0,
    5.0,
    10.0,
    15.0,
    20.0,
    25.0,
    30.0,
    f64::INFINITY,
];

/// Number of histogram bins.
pub const DAV_BINS: usize = DAV_EDGES.len() - 1;

/// Counts of values per DAV bin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; DAV_BINS],
}

impl Histogram {
    /// Bins `values`; non-finite values are ignored.
    pub fn from_values(values: &[f64]) -> Self {
        let mut counts = [0u64; DAV_BINS];
        for &v in values.iter().filter(|v| v.is_finite()) {
            // First upper edge >= v; -inf < v always holds for finite v.
            let bin = DAV_EDGES[1..].partition_point(|&upper| upper < v);
            counts[bin] += 1;
        }
        Self { counts }
    }

    /// Raw counts per bin.
    pub fn counts(&self) -> &[u64; DAV_BINS] {
        &self.counts
    }

    /// Number of binned values.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Relative frequency per bin. All zero for an empty histogram.
    pub fn frequencies(&self) -> [f64; DAV_BINS] {
        let total = self.total();
        let mut out = [0.0; DAV_BINS];
        if total == 0 {
            return out;
        }
        for (f, &c) in out.iter_mut().zip(&self.counts) {
            *f = c as f64 / total as f64;
        }
        out
    }

    /// Histogram overlap skill score against `observed`:
    /// `sum(min(self_bin, observed_bin))` on relative frequencies.
    pub fn skill_score(&self, observed: &Histogram) -> f64 {
        self.frequencies()
            .iter()
            .zip(observed.frequencies())
            .map(|(&a, b)| a.min(b))
            .sum()
    }
}

/// DAV of `high_res` over `low_res` relative to `observed`:
/// `(S_hr - S_lr) / S_lr`, where `S` is the histogram skill score.
///
/// Positive values mean the high-resolution run reproduces the observed
/// distribution better.
///
/// # Errors
///
/// Returns [`MetricError::UndefinedMetric`] when `S_lr` is 0.
pub fn dav(low_res: &[f64], high_res: &[f64], observed: &[f64]) -> Result<f64, MetricError> {
    let observed = Histogram::from_values(observed);
    let s_lr = Histogram::from_values(low_res).skill_score(&observed);
    let s_hr = Histogram::from_values(high_res).skill_score(&observed);
    if s_lr == 0.0 {
        return Err(MetricError::UndefinedMetric {
            metric: "DAV".to_string(),
            reason: "low-resolution skill score is 0".to_string(),
        });
    }
    Ok((s_hr - s_lr) / s_lr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn right_closed_bins() {
        let h = Histogram::from_values(&[-10.0, -9.99, 0.0, 30.0, 30.01]);
        assert_eq!(h.counts()[0], 1);
        assert_eq!(h.counts()[1], 1);
        assert_eq!(h.counts()[2], 1);
        assert_eq!(h.counts()[8], 1);
        assert_eq!(h.counts()[9], 1);
    }

    #[test]
    fn non_finite_ignored() {
        let h = Histogram::from_values(&[f64::NAN, f64::INFINITY, 1.0]);
        assert_eq!(h.total(), 1);
    }

    #[test]
    fn frequencies_sum_to_one() {
        let h = Histogram::from_values(&[1.0, 2.0, 12.0, 40.0]);
        assert_relative_eq!(h.frequencies().iter().sum::<f64>(), 1.0);
        assert_relative_eq!(h.frequencies()[4], 0.5);
    }

    #[test]
    fn empty_histogram_frequencies() {
        assert_eq!(Histogram::from_values(&[]).frequencies(), [0.0; DAV_BINS]);
    }

    #[test]
    fn dav_improvement() {
        let observed = [1.0, 1.0, 12.0, 12.0];
        let low = [1.0, 1.0, 1.0, 1.0];
        let high = [1.0, 1.0, 12.0, 1.0];
        // S_lr = 0.5, S_hr = 0.75
        assert_relative_eq!(dav(&low, &high, &observed).unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn dav_undefined_without_overlap() {
        let err = dav(&[50.0], &[1.0], &[1.0]).unwrap_err();
        assert!(matches!(err, MetricError::UndefinedMetric { .. }));
    }
}
