//! Pointwise error scores and correlation on aligned pairs.

use aeolus_series::AlignedPair;

use crate::error::MetricError;

/// Mean and sample standard deviation of one side of a comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (N-1).
    pub sd: f64,
}

impl Moments {
    /// Moments of clean values. Empty input gives a mean of 0 and an sd of 0.
    pub fn of(values: &[f64]) -> Self {
        Self {
            mean: aeolus_stats::mean(values),
            sd: aeolus_stats::sd(values),
        }
    }
}

/// Pearson correlation over the complete rows of `pair`.
///
/// # Errors
///
/// Returns [`MetricError::Undefined`] when fewer than three complete rows
/// remain or either side is constant.
pub fn correlation(pair: &AlignedPair) -> Result<f64, MetricError> {
    let complete = pair.complete();
    aeolus_stats::pearson_correlation(complete.reference(), complete.candidate())
        .ok_or(MetricError::Undefined {
            rows: complete.len(),
        })
}

/// Root-mean-square error over the complete rows. `NaN` if none remain.
pub fn rmse(pair: &AlignedPair) -> f64 {
    mean_of(pair, |d| d * d).sqrt()
}

/// Mean absolute error over the complete rows. `NaN` if none remain.
pub fn mae(pair: &AlignedPair) -> f64 {
    mean_of(pair, f64::abs)
}

/// Mean of `candidate - reference` over the complete rows. `NaN` if none remain.
pub fn bias(pair: &AlignedPair) -> f64 {
    mean_of(pair, |d| d)
}

fn mean_of(pair: &AlignedPair, f: impl Fn(f64) -> f64) -> f64 {
    let complete = pair.complete();
    if complete.is_empty() {
        return f64::NAN;
    }
    let total: f64 = complete
        .reference()
        .iter()
        .zip(complete.candidate())
        .map(|(o, m)| f(m - o))
        .sum();
    total / complete.len() as f64
}
