//! Result records and their JSON/CSV exports.

use std::path::Path;

use aeolus_metrics::MetricError;
use aeolus_series::{AlignedPair, AlignedSet};
use serde::Serialize;
use tracing::debug;

use crate::error::EvaluateError;

/// One metric value for one reference/candidate/parameter triple.
///
/// Undefined metrics carry `NaN`, which serializes to JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub metric: String,
    pub reference: String,
    pub candidate: String,
    pub parameter: String,
    pub value: f64,
}

/// Summary statistics for one parameter and dataset pair, over complete rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub parameter: String,
    pub reference: String,
    pub candidate: String,
    pub n: usize,
    pub obs_mean: f64,
    pub obs_max: f64,
    pub obs_min: f64,
    pub obs_std: f64,
    pub model_mean: f64,
    pub model_max: f64,
    pub model_min: f64,
    pub model_std: f64,
    pub mae: f64,
    pub rmse: f64,
    pub correlation: f64,
    pub kge: f64,
    pub rmsd: f64,
}

impl SummaryRow {
    /// Computes the row from an aligned pair.
    pub fn from_pair(parameter: &str, pair: &AlignedPair) -> Self {
        let complete = pair.complete();
        let obs = complete.reference();
        let model = complete.candidate();
        Self {
            parameter: parameter.to_string(),
            reference: pair.reference_name().to_string(),
            candidate: pair.candidate_name().to_string(),
            n: complete.len(),
            obs_mean: aeolus_stats::nan_mean(obs),
            obs_max: aeolus_stats::nan_max(obs),
            obs_min: aeolus_stats::nan_min(obs),
            obs_std: aeolus_stats::nan_sd(obs),
            model_mean: aeolus_stats::nan_mean(model),
            model_max: aeolus_stats::nan_max(model),
            model_min: aeolus_stats::nan_min(model),
            model_std: aeolus_stats::nan_sd(model),
            mae: aeolus_metrics::mae(pair),
            rmse: aeolus_metrics::rmse(pair),
            correlation: or_nan("correlation", aeolus_metrics::correlation(pair)),
            kge: or_nan("kge", aeolus_metrics::kge(pair)),
            rmsd: or_nan("rmsd", aeolus_metrics::rmsd_pair(pair)),
        }
    }

    /// Metric values of the row as result records.
    pub fn results(&self) -> Vec<ComparisonResult> {
        [
            ("bias", self.model_mean - self.obs_mean),
            ("mae", self.mae),
            ("rmse", self.rmse),
            ("correlation", self.correlation),
            ("kge", self.kge),
            ("rmsd", self.rmsd),
        ]
        .into_iter()
        .map(|(metric, value)| ComparisonResult {
            metric: metric.to_string(),
            reference: self.reference.clone(),
            candidate: self.candidate.clone(),
            parameter: self.parameter.clone(),
            value,
        })
        .collect()
    }
}

fn or_nan(metric: &str, value: Result<f64, MetricError>) -> f64 {
    value.unwrap_or_else(|e| {
        debug!(metric, error = %e, "metric undefined");
        f64::NAN
    })
}

/// A parameter whose comparison could not be completed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterFailure {
    pub parameter: String,
    /// `None` when the reference itself failed.
    pub candidate: Option<String>,
    pub reason: String,
}

/// Everything computed for one parameter.
#[derive(Debug, Clone)]
pub struct ParameterComparison {
    pub parameter: String,
    /// Reference and every successful candidate on shared timestamps.
    pub aligned: AlignedSet,
    pub summary: Vec<SummaryRow>,
}

/// Output of a batch comparison.
#[derive(Debug, Clone, Default)]
pub struct ComparisonReport {
    pub comparisons: Vec<ParameterComparison>,
    pub failures: Vec<ParameterFailure>,
}

impl ComparisonReport {
    /// Every summary row, parameter by parameter.
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        self.comparisons
            .iter()
            .flat_map(|c| c.summary.iter().cloned())
            .collect()
    }

    /// Every metric value as a flat result list.
    pub fn results(&self) -> Vec<ComparisonResult> {
        self.comparisons
            .iter()
            .flat_map(|c| c.summary.iter().flat_map(SummaryRow::results))
            .collect()
    }
}

/// Serialize result records to a pretty JSON string.
pub fn to_json(results: &[ComparisonResult]) -> Result<String, EvaluateError> {
    serde_json::to_string_pretty(results).map_err(|e| EvaluateError::Serialization {
        reason: e.to_string(),
    })
}

/// Write summary rows as CSV, one row per parameter and dataset pair.
///
/// # Errors
///
/// Returns [`EvaluateError::Export`] if the file cannot be written.
pub fn write_summary_csv(path: &Path, rows: &[SummaryRow]) -> Result<(), EvaluateError> {
    let export = |reason: String| EvaluateError::Export {
        path: path.to_path_buf(),
        reason,
    };
    let mut writer = csv::Writer::from_path(path).map_err(|e| export(e.to_string()))?;
    for row in rows {
        writer.serialize(row).map_err(|e| export(e.to_string()))?;
    }
    writer.flush().map_err(|e| export(e.to_string()))?;
    Ok(())
}
