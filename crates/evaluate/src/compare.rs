//! Batch comparison driver.

use std::collections::BTreeMap;

use aeolus_resample::{ParameterTable, grid_anchor, resample_parameter_from};
use aeolus_series::{AlignedPair, Frame, TimeSeries, align};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::EvaluateConfig;
use crate::error::EvaluateError;
use crate::output::{ComparisonReport, ParameterComparison, ParameterFailure, SummaryRow};

/// Compare the reference dataset against every candidate, parameter by
/// parameter.
///
/// Each dataset's source column for the parameter (see
/// [`EvaluateConfig::source_column`]) is resampled with the rules `table`
/// holds for that column, onto the configured bucket and period, then
/// aligned with the reference. Every dataset shares one bucket grid,
/// anchored at the period start or at the earliest first sample.
///
/// A failure for one parameter (or one candidate of a parameter) is logged,
/// recorded in [`ComparisonReport::failures`] and does not stop the batch.
///
/// # Errors
///
/// Returns [`EvaluateError::Validation`] if the configuration is invalid, or
/// [`EvaluateError::MissingDataset`] if a configured dataset is not in
/// `datasets`.
pub fn compare(
    datasets: &BTreeMap<String, Frame>,
    config: &EvaluateConfig,
    table: &ParameterTable,
) -> Result<ComparisonReport, EvaluateError> {
    config.validate()?;
    let reference = lookup(datasets, config.reference(), "reference")?;
    let candidates = config
        .candidates()
        .iter()
        .map(|name| lookup(datasets, name, "candidate").map(|f| (name.as_str(), f)))
        .collect::<Result<Vec<_>, _>>()?;

    let anchor = grid_anchor(
        config.period(),
        std::iter::once(reference).chain(candidates.iter().map(|&(_, f)| f)),
    );
    let grid = Grid {
        config,
        table,
        anchor,
    };

    let mut report = ComparisonReport::default();
    for parameter in config.parameters() {
        let _span = tracing::info_span!("parameter", name = %parameter).entered();
        match compare_parameter(
            parameter,
            (config.reference(), reference),
            &candidates,
            &grid,
            &mut report.failures,
        ) {
            Ok(comparison) => report.comparisons.push(comparison),
            Err(failure) => {
                warn!(parameter = %parameter, reason = %failure.reason, "parameter skipped");
                report.failures.push(failure);
            }
        }
    }

    info!(
        compared = report.comparisons.len(),
        failed = report.failures.len(),
        "comparison finished"
    );
    Ok(report)
}

fn lookup<'a>(
    datasets: &'a BTreeMap<String, Frame>,
    name: &str,
    role: &str,
) -> Result<&'a Frame, EvaluateError> {
    datasets
        .get(name)
        .ok_or_else(|| EvaluateError::MissingDataset {
            name: name.to_string(),
            role: role.to_string(),
        })
}

/// Shared resampling settings for one batch.
struct Grid<'a> {
    config: &'a EvaluateConfig,
    table: &'a ParameterTable,
    anchor: Option<NaiveDate>,
}

impl Grid<'_> {
    fn load(&self, frame: &Frame, dataset: &str, parameter: &str) -> Result<TimeSeries, String> {
        let column = self.config.source_column(dataset, parameter);
        if column != parameter {
            debug!(dataset, parameter, column, "reading mapped source column");
        }
        resample_parameter_from(
            frame,
            column,
            self.config.period(),
            self.config.bucket(),
            self.table,
            self.anchor,
        )
        .map(|s| s.renamed(dataset))
        .map_err(|e| e.to_string())
    }
}

fn compare_parameter(
    parameter: &str,
    (reference_name, reference): (&str, &Frame),
    candidates: &[(&str, &Frame)],
    grid: &Grid<'_>,
    failures: &mut Vec<ParameterFailure>,
) -> Result<ParameterComparison, ParameterFailure> {
    let reference = grid
        .load(reference, reference_name, parameter)
        .map_err(|reason| ParameterFailure {
            parameter: parameter.to_string(),
            candidate: None,
            reason,
        })?;

    let mut loaded = Vec::with_capacity(candidates.len());
    for &(name, frame) in candidates {
        match grid.load(frame, name, parameter) {
            Ok(series) => loaded.push(series),
            Err(reason) => {
                warn!(parameter, candidate = name, %reason, "candidate skipped");
                failures.push(ParameterFailure {
                    parameter: parameter.to_string(),
                    candidate: Some(name.to_string()),
                    reason,
                });
            }
        }
    }
    if loaded.is_empty() {
        return Err(ParameterFailure {
            parameter: parameter.to_string(),
            candidate: None,
            reason: "no candidate provides this parameter".to_string(),
        });
    }

    let summary: Vec<SummaryRow> = loaded
        .iter()
        .map(|candidate| {
            let pair = AlignedPair::new(&reference, candidate);
            debug!(candidate = candidate.name(), rows = pair.len(), "aligned pair");
            SummaryRow::from_pair(parameter, &pair)
        })
        .collect();

    let mut members = vec![&reference];
    members.extend(loaded.iter());
    let aligned = align(&members).map_err(|e| ParameterFailure {
        parameter: parameter.to_string(),
        candidate: None,
        reason: e.to_string(),
    })?;

    Ok(ParameterComparison {
        parameter: parameter.to_string(),
        aligned,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeolus_calendar::{Bucket, Period};
    use approx::assert_relative_eq;
    use chrono::TimeDelta;

    fn frame(columns: &[(&str, Vec<f64>)]) -> Frame {
        frame_from(1, columns)
    }

    /// Hourly frame starting at midnight of June `day`, 2010.
    fn frame_from(day: u32, columns: &[(&str, Vec<f64>)]) -> Frame {
        let start = NaiveDate::from_ymd_opt(2010, 6, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let n = columns.first().map_or(0, |(_, v)| v.len());
        let timestamps = (0..n).map(|i| start + TimeDelta::hours(i as i64)).collect();
        let columns = columns
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Frame::new("test", timestamps, columns).unwrap()
    }

    #[test]
    fn missing_dataset_is_config_error() {
        let mut datasets = BTreeMap::new();
        datasets.insert("obs".to_string(), frame(&[("TA_F", vec![1.0; 4])]));
        let config = EvaluateConfig::default()
            .with_reference("obs")
            .with_candidate("model")
            .with_parameter("TA_F");
        let err = compare(&datasets, &config, &ParameterTable::standard()).unwrap_err();
        assert!(matches!(
            err,
            EvaluateError::MissingDataset { ref role, .. } if role == "candidate"
        ));
    }

    #[test]
    fn candidate_failure_is_isolated() {
        let values: Vec<f64> = (0..48).map(|i| 10.0 + (i % 7) as f64).collect();
        let mut datasets = BTreeMap::new();
        datasets.insert("obs".to_string(), frame(&[("TA_F", values.clone())]));
        datasets.insert("good".to_string(), frame(&[("TA_F", values.clone())]));
        datasets.insert("bad".to_string(), frame(&[("T_2M", values)]));
        let config = EvaluateConfig::default()
            .with_reference("obs")
            .with_candidate("good")
            .with_candidate("bad")
            .with_parameter("TA_F")
            .with_bucket(Bucket::Hourly);

        let report = compare(&datasets, &config, &ParameterTable::standard()).unwrap();
        assert_eq!(report.comparisons.len(), 1);
        assert_eq!(report.comparisons[0].summary.len(), 1);
        assert_eq!(report.comparisons[0].aligned.n_series(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].candidate.as_deref(), Some("bad"));
    }

    #[test]
    fn kelvin_model_matches_celsius_observation() {
        let celsius: Vec<f64> = (0..72).map(|i| 10.0 + (i % 10) as f64).collect();
        let kelvin: Vec<f64> = celsius.iter().map(|v| v + 273.15).collect();
        let mut datasets = BTreeMap::new();
        datasets.insert("station".to_string(), frame(&[("TA_F", celsius)]));
        datasets.insert("cosmo".to_string(), frame(&[("T_2M", kelvin)]));
        let config = EvaluateConfig::default()
            .with_reference("station")
            .with_candidate("cosmo")
            .with_parameter("TA_F")
            .with_source("cosmo", "TA_F", "T_2M");

        let report = compare(&datasets, &config, &ParameterTable::standard()).unwrap();
        assert!(report.failures.is_empty());
        let row = &report.comparisons[0].summary[0];
        assert_eq!(row.n, 3);
        assert_relative_eq!(row.model_mean, row.obs_mean, epsilon = 1e-9);
        assert!(row.mae < 1e-9);
    }

    #[test]
    fn n_daily_buckets_share_grid_across_start_days() {
        let mut datasets = BTreeMap::new();
        datasets.insert(
            "station".to_string(),
            frame_from(1, &[("TA_F", vec![15.0; 29 * 24])]),
        );
        datasets.insert(
            "cosmo".to_string(),
            frame_from(3, &[("TA_F", vec![16.0; 27 * 24])]),
        );
        let base = EvaluateConfig::default()
            .with_reference("station")
            .with_candidate("cosmo")
            .with_parameter("TA_F")
            .with_bucket(Bucket::n_daily(5).unwrap());

        let period = Period::parse("2010-06-01", "2010-06-30").unwrap();
        for config in [base.clone(), base.with_period(period)] {
            let report = compare(&datasets, &config, &ParameterTable::standard()).unwrap();
            let comparison = &report.comparisons[0];
            // Buckets starting June 1, 6, 11, 16, 21, 26.
            assert_eq!(comparison.aligned.len(), 6);
            assert_eq!(comparison.summary[0].n, 6);
            assert_relative_eq!(comparison.summary[0].mae, 1.0, epsilon = 1e-12);
        }
    }
}
