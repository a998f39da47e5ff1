//! Evaluation configuration.

use std::collections::{BTreeMap, BTreeSet};

use aeolus_calendar::{Bucket, Period};

use crate::error::EvaluateError;

/// Configuration for a batch comparison.
///
/// One reference dataset is compared against every candidate, parameter by
/// parameter, after resampling all of them onto the same bucket and period.
///
/// Each dataset reads a parameter from a source column, by default the
/// column of the same name. The unit and sign rules applied while
/// resampling follow that source column, so a model's `T_2M` (Kelvin) can
/// be compared with an observed `TA_F` (°C).
#[derive(Debug, Clone)]
pub struct EvaluateConfig {
    reference: String,
    candidates: Vec<String>,
    parameters: Vec<String>,
    period: Option<Period>,
    bucket: Bucket,
    /// dataset -> parameter -> source column
    sources: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self {
            reference: "observation".to_string(),
            candidates: Vec::new(),
            parameters: Vec::new(),
            period: None,
            bucket: Bucket::Daily,
            sources: BTreeMap::new(),
        }
    }
}

impl EvaluateConfig {
    /// Set the reference dataset name.
    pub fn with_reference(mut self, name: impl Into<String>) -> Self {
        self.reference = name.into();
        self
    }

    /// Append a candidate dataset name.
    pub fn with_candidate(mut self, name: impl Into<String>) -> Self {
        self.candidates.push(name.into());
        self
    }

    /// Append a parameter to compare.
    pub fn with_parameter(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(name.into());
        self
    }

    /// Restrict the comparison to `period`.
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    /// Set the resampling bucket.
    pub fn with_bucket(mut self, bucket: Bucket) -> Self {
        self.bucket = bucket;
        self
    }

    /// Read `parameter` of `dataset` from source `column`.
    pub fn with_source(
        mut self,
        dataset: impl Into<String>,
        parameter: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        self.sources
            .entry(dataset.into())
            .or_default()
            .insert(parameter.into(), column.into());
        self
    }

    /// Source column holding `parameter` in `dataset`.
    pub fn source_column<'a>(&'a self, dataset: &str, parameter: &'a str) -> &'a str {
        self.sources
            .get(dataset)
            .and_then(|m| m.get(parameter))
            .map_or(parameter, String::as_str)
    }

    /// Returns the reference dataset name.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the candidate dataset names.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Returns the parameters to compare.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Returns the comparison period, if restricted.
    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    /// Returns the resampling bucket.
    pub fn bucket(&self) -> Bucket {
        self.bucket
    }

    /// Check the configuration for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::Validation`] listing every problem: no
    /// candidates, no parameters, repeated names, or the reference listed
    /// as a candidate.
    pub fn validate(&self) -> Result<(), EvaluateError> {
        let mut problems = Vec::new();
        if self.reference.trim().is_empty() {
            problems.push("reference name is empty".to_string());
        }
        if self.candidates.is_empty() {
            problems.push("no candidate datasets".to_string());
        }
        if self.parameters.is_empty() {
            problems.push("no parameters".to_string());
        }
        if self.candidates.contains(&self.reference) {
            problems.push(format!(
                "reference '{}' is also a candidate",
                self.reference
            ));
        }
        let mut seen = BTreeSet::new();
        for c in &self.candidates {
            if !seen.insert(c) {
                problems.push(format!("candidate '{c}' listed twice"));
            }
        }
        let mut seen = BTreeSet::new();
        for p in &self.parameters {
            if !seen.insert(p) {
                problems.push(format!("parameter '{p}' listed twice"));
            }
        }
        for (dataset, columns) in &self.sources {
            for (parameter, column) in columns {
                if column.trim().is_empty() {
                    problems.push(format!(
                        "empty source column for '{parameter}' in '{dataset}'"
                    ));
                }
            }
        }
        if problems.is_empty() {
            return Ok(());
        }
        Err(EvaluateError::Validation {
            count: problems.len(),
            details: problems.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> EvaluateConfig {
        EvaluateConfig::default()
            .with_reference("fluxnet")
            .with_candidate("cosmo")
            .with_parameter("LE_CORR")
    }

    #[test]
    fn test_default_values() {
        let config = EvaluateConfig::default();
        assert_eq!(config.reference(), "observation");
        assert_eq!(config.bucket(), Bucket::Daily);
        assert!(config.period().is_none());
    }

    #[test]
    fn test_builder_methods() {
        let period = Period::parse("2010-01-01", "2010-12-31").unwrap();
        let config = valid()
            .with_candidate("gleam")
            .with_bucket(Bucket::Monthly)
            .with_period(period);
        assert_eq!(config.candidates(), &["cosmo", "gleam"]);
        assert_eq!(config.parameters(), &["LE_CORR"]);
        assert_eq!(config.bucket(), Bucket::Monthly);
        assert_eq!(config.period(), Some(&period));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_source_column_defaults_to_parameter() {
        let config = valid().with_source("cosmo", "TA_F", "T_2M");
        assert_eq!(config.source_column("cosmo", "TA_F"), "T_2M");
        assert_eq!(config.source_column("cosmo", "LE_CORR"), "LE_CORR");
        assert_eq!(config.source_column("fluxnet", "TA_F"), "TA_F");
        assert!(config.validate().is_ok());
        assert!(valid().with_source("cosmo", "TA_F", " ").validate().is_err());
    }

    #[test]
    fn test_validate_empty() {
        let err = EvaluateConfig::default().validate().unwrap_err();
        match err {
            EvaluateError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert!(details.contains("no candidate datasets"));
            }
            _ => panic!("expected Validation error"),
        }
    }

    #[test]
    fn test_validate_duplicates() {
        let config = valid()
            .with_candidate("cosmo")
            .with_candidate("fluxnet")
            .with_parameter("LE_CORR");
        match config.validate().unwrap_err() {
            EvaluateError::Validation { count, .. } => assert_eq!(count, 3),
            _ => panic!("expected Validation error"),
        }
    }
}
