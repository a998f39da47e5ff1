//! Pure conversion functions: TOML config structs -> crate API config types.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::config::*;

use aeolus_calendar::{Bucket, Period};
use aeolus_evaluate::EvaluateConfig;
use aeolus_io::{FormatProfile, read_frame};
use aeolus_series::Frame;

/// Parses a bucket name such as `hourly`, `daily`, `7d` or `monthly`.
pub fn parse_bucket(s: &str) -> Result<Bucket> {
    s.parse::<Bucket>()
        .with_context(|| format!("invalid bucket: {s:?}"))
}

/// Builds the optional comparison period from `start`/`end`.
///
/// Both ends must be given together.
pub fn parse_period(start: Option<&str>, end: Option<&str>) -> Result<Option<Period>> {
    match (start, end) {
        (Some(s), Some(e)) => Period::parse(s, e)
            .map(Some)
            .with_context(|| format!("invalid period {s}..{e}")),
        (None, None) => Ok(None),
        _ => bail!("period needs both start and end"),
    }
}

/// Converts `[[climatology.windows]]` into periods.
pub fn build_windows(windows: &[WindowToml]) -> Result<Vec<Period>> {
    windows
        .iter()
        .map(|w| {
            Period::parse(&w.start, &w.end)
                .with_context(|| format!("invalid window {}..{}", w.start, w.end))
        })
        .collect()
}

/// Windows and buckets used by the climatology reductions.
#[derive(Debug, Clone)]
pub struct CycleSettings {
    pub windows: Vec<Period>,
    pub bucket: Bucket,
    pub diurnal_bucket: Bucket,
}

/// Builds [`CycleSettings`] from the `[climatology]` table.
///
/// Without explicit windows, `fallback` (usually the comparison period)
/// becomes the only window.
pub fn build_cycle_settings(
    climatology: &ClimatologyToml,
    fallback: Option<&Period>,
) -> Result<CycleSettings> {
    let mut windows = build_windows(&climatology.windows)?;
    if windows.is_empty()
        && let Some(period) = fallback
    {
        windows.push(*period);
    }
    Ok(CycleSettings {
        windows,
        bucket: parse_bucket(&climatology.bucket)?,
        diurnal_bucket: parse_bucket(&climatology.diurnal_bucket)?,
    })
}

/// Builds an [`EvaluateConfig`] from the `[compare]` table and the
/// per-dataset `parameters` mappings.
pub fn build_evaluate_config(
    compare: &CompareToml,
    datasets: &[DatasetToml],
) -> Result<EvaluateConfig> {
    let mut cfg = EvaluateConfig::default()
        .with_reference(&compare.reference)
        .with_bucket(parse_bucket(&compare.bucket)?);
    for name in &compare.candidates {
        cfg = cfg.with_candidate(name);
    }
    for parameter in &compare.parameters {
        cfg = cfg.with_parameter(parameter);
    }
    if let Some(period) = parse_period(compare.start.as_deref(), compare.end.as_deref())? {
        cfg = cfg.with_period(period);
    }
    for dataset in datasets {
        for (parameter, column) in &dataset.parameters {
            cfg = cfg.with_source(&dataset.name, parameter, column);
        }
    }
    Ok(cfg)
}

/// Column `dataset` stores `parameter` in.
pub fn source_column<'a>(dataset: &'a DatasetToml, parameter: &'a str) -> &'a str {
    dataset
        .parameters
        .get(parameter)
        .map_or(parameter, String::as_str)
}

/// Resolves the built-in profile of a dataset and applies its renames.
pub fn build_profile(dataset: &DatasetToml) -> Result<FormatProfile> {
    let mut profile = FormatProfile::builtin(&dataset.format)
        .with_context(|| format!("dataset '{}'", dataset.name))?;
    for r in &dataset.rename {
        profile = profile.with_rename(&r.from, &r.to);
    }
    profile
        .validate()
        .with_context(|| format!("dataset '{}'", dataset.name))?;
    Ok(profile)
}

/// Finds a `[[dataset]]` entry by name.
pub fn find_dataset<'a>(config: &'a AeolusConfig, name: &str) -> Result<&'a DatasetToml> {
    config
        .datasets
        .iter()
        .find(|d| d.name == name)
        .with_context(|| format!("no [[dataset]] named '{name}' in config"))
}

/// Reads one dataset, naming the frame after its config entry.
pub fn load_dataset(dataset: &DatasetToml) -> Result<Frame> {
    let profile = build_profile(dataset)?;
    info!(
        name = %dataset.name,
        path = %dataset.path.display(),
        format = %profile,
        "reading dataset"
    );
    let frame = read_frame(&dataset.path, &profile)
        .with_context(|| format!("failed to read dataset '{}'", dataset.name))?;
    Ok(frame.renamed(&dataset.name))
}

/// Reads the named datasets, keyed by name.
pub fn load_datasets<'a, I>(config: &AeolusConfig, names: I) -> Result<BTreeMap<String, Frame>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut frames = BTreeMap::new();
    for name in names {
        if frames.contains_key(name) {
            continue;
        }
        let frame = load_dataset(find_dataset(config, name)?)?;
        frames.insert(name.to_string(), frame);
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_bucket() {
        assert_eq!(parse_bucket("hourly").unwrap(), Bucket::Hourly);
        assert_eq!(parse_bucket("7d").unwrap(), Bucket::n_daily(7).unwrap());
        assert!(parse_bucket("fortnightly").is_err());
    }

    #[test]
    fn test_parse_period() {
        assert!(parse_period(None, None).unwrap().is_none());
        let p = parse_period(Some("2010-06-01"), Some("2010-06-30"))
            .unwrap()
            .unwrap();
        assert_eq!(p.n_days(), 30);
        assert!(parse_period(Some("2010-06-01"), None).is_err());
        assert!(parse_period(Some("2010-06-30"), Some("2010-06-01")).is_err());
    }

    #[test]
    fn test_cycle_settings_fallback_window() {
        let period = Period::parse("2010-06-01", "2010-06-30").unwrap();
        let settings = build_cycle_settings(&ClimatologyToml::default(), Some(&period)).unwrap();
        assert_eq!(settings.windows, vec![period]);
        assert_eq!(settings.bucket, Bucket::Daily);
        assert_eq!(settings.diurnal_bucket, Bucket::Hourly);

        let explicit = ClimatologyToml {
            windows: vec![WindowToml {
                start: "2011-06-01".to_string(),
                end: "2011-06-30".to_string(),
            }],
            ..ClimatologyToml::default()
        };
        let settings = build_cycle_settings(&explicit, Some(&period)).unwrap();
        assert_eq!(settings.windows.len(), 1);
        assert_ne!(settings.windows[0], period);
    }

    #[test]
    fn test_build_evaluate_config() {
        let compare = CompareToml {
            reference: "fluxnet".to_string(),
            candidates: vec!["cosmo".to_string()],
            parameters: vec!["LE_CORR".to_string()],
            start: Some("2010-01-01".to_string()),
            end: Some("2010-12-31".to_string()),
            bucket: "monthly".to_string(),
        };
        let cosmo = DatasetToml {
            name: "cosmo".to_string(),
            path: PathBuf::from("cosmo.csv"),
            format: "cosmo".to_string(),
            rename: Vec::new(),
            parameters: BTreeMap::from([("TA_F".to_string(), "T_2M".to_string())]),
        };
        let cfg = build_evaluate_config(&compare, std::slice::from_ref(&cosmo)).unwrap();
        assert_eq!(cfg.reference(), "fluxnet");
        assert_eq!(cfg.candidates(), &["cosmo"]);
        assert_eq!(cfg.bucket(), Bucket::Monthly);
        assert!(cfg.period().is_some());
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.source_column("cosmo", "TA_F"), "T_2M");
        assert_eq!(cfg.source_column("fluxnet", "TA_F"), "TA_F");
        assert_eq!(source_column(&cosmo, "TA_F"), "T_2M");
        assert_eq!(source_column(&cosmo, "LE_CORR"), "LE_CORR");
    }

    #[test]
    fn test_build_profile() {
        let dataset = DatasetToml {
            name: "cosmo".to_string(),
            path: PathBuf::from("cosmo.csv"),
            format: "cosmo".to_string(),
            rename: vec![RenameToml {
                from: "ALHFL_S".to_string(),
                to: "LE_CORR".to_string(),
            }],
            parameters: BTreeMap::new(),
        };
        let profile = build_profile(&dataset).unwrap();
        assert_eq!(profile.rename("ALHFL_S"), "LE_CORR");

        let unknown = DatasetToml {
            format: "grib".to_string(),
            ..dataset
        };
        assert!(build_profile(&unknown).is_err());
    }
}
