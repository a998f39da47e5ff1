//! Compare command: batch comparison plus the per-parameter table tree.
//!
//! Layout under the output directory:
//!
//! ```text
//! <dir>/summary.csv
//! <dir>/results.json
//! <dir>/failures.json
//! <dir>/<parameter>/Annual/series.csv        aligned series, configured bucket
//! <dir>/<parameter>/Annual/climatology.csv   monthly cycle over the period
//! <dir>/<parameter>/Monthly/climatology.csv  day-of-month cycle per dataset
//! <dir>/<parameter>/Diurnal/climatology.csv  hour-of-day cycle per dataset
//! <dir>/<parameter>/Weekly/series.csv        aligned 7-day means or sums
//! ```
//!
//! Every table reads each dataset's own source column for the parameter.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use aeolus_calendar::Bucket;
use aeolus_evaluate::{EvaluateConfig, ParameterComparison, compare, to_json, write_summary_csv};
use aeolus_io::{write_aligned_csv, write_climatology_csv};
use aeolus_resample::{ParameterTable, grid_anchor, resample_parameter_from};
use aeolus_series::{Frame, align};

use crate::cli::{CompareArgs, Mode};
use crate::climatology_cmd::reduce;
use crate::config::AeolusConfig;
use crate::convert::{self, CycleSettings};

const WEEK_DAYS: u32 = 7;

/// Run the batch comparison.
pub fn run(args: CompareArgs) -> Result<()> {
    let _cmd = info_span!("compare").entered();
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: AeolusConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    let eval_cfg = convert::build_evaluate_config(&config.compare, &config.datasets)?;
    eval_cfg.validate().context("invalid [compare] section")?;
    let settings = convert::build_cycle_settings(&config.climatology, eval_cfg.period())?;
    let out_dir = args.output.unwrap_or_else(|| config.output.dir.clone());
    prepare_output(&out_dir, args.clean)?;

    let names = std::iter::once(eval_cfg.reference())
        .chain(eval_cfg.candidates().iter().map(String::as_str));
    let datasets = convert::load_datasets(&config, names)?;

    let table = ParameterTable::standard();
    let report = compare(&datasets, &eval_cfg, &table).context("comparison failed")?;

    for comparison in &report.comparisons {
        let _span = info_span!("tables", parameter = %comparison.parameter).entered();
        write_tables(&out_dir, comparison, &datasets, &eval_cfg, &settings, &table)?;
    }

    let summary_path = out_dir.join("summary.csv");
    write_summary_csv(&summary_path, &report.summary_rows())
        .with_context(|| format!("failed to write summary: {}", summary_path.display()))?;

    let results_path = out_dir.join("results.json");
    let json = to_json(&report.results()).context("failed to serialize results")?;
    std::fs::write(&results_path, json)
        .with_context(|| format!("failed to write results: {}", results_path.display()))?;

    if !report.failures.is_empty() {
        let failures_path = out_dir.join("failures.json");
        let json = serde_json::to_string_pretty(&report.failures)
            .context("failed to serialize failures")?;
        std::fs::write(&failures_path, json)
            .with_context(|| format!("failed to write failures: {}", failures_path.display()))?;
        warn!(
            n_failed = report.failures.len(),
            path = %failures_path.display(),
            "some comparisons failed"
        );
    }

    info!(
        dir = %out_dir.display(),
        n_parameters = report.comparisons.len(),
        "comparison written"
    );
    Ok(())
}

/// Creates the output directory, removing a previous one when `clean` is set.
///
/// Without `clean`, files from an earlier run are overwritten in place.
fn prepare_output(dir: &Path, clean: bool) -> Result<()> {
    if dir.exists() {
        if clean {
            info!(dir = %dir.display(), "removing previous output");
            std::fs::remove_dir_all(dir)
                .with_context(|| format!("failed to remove {}", dir.display()))?;
        } else {
            warn!(
                dir = %dir.display(),
                "output directory exists, overwriting (use --clean to remove)"
            );
        }
    }
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))
}

fn write_tables(
    out_dir: &Path,
    comparison: &ParameterComparison,
    datasets: &BTreeMap<String, Frame>,
    eval_cfg: &EvaluateConfig,
    settings: &CycleSettings,
    table: &ParameterTable,
) -> Result<()> {
    let parameter = comparison.parameter.as_str();
    let dir = out_dir.join(parameter);
    // Reference first, then the candidates that made it through alignment.
    let members: Vec<&Frame> = comparison
        .aligned
        .names()
        .iter()
        .filter_map(|name| datasets.get(name))
        .collect();

    let path = dir.join("Annual").join("series.csv");
    write_aligned_csv(&path, &comparison.aligned)
        .with_context(|| format!("failed to write {}", path.display()))?;

    for (window, mode) in [
        ("Annual", Mode::Monthly),
        ("Monthly", Mode::Daily),
        ("Diurnal", Mode::Diurnal),
    ] {
        if mode != Mode::Monthly && settings.windows.is_empty() {
            warn!(parameter, window, "no climatology windows configured, table skipped");
            continue;
        }
        let cycles = members
            .iter()
            .map(|frame| {
                let column = eval_cfg.source_column(frame.name(), parameter);
                reduce(frame, column, mode, eval_cfg.period(), settings, table)
            })
            .collect::<Result<Vec<_>>>()?;
        let columns: Vec<(&str, _)> = members
            .iter()
            .map(|f| f.name())
            .zip(cycles.iter())
            .collect();
        let path = dir.join(window).join("climatology.csv");
        write_climatology_csv(&path, &columns)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let week = Bucket::n_daily(WEEK_DAYS).context("weekly bucket")?;
    let anchor = grid_anchor(eval_cfg.period(), members.iter().copied());
    let weekly = members
        .iter()
        .map(|frame| {
            let column = eval_cfg.source_column(frame.name(), parameter);
            resample_parameter_from(frame, column, eval_cfg.period(), week, table, anchor)
                .map(|s| s.renamed(frame.name()))
        })
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("weekly resampling of {parameter}"))?;
    let weekly = align(&weekly.iter().collect::<Vec<_>>())
        .with_context(|| format!("weekly alignment of {parameter}"))?;
    let path = dir.join("Weekly").join("series.csv");
    write_aligned_csv(&path, &weekly)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(parameter, dir = %dir.display(), "tables written");
    Ok(())
}
