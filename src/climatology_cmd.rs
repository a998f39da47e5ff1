//! Climatology command: reduce one dataset parameter to a cycle table.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use aeolus_calendar::Period;
use aeolus_climatology::{
    Climatology, day_of_month_climatology, diurnal_climatology, monthly_climatology_over,
};
use aeolus_io::write_climatology_csv;
use aeolus_resample::ParameterTable;
use aeolus_series::Frame;

use crate::cli::{ClimatologyArgs, Mode};
use crate::config::AeolusConfig;
use crate::convert::{self, CycleSettings};

/// Computes the `mode` cycle of one dataset column.
///
/// The monthly cycle covers `period` (the whole record when `None`); the
/// other cycles cover the configured windows.
pub fn reduce(
    frame: &Frame,
    parameter: &str,
    mode: Mode,
    period: Option<&Period>,
    settings: &CycleSettings,
    table: &ParameterTable,
) -> Result<Climatology> {
    let clim = match mode {
        Mode::Monthly => monthly_climatology_over(
            std::slice::from_ref(frame),
            period,
            parameter,
            settings.bucket,
            table,
        ),
        Mode::Daily => day_of_month_climatology(
            frame,
            &settings.windows,
            parameter,
            settings.bucket,
            table,
        ),
        Mode::Diurnal => diurnal_climatology(
            frame,
            &settings.windows,
            parameter,
            settings.diurnal_bucket,
            table,
        ),
    };
    clim.with_context(|| format!("{mode:?} climatology of {parameter} for {}", frame.name()))
}

/// Run the climatology command.
pub fn run(args: ClimatologyArgs) -> Result<()> {
    let _cmd = info_span!("climatology", dataset = %args.dataset).entered();
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: AeolusConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    let period = convert::parse_period(
        config.compare.start.as_deref(),
        config.compare.end.as_deref(),
    )?;
    let settings = convert::build_cycle_settings(&config.climatology, period.as_ref())?;
    let dataset = convert::find_dataset(&config, &args.dataset)?;
    let column = convert::source_column(dataset, &args.parameter);
    let frame = convert::load_dataset(dataset)?;

    let clim = reduce(
        &frame,
        column,
        args.mode,
        period.as_ref(),
        &settings,
        &ParameterTable::standard(),
    )?;
    info!(
        parameter = %args.parameter,
        column,
        slots = clim.len(),
        all_nan = clim.is_all_nan(),
        "climatology computed"
    );

    let path = args.output.unwrap_or_else(|| {
        let mode = format!("{:?}", args.mode).to_lowercase();
        config
            .output
            .dir
            .join(&args.parameter)
            .join(format!("{mode}_{}.csv", args.dataset))
    });
    write_climatology_csv(&path, &[(args.dataset.as_str(), &clim)])
        .with_context(|| format!("failed to write climatology: {}", path.display()))?;
    info!(path = %path.display(), "climatology written");

    Ok(())
}
