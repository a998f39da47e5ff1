//! DAV command: distribution added value of a high-resolution run.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use aeolus_calendar::Bucket;
use aeolus_io::{FormatProfile, read_frame};
use aeolus_metrics::{Histogram, dav};
use aeolus_resample::{ParameterTable, resample_parameter};

use crate::cli::DavArgs;

/// Run the DAV computation and print the score to stdout.
pub fn run(args: DavArgs) -> Result<()> {
    let _cmd = info_span!("dav", parameter = %args.parameter).entered();
    let profile = FormatProfile::builtin(&args.format)?;
    let table = ParameterTable::standard();

    let low = load_values(&args.low, &profile, &args.parameter, &table)?;
    let high = load_values(&args.high, &profile, &args.parameter, &table)?;
    let observed = load_values(&args.observed, &profile, &args.parameter, &table)?;

    for (role, values) in [("low", &low), ("high", &high), ("observed", &observed)] {
        debug!(
            role,
            frequencies = ?Histogram::from_values(values).frequencies(),
            "histogram"
        );
    }

    let value = dav(&low, &high, &observed).context("DAV undefined")?;
    info!(dav = value, "DAV computed");
    println!("{value}");
    Ok(())
}

fn load_values(
    path: &Path,
    profile: &FormatProfile,
    parameter: &str,
    table: &ParameterTable,
) -> Result<Vec<f64>> {
    let frame = read_frame(path, profile)
        .with_context(|| format!("failed to read dataset: {}", path.display()))?;
    let series = resample_parameter(&frame, parameter, None, Bucket::None, table)
        .with_context(|| format!("{parameter} in {}", path.display()))?;
    Ok(series.values().to_vec())
}
