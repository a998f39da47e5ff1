//! Field command: per-grid-point KGE and RMSD from precomputed statistics.

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use aeolus_io::{read_field_samples, write_field_csv};
use aeolus_metrics::{KGE_REPAIR_THRESHOLD, field_kge, field_rmsd, repair_field_kge};

use crate::cli::FieldArgs;

/// Run the field comparison.
pub fn run(args: FieldArgs) -> Result<()> {
    let _cmd = info_span!("field").entered();
    let reference = read_field_samples(&args.reference)
        .with_context(|| format!("failed to read field: {}", args.reference.display()))?;
    let candidate = read_field_samples(&args.candidate)
        .with_context(|| format!("failed to read field: {}", args.candidate.display()))?;
    info!(n_points = reference.len(), "field statistics loaded");

    let raw: Vec<f64> = field_kge(&reference, &candidate)
        .context("field KGE failed")?
        .into_iter()
        .enumerate()
        .map(|(i, kge)| {
            kge.unwrap_or_else(|e| {
                debug!(point = i, error = %e, "KGE undefined at grid point");
                f64::NAN
            })
        })
        .collect();
    let n_below = raw.iter().filter(|&&k| k < KGE_REPAIR_THRESHOLD).count();
    let kge = repair_field_kge(&raw);
    let rmsd = field_rmsd(&reference, &candidate).context("field RMSD failed")?;
    info!(n_repaired = n_below, "field metrics computed");

    write_field_csv(
        &args.output,
        &reference,
        &[
            ("kge_raw", raw.as_slice()),
            ("kge", kge.as_slice()),
            ("rmsd", rmsd.as_slice()),
        ],
    )
    .with_context(|| format!("failed to write field metrics: {}", args.output.display()))?;
    info!(path = %args.output.display(), "field metrics written");

    Ok(())
}
