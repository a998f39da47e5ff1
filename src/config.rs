use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level aeolus configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AeolusConfig {
    /// Datasets available to every command, by name.
    #[serde(default, rename = "dataset")]
    pub datasets: Vec<DatasetToml>,

    /// Batch comparison settings.
    #[serde(default)]
    pub compare: CompareToml,

    /// Climatology settings.
    #[serde(default)]
    pub climatology: ClimatologyToml,

    /// Output settings.
    #[serde(default)]
    pub output: OutputToml,
}

/// One `[[dataset]]` entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetToml {
    pub name: String,
    pub path: PathBuf,
    /// Built-in format profile name.
    pub format: String,
    /// Source column renames applied after the header is read.
    #[serde(default)]
    pub rename: Vec<RenameToml>,
    /// Compared parameter -> column this dataset stores it in, for
    /// datasets whose native name or unit differs from the reference.
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenameToml {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompareToml {
    #[serde(default = "default_reference")]
    pub reference: String,
    #[serde(default)]
    pub candidates: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<String>,
    /// First day of the comparison period, `YYYY-MM-DD`.
    #[serde(default)]
    pub start: Option<String>,
    /// Last day of the comparison period, inclusive.
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default = "default_compare_bucket")]
    pub bucket: String,
}

impl Default for CompareToml {
    fn default() -> Self {
        Self {
            reference: default_reference(),
            candidates: Vec::new(),
            parameters: Vec::new(),
            start: None,
            end: None,
            bucket: default_compare_bucket(),
        }
    }
}

fn default_reference() -> String {
    "observation".to_string()
}
fn default_compare_bucket() -> String {
    "daily".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimatologyToml {
    /// Windows averaged in the day-of-month and diurnal cycles.
    #[serde(default)]
    pub windows: Vec<WindowToml>,
    /// Bucket applied before the monthly and day-of-month reductions.
    #[serde(default = "default_climatology_bucket")]
    pub bucket: String,
    /// Bucket applied before the diurnal reduction.
    #[serde(default = "default_diurnal_bucket")]
    pub diurnal_bucket: String,
}

impl Default for ClimatologyToml {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            bucket: default_climatology_bucket(),
            diurnal_bucket: default_diurnal_bucket(),
        }
    }
}

fn default_climatology_bucket() -> String {
    "daily".to_string()
}
fn default_diurnal_bucket() -> String {
    "hourly".to_string()
}

/// Inclusive date range, `YYYY-MM-DD` at both ends.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowToml {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("aeolus-output")
}
