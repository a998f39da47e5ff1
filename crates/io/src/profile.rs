//! Format profiles describing how a delimited-text dataset is laid out.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::IoError;

/// How fields in a row are separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// A single ASCII byte such as `,` or `;`.
    Byte(u8),
    /// Any run of spaces or tabs.
    Whitespace,
}

/// Names of the built-in profiles.
pub const BUILTIN_FORMATS: [&str; 7] = [
    "cosmo",
    "fluxnet",
    "euronet",
    "gleam",
    "hyras",
    "eobs",
    "lindenberg",
];

/// Layout of one dataset family.
///
/// The timestamp is taken from one or more columns joined with a single
/// space and parsed with a chrono format string; date-only formats map to
/// midnight. Cells equal to a missing-value sentinel, or that fail to
/// parse as a number, become `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatProfile {
    name: String,
    delimiter: Delimiter,
    header_skip: usize,
    timestamp_columns: Vec<String>,
    timestamp_format: String,
    renames: BTreeMap<String, String>,
    missing_values: Vec<String>,
}

impl FormatProfile {
    /// Comma-separated profile with a `time` column in ISO format.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            delimiter: Delimiter::Byte(b','),
            header_skip: 0,
            timestamp_columns: vec!["time".to_string()],
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            renames: BTreeMap::new(),
            missing_values: Vec::new(),
        }
    }

    /// Looks up a built-in profile by name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnknownFormat`] if `name` is not a built-in.
    pub fn builtin(name: &str) -> Result<Self, IoError> {
        let profile = match name {
            "cosmo" => Self::new("cosmo").with_missing(["-999.9", "-999"]),
            "fluxnet" => Self::new("fluxnet")
                .with_timestamp(["TIMESTAMP_START"], "%Y%m%d%H%M")
                .with_missing(["-9999"]),
            "euronet" => Self::new("euronet")
                .with_delimiter(b';')
                .with_timestamp(["Date", "Time"], "%d.%m.%Y %H:%M")
                .with_missing(["-9999"]),
            "gleam" => Self::new("gleam").with_timestamp(["time"], "%Y-%m-%d"),
            "hyras" => Self::new("hyras")
                .with_delimiter(b';')
                .with_timestamp(["date"], "%Y-%m-%d")
                .with_missing(["-999"]),
            "eobs" => Self::new("eobs")
                .with_timestamp(["time"], "%Y-%m-%d")
                .with_missing(["-9999"]),
            "lindenberg" => Self::new("lindenberg")
                .with_delimiter(b';')
                .with_timestamp(["Zeit"], "%Y-%m-%d %H:%M")
                .with_missing(["9990", "***"]),
            _ => {
                return Err(IoError::UnknownFormat {
                    name: name.to_string(),
                });
            }
        };
        Ok(profile)
    }

    /// Sets a single-byte delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Delimiter::Byte(delimiter);
        self
    }

    /// Splits rows on runs of whitespace.
    pub fn with_whitespace(mut self) -> Self {
        self.delimiter = Delimiter::Whitespace;
        self
    }

    /// Number of lines to discard before the header row.
    pub fn with_header_skip(mut self, lines: usize) -> Self {
        self.header_skip = lines;
        self
    }

    /// Sets the timestamp source columns and their chrono format.
    pub fn with_timestamp<I, S>(mut self, columns: I, format: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.timestamp_columns = columns.into_iter().map(Into::into).collect();
        self.timestamp_format = format.into();
        self
    }

    /// Renames a source column after the header is read.
    pub fn with_rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.renames.insert(from.into(), to.into());
        self
    }

    /// Adds missing-value sentinels.
    pub fn with_missing<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_values.extend(values.into_iter().map(Into::into));
        self
    }

    /// Profile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field separator.
    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    /// Lines skipped before the header.
    pub fn header_skip(&self) -> usize {
        self.header_skip
    }

    /// Columns that make up the timestamp (after renaming).
    pub fn timestamp_columns(&self) -> &[String] {
        &self.timestamp_columns
    }

    /// chrono format of the joined timestamp text.
    pub fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    /// Column name after applying renames.
    pub fn rename<'a>(&'a self, column: &'a str) -> &'a str {
        self.renames.get(column).map_or(column, String::as_str)
    }

    /// Parses one data cell, mapping sentinels and garbage to `NaN`.
    pub fn parse_value(&self, cell: &str) -> f64 {
        let cell = cell.trim();
        if cell.is_empty() || self.missing_values.iter().any(|m| m == cell) {
            return f64::NAN;
        }
        let Ok(value) = cell.parse::<f64>() else {
            return f64::NAN;
        };
        let is_sentinel = self
            .missing_values
            .iter()
            .filter_map(|m| m.parse::<f64>().ok())
            .any(|m| m == value);
        if is_sentinel { f64::NAN } else { value }
    }

    /// Validates the profile.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every problem found.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut problems = Vec::new();
        if self.timestamp_columns.is_empty() {
            problems.push("no timestamp column".to_string());
        }
        if self.timestamp_format.trim().is_empty() {
            problems.push("empty timestamp format".to_string());
        }
        if let Delimiter::Byte(b) = self.delimiter
            && (b == b'"' || b == b'\n' || b == b'\r')
        {
            problems.push(format!("delimiter {:?} is not usable", b as char));
        }
        if problems.is_empty() {
            return Ok(());
        }
        Err(IoError::Validation {
            count: problems.len(),
            details: problems.join("; "),
        })
    }
}

impl FromStr for FormatProfile {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::builtin(s.trim())
    }
}

impl fmt::Display for FormatProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_resolves_and_validates() {
        for name in BUILTIN_FORMATS {
            let profile = FormatProfile::builtin(name).unwrap();
            assert_eq!(profile.name(), name);
            assert!(profile.validate().is_ok());
        }
    }

    #[test]
    fn unknown_builtin() {
        let err = "grib".parse::<FormatProfile>().unwrap_err();
        assert!(matches!(err, IoError::UnknownFormat { .. }));
    }

    #[test]
    fn sentinels_become_nan() {
        let fluxnet = FormatProfile::builtin("fluxnet").unwrap();
        assert!(fluxnet.parse_value("-9999").is_nan());
        assert!(fluxnet.parse_value("-9999.0").is_nan());
        assert_eq!(fluxnet.parse_value(" 12.5 "), 12.5);

        let lindenberg = FormatProfile::builtin("lindenberg").unwrap();
        assert!(lindenberg.parse_value("9990").is_nan());
        assert!(lindenberg.parse_value("***").is_nan());
    }

    #[test]
    fn garbage_becomes_nan() {
        let p = FormatProfile::new("x");
        assert!(p.parse_value("n/a").is_nan());
        assert!(p.parse_value("").is_nan());
    }

    #[test]
    fn rename_lookup() {
        let p = FormatProfile::new("x").with_rename("LE", "LE_F_MDS");
        assert_eq!(p.rename("LE"), "LE_F_MDS");
        assert_eq!(p.rename("H"), "H");
    }

    #[test]
    fn validate_collects_problems() {
        let p = FormatProfile::new("x")
            .with_timestamp(Vec::<String>::new(), "")
            .with_delimiter(b'"');
        match p.validate().unwrap_err() {
            IoError::Validation { count, .. } => assert_eq!(count, 3),
            other => panic!("expected Validation error, got {other:?}"),
        }
    }
}
