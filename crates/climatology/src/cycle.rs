//! Climatology cycles and the reduced table.

use std::fmt;

use aeolus_calendar::MONTH_NAMES;
use aeolus_series::TimeSeries;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::ClimatologyError;

/// The recurring calendar position a climatology is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cycle {
    /// Calendar month, 12 slots.
    Monthly,
    /// Day of month, up to 31 slots.
    DayOfMonth,
    /// Hour of day, 24 slots.
    Diurnal,
}

impl Cycle {
    /// Slot key of `ts`: month 1..=12, day 1..=31 or hour 0..=23.
    pub fn key(self, ts: NaiveDateTime) -> u32 {
        match self {
            Self::Monthly => ts.month(),
            Self::DayOfMonth => ts.day(),
            Self::Diurnal => ts.hour(),
        }
    }

    /// First slot key.
    pub(crate) fn first_key(self) -> u32 {
        match self {
            Self::Diurnal => 0,
            _ => 1,
        }
    }

    fn label(self, key: u32) -> String {
        match self {
            Self::Monthly => MONTH_NAMES[(key - 1) as usize].to_string(),
            Self::DayOfMonth => key.to_string(),
            Self::Diurnal => format!("{key:02}:00"),
        }
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Monthly => "monthly",
            Self::DayOfMonth => "day-of-month",
            Self::Diurnal => "diurnal",
        };
        f.write_str(name)
    }
}

/// A reduced table: one mean value per cycle slot.
///
/// Slots without data hold `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct Climatology {
    parameter: String,
    cycle: Cycle,
    keys: Vec<u32>,
    values: Vec<f64>,
}

impl Climatology {
    pub(crate) fn from_slots(parameter: &str, cycle: Cycle, values: Vec<f64>) -> Self {
        let first = cycle.first_key();
        let keys = (first..first + values.len() as u32).collect();
        Self {
            parameter: parameter.to_string(),
            cycle,
            keys,
            values,
        }
    }

    /// Parameter the table was reduced from.
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// Grouping cycle.
    pub fn cycle(&self) -> Cycle {
        self.cycle
    }

    /// Slot keys in ascending order.
    pub fn keys(&self) -> &[u32] {
        &self.keys
    }

    /// Human-readable slot labels (`January`, `17`, `06:00`).
    pub fn labels(&self) -> Vec<String> {
        self.keys.iter().map(|&k| self.cycle.label(k)).collect()
    }

    /// Mean per slot.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the table has no slots.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value for slot `key`, if the slot exists.
    pub fn get(&self, key: u32) -> Option<f64> {
        self.keys
            .iter()
            .position(|&k| k == key)
            .map(|i| self.values[i])
    }

    /// Returns `true` if no slot carries data.
    pub fn is_all_nan(&self) -> bool {
        self.values.iter().all(|v| v.is_nan())
    }

    /// Places the slots on a synthetic index inside `year` so the table can
    /// be plotted or exported like any other series.
    ///
    /// Monthly slots land on the first of each month, day-of-month slots on
    /// the days of January and diurnal slots on the hours of January 1st.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatologyError::InvalidIndexYear`] if `year` is outside
    /// the range chrono can represent.
    pub fn to_series(&self, year: i32) -> Result<TimeSeries, ClimatologyError> {
        let invalid = || ClimatologyError::InvalidIndexYear {
            year,
            cycle: self.cycle.to_string(),
        };
        let mut pairs = Vec::with_capacity(self.len());
        for (&key, &value) in self.keys.iter().zip(&self.values) {
            let (month, day, hour) = match self.cycle {
                Cycle::Monthly => (key, 1, 0),
                Cycle::DayOfMonth => (1, key, 0),
                Cycle::Diurnal => (1, 1, key),
            };
            let ts = NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|d| d.and_hms_opt(hour, 0, 0))
                .ok_or_else(invalid)?;
            pairs.push((ts, value));
        }
        Ok(TimeSeries::from_pairs(self.parameter.as_str(), pairs))
    }
}
