//! Temperature units and conversions.
//!
//! The unit stored on a device's setpoint entry is authoritative: every write
//! converts the incoming value into that unit, and reads enrich with both
//! conversions without touching the canonical entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Temperature unit tag carried by setpoint/ambient state entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TempUnit {
    C,
    F,
}

impl TempUnit {
    /// Convert an absolute temperature expressed in `self` into `target`.
    #[must_use]
    pub fn convert_into(self, value: f64, target: TempUnit) -> f64 {
        match (self, target) {
            (Self::C, Self::F) => value * 9.0 / 5.0 + 32.0,
            (Self::F, Self::C) => (value - 32.0) * 5.0 / 9.0,
            _ => value,
        }
    }

    /// Convert a temperature *delta* expressed in `self` into `target`.
    ///
    /// Deltas scale but do not shift: a change of 9 °F is a change of 5 °C.
    #[must_use]
    pub fn delta_into(self, delta: f64, target: TempUnit) -> f64 {
        match (self, target) {
            (Self::C, Self::F) => delta * 9.0 / 5.0,
            (Self::F, Self::C) => delta * 5.0 / 9.0,
            _ => delta,
        }
    }
}

impl fmt::Display for TempUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::C => f.write_str("C"),
            Self::F => f.write_str("F"),
        }
    }
}

impl FromStr for TempUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("c") {
            Ok(Self::C)
        } else if s.eq_ignore_ascii_case("f") {
            Ok(Self::F)
        } else {
            Err(ValidationError::UnknownTemperatureUnit(s.to_string()))
        }
    }
}

/// Round to two decimal places, the precision exposed by enriched readings.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
