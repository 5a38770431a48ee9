//! Schedules — recorded future state mutations, and delay parsing.
//!
//! A schedule is bookkeeping only: nothing in the domain or engine spawns a
//! timer. An external driver decides when "now" has passed `due_at` and asks
//! the engine to fire what is due.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::error::InvalidInputError;
use crate::id::ScheduleId;
use crate::time::Timestamp;

/// A parsed delay/duration token: `"5s"`, `"20m"`, `"1h"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Delay {
    value: u32,
    unit: DelayUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DelayUnit {
    Seconds,
    Minutes,
    Hours,
}

impl Delay {
    /// A delay of `value` whole seconds.
    #[must_use]
    pub fn seconds(value: u32) -> Self {
        Self {
            value,
            unit: DelayUnit::Seconds,
        }
    }

    /// A delay of `value` whole minutes.
    #[must_use]
    pub fn minutes(value: u32) -> Self {
        Self {
            value,
            unit: DelayUnit::Minutes,
        }
    }

    /// Convert into a [`chrono::Duration`].
    #[must_use]
    pub fn to_chrono(self) -> chrono::Duration {
        let value = i64::from(self.value);
        match self.unit {
            DelayUnit::Seconds => chrono::Duration::seconds(value),
            DelayUnit::Minutes => chrono::Duration::minutes(value),
            DelayUnit::Hours => chrono::Duration::hours(value),
        }
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            DelayUnit::Seconds => 's',
            DelayUnit::Minutes => 'm',
            DelayUnit::Hours => 'h',
        };
        write!(f, "{}{}", self.value, suffix)
    }
}

impl FromStr for Delay {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidInputError::InvalidDuration(s.to_string());
        let (digits, unit) = if let Some(digits) = s.strip_suffix('s') {
            (digits, DelayUnit::Seconds)
        } else if let Some(digits) = s.strip_suffix('m') {
            (digits, DelayUnit::Minutes)
        } else if let Some(digits) = s.strip_suffix('h') {
            (digits, DelayUnit::Hours)
        } else {
            return Err(invalid());
        };
        let value = digits.parse::<u32>().map_err(|_| invalid())?;
        Ok(Self { value, unit })
    }
}

impl TryFrom<String> for Delay {
    type Error = InvalidInputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Delay> for String {
    fn from(delay: Delay) -> Self {
        delay.to_string()
    }
}

/// A recorded future mutation attached to one device.
///
/// `values` keeps the raw caller-supplied arguments; they are re-validated
/// when the schedule fires. `duration` marks a duration-bound effect whose
/// reversal is enqueued once the primary action fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub device_id: String,
    pub command: Command,
    #[serde(default)]
    pub values: Vec<String>,
    pub due_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub duration: Option<Delay>,
}

impl Schedule {
    /// Create a schedule with a fresh id.
    #[must_use]
    pub fn new(
        device_id: impl Into<String>,
        command: Command,
        values: Vec<String>,
        due_at: Timestamp,
        duration: Option<Delay>,
    ) -> Self {
        Self {
            id: ScheduleId::new(),
            device_id: device_id.into(),
            command,
            values,
            due_at,
            duration,
        }
    }
}
