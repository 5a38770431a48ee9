//! Typed device state — named value slots with unit-aware entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::temperature::TempUnit;

/// Name of a device state entry, camelCase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateName {
    On,
    IsPaused,
    IsStopped,
    Brightness,
    ThermostatTemperatureSetpoint,
    ThermostatMode,
    ThermostatTemperatureAmbient,
    FanSpeed,
    OpenPercent,
    CurrentVolume,
    IsMuted,
    CurrentInput,
    IsLocked,
    IsDocked,
    ActiveToggles,
    CurrentModes,
    IsRinging,
    Schedules,
}

impl StateName {
    /// The wire name of the state (`"on"`, `"thermostatTemperatureSetpoint"`, …).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::IsPaused => "isPaused",
            Self::IsStopped => "isStopped",
            Self::Brightness => "brightness",
            Self::ThermostatTemperatureSetpoint => "thermostatTemperatureSetpoint",
            Self::ThermostatMode => "thermostatMode",
            Self::ThermostatTemperatureAmbient => "thermostatTemperatureAmbient",
            Self::FanSpeed => "fanSpeed",
            Self::OpenPercent => "openPercent",
            Self::CurrentVolume => "currentVolume",
            Self::IsMuted => "isMuted",
            Self::CurrentInput => "currentInput",
            Self::IsLocked => "isLocked",
            Self::IsDocked => "isDocked",
            Self::ActiveToggles => "activeToggles",
            Self::CurrentModes => "currentModes",
            Self::IsRinging => "isRinging",
            Self::Schedules => "schedules",
        }
    }

    /// Whether this entry holds a temperature and therefore carries a unit.
    #[must_use]
    pub fn is_temperature(self) -> bool {
        matches!(
            self,
            Self::ThermostatTemperatureSetpoint | Self::ThermostatTemperatureAmbient
        )
    }
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single typed state value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Json(serde_json::Value),
}

impl StateValue {
    /// Read as a boolean, if the value is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Read as an integer, if the value is one.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Read as a float; integers widen.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Read as a string slice, if the value is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for StateValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A named value slot on a device.
///
/// Entries are unique by name within a device. Temperature entries carry the
/// authoritative `unit`; everything else leaves it `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    pub name: StateName,
    pub value: StateValue,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub unit: Option<TempUnit>,
}

impl DeviceState {
    /// Create an entry without a unit.
    #[must_use]
    pub fn new(name: StateName, value: impl Into<StateValue>) -> Self {
        Self {
            name,
            value: value.into(),
            unit: None,
        }
    }

    /// Create a temperature entry with its canonical unit.
    #[must_use]
    pub fn with_unit(name: StateName, value: impl Into<StateValue>, unit: TempUnit) -> Self {
        Self {
            name,
            value: value.into(),
            unit: Some(unit),
        }
    }
}

/// A named light effect, stored under `currentModes.lightEffect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightEffect {
    #[serde(rename = "sleep")]
    Sleep,
    #[serde(rename = "wake")]
    Wake,
    #[serde(rename = "colorLoop")]
    ColorLoop,
    #[serde(rename = "pulse")]
    Pulse,
}

impl LightEffect {
    /// The wire name of the effect.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Wake => "wake",
            Self::ColorLoop => "colorLoop",
            Self::Pulse => "pulse",
        }
    }
}

impl fmt::Display for LightEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LightEffect {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sleep" => Ok(Self::Sleep),
            "wake" => Ok(Self::Wake),
            "colorLoop" => Ok(Self::ColorLoop),
            "pulse" => Ok(Self::Pulse),
            _ => Err(ValidationError::UnknownLightEffect),
        }
    }
}
