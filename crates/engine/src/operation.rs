//! Validated operations — a command plus parsed, typed arguments.
//!
//! [`validate`] is the only way to obtain an [`Operation`], so every variant
//! carries arguments that already passed arity, type, and range checks.
//! Applying an operation is an exhaustive match; there is no fallthrough for
//! a command the registry admits but nobody implements.

use homegraph_domain::command::Command;
use homegraph_domain::device::Device;
use homegraph_domain::error::{HomeGraphError, InvalidInputError, ValidationError};
use homegraph_domain::state::{DeviceState, LightEffect, StateName, StateValue};
use homegraph_domain::temperature::TempUnit;

/// A fully validated state mutation, ready to apply to a device.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    On,
    Off,
    ToggleOnOff,
    Open,
    Close,
    OpenPercentAbsolute(f64),
    Start,
    Stop,
    Pause,
    Unpause,
    SetInput(String),
    SetBrightness(f64),
    SetFanSpeed(i64),
    SetTemperature { value: f64, unit: TempUnit },
    ChangeRelativeTemperature { delta: f64, unit: TempUnit },
    ToggleSetting { toggle: String },
    FindDevice,
    SilenceRinging,
    Broadcast(String),
    SetLightEffect { effect: LightEffect },
    SetLightEffectWithDuration { effect: LightEffect, seconds: u32 },
    VolumeUp(i64),
    VolumeDown(i64),
    SetVolumeLevel(i64),
    Mute,
    Unmute,
    SetMode { mode: String, setting: String },
    Lock,
    Unlock,
    Dock,
}

/// Validate a command's raw values into a typed [`Operation`].
///
/// Deterministic and side-effect free: identical inputs always produce the
/// same outcome.
///
/// # Errors
///
/// Returns the generic arity error when a value-less command receives values
/// or a value-taking command receives none, and an operation-specific
/// [`ValidationError`] for out-of-range, unparsable, or unknown-token values.
pub fn validate(command: Command, values: &[String]) -> Result<Operation, HomeGraphError> {
    if command.takes_values() {
        if values.is_empty() {
            return Err(InvalidInputError::RequiresValues(command.to_string()).into());
        }
    } else if !values.is_empty() {
        return Err(InvalidInputError::DoesNotSupportValues(command.to_string()).into());
    }

    let operation = match command {
        Command::On => Operation::On,
        Command::Off => Operation::Off,
        Command::ToggleOnOff => Operation::ToggleOnOff,
        Command::Open => Operation::Open,
        Command::Close => Operation::Close,
        Command::OpenPercentAbsolute => {
            let percent = parse_float(&values[0])?;
            if !(0.0..=100.0).contains(&percent) {
                return Err(ValidationError::FloatOutOfRange {
                    command: "open_percent_absolute",
                    min: 0.0,
                    max: 100.0,
                }
                .into());
            }
            Operation::OpenPercentAbsolute(percent)
        }
        Command::Start => Operation::Start,
        Command::Stop => Operation::Stop,
        Command::Pause => Operation::Pause,
        Command::Unpause => Operation::Unpause,
        Command::SetInput => Operation::SetInput(values[0].clone()),
        Command::SetBrightness => {
            let level = parse_float(&values[0])?;
            if !(0.0..=1.0).contains(&level) {
                return Err(ValidationError::FloatOutOfRange {
                    command: "set_brightness",
                    min: 0.0,
                    max: 1.0,
                }
                .into());
            }
            Operation::SetBrightness(level)
        }
        Command::SetFanSpeed => Operation::SetFanSpeed(parse_fan_speed(&values[0])?),
        Command::SetTemperature => {
            let unit = second_value(command, values, "temperature", "unit (C or F)")?
                .parse::<TempUnit>()?;
            Operation::SetTemperature {
                value: parse_float(&values[0])?,
                unit,
            }
        }
        Command::SetTemperatureCelsius => Operation::SetTemperature {
            value: parse_float(&values[0])?,
            unit: TempUnit::C,
        },
        Command::SetTemperatureFahrenheit => Operation::SetTemperature {
            value: parse_float(&values[0])?,
            unit: TempUnit::F,
        },
        Command::ChangeRelativeTemperature => {
            let unit =
                second_value(command, values, "delta", "unit (C or F)")?.parse::<TempUnit>()?;
            Operation::ChangeRelativeTemperature {
                delta: parse_float(&values[0])?,
                unit,
            }
        }
        Command::ToggleSetting => Operation::ToggleSetting {
            toggle: values[0].clone(),
        },
        Command::FindDevice => Operation::FindDevice,
        Command::SilenceRinging => Operation::SilenceRinging,
        Command::Broadcast => {
            if values[0].is_empty() {
                return Err(ValidationError::EmptyBroadcast.into());
            }
            Operation::Broadcast(values[0].clone())
        }
        Command::SetLightEffect => Operation::SetLightEffect {
            effect: values[0].parse()?,
        },
        Command::SetLightEffectWithDuration => {
            let raw_seconds = second_value(command, values, "effect", "duration_seconds")?;
            let seconds = raw_seconds
                .parse::<u32>()
                .ok()
                .filter(|s| *s >= 1)
                .ok_or(ValidationError::NonPositiveDuration)?;
            Operation::SetLightEffectWithDuration {
                effect: values[0].parse()?,
                seconds,
            }
        }
        Command::VolumeUp => Operation::VolumeUp(parse_int(&values[0])?),
        Command::VolumeDown => Operation::VolumeDown(parse_int(&values[0])?),
        Command::SetVolumeLevel => {
            let level = parse_int(&values[0])?;
            if !(0..=100).contains(&level) {
                return Err(ValidationError::IntOutOfRange {
                    command: "set_volume_level",
                    min: 0,
                    max: 100,
                }
                .into());
            }
            Operation::SetVolumeLevel(level)
        }
        Command::Mute => Operation::Mute,
        Command::Unmute => Operation::Unmute,
        Command::SetMode => {
            let setting = second_value(command, values, "mode", "setting")?;
            Operation::SetMode {
                mode: values[0].clone(),
                setting: setting.to_string(),
            }
        }
        Command::Lock => Operation::Lock,
        Command::Unlock => Operation::Unlock,
        Command::Dock => Operation::Dock,
    };
    Ok(operation)
}

impl Operation {
    /// Apply the mutation to a device's state entries.
    ///
    /// Writes are upserts: an existing entry is updated in place (its unit is
    /// preserved), a missing one is appended.
    ///
    /// # Errors
    ///
    /// Returns [`HomeGraphError::Validation`] for device-dependent violations
    /// (unknown toggle/mode ids against the device's descriptors).
    pub fn apply(&self, device: &mut Device) -> Result<(), HomeGraphError> {
        match self {
            Self::On => device.set_state(StateName::On, true),
            Self::Off => device.set_state(StateName::On, false),
            Self::ToggleOnOff => {
                let current = device
                    .state(StateName::On)
                    .and_then(|entry| entry.value.as_bool())
                    .unwrap_or(false);
                device.set_state(StateName::On, !current);
            }
            Self::Open => device.set_state(StateName::OpenPercent, 100.0),
            Self::Close => device.set_state(StateName::OpenPercent, 0.0),
            Self::OpenPercentAbsolute(percent) => {
                device.set_state(StateName::OpenPercent, *percent);
            }
            Self::Start => device.set_state(StateName::IsStopped, false),
            Self::Stop => device.set_state(StateName::IsStopped, true),
            Self::Pause => device.set_state(StateName::IsPaused, true),
            Self::Unpause => device.set_state(StateName::IsPaused, false),
            Self::SetInput(input) => device.set_state(StateName::CurrentInput, input.clone()),
            Self::SetBrightness(level) => device.set_state(StateName::Brightness, *level),
            Self::SetFanSpeed(speed) => device.set_state(StateName::FanSpeed, *speed),
            Self::SetTemperature { value, unit } => {
                write_setpoint(device, *value, *unit, Conversion::Absolute);
            }
            Self::ChangeRelativeTemperature { delta, unit } => {
                write_setpoint(device, *delta, *unit, Conversion::Delta);
            }
            Self::ToggleSetting { toggle } => {
                let valid: Vec<String> = device
                    .toggles_modes
                    .iter()
                    .map(|descriptor| descriptor.id.clone())
                    .collect();
                if !valid.iter().any(|id| id == toggle) {
                    return Err(ValidationError::UnknownToggle {
                        id: toggle.clone(),
                        valid,
                    }
                    .into());
                }
                with_map_state(device, StateName::ActiveToggles, |map| {
                    let current = map
                        .get(toggle)
                        .and_then(serde_json::Value::as_bool)
                        .unwrap_or(false);
                    map.insert(toggle.clone(), serde_json::Value::Bool(!current));
                });
            }
            Self::FindDevice => device.set_state(StateName::IsRinging, true),
            Self::SilenceRinging => device.set_state(StateName::IsRinging, false),
            Self::Broadcast(_) => {}
            Self::SetLightEffect { effect }
            | Self::SetLightEffectWithDuration { effect, .. } => {
                with_map_state(device, StateName::CurrentModes, |map| {
                    map.insert(
                        "lightEffect".to_string(),
                        serde_json::Value::String(effect.to_string()),
                    );
                });
            }
            Self::VolumeUp(step) => adjust_volume(device, *step),
            Self::VolumeDown(step) => adjust_volume(device, -step),
            Self::SetVolumeLevel(level) => device.set_state(StateName::CurrentVolume, *level),
            Self::Mute => device.set_state(StateName::IsMuted, true),
            Self::Unmute => device.set_state(StateName::IsMuted, false),
            Self::SetMode { mode, setting } => {
                if setting.is_empty() {
                    // An empty setting clears the mode; used by duration
                    // reversals to drop a light effect.
                    with_map_state(device, StateName::CurrentModes, |map| {
                        map.remove(mode);
                    });
                    return Ok(());
                }
                let Some(descriptor) = device.toggles_modes.iter().find(|d| d.id == *mode) else {
                    let valid: Vec<String> =
                        device.toggles_modes.iter().map(|d| d.id.clone()).collect();
                    return Err(ValidationError::UnknownMode {
                        id: mode.clone(),
                        valid,
                    }
                    .into());
                };
                let valid: Vec<String> =
                    descriptor.settings.iter().map(|s| s.id.clone()).collect();
                if !valid.iter().any(|id| id == setting) {
                    return Err(ValidationError::UnknownModeSetting {
                        mode: mode.clone(),
                        id: setting.clone(),
                        valid,
                    }
                    .into());
                }
                with_map_state(device, StateName::CurrentModes, |map| {
                    map.insert(mode.clone(), serde_json::Value::String(setting.clone()));
                });
            }
            Self::Lock => device.set_state(StateName::IsLocked, true),
            Self::Unlock => device.set_state(StateName::IsLocked, false),
            Self::Dock => device.set_state(StateName::IsDocked, true),
        }
        Ok(())
    }

    /// The command and values that undo this operation once a duration
    /// elapses, for the commands that have a meaningful reversal.
    #[must_use]
    pub fn reversal(&self) -> Option<(Command, Vec<String>)> {
        match self {
            Self::On => Some((Command::Off, vec![])),
            Self::Off => Some((Command::On, vec![])),
            Self::ToggleOnOff => Some((Command::ToggleOnOff, vec![])),
            Self::SetLightEffect { .. } | Self::SetLightEffectWithDuration { .. } => Some((
                Command::SetMode,
                vec!["lightEffect".to_string(), String::new()],
            )),
            _ => None,
        }
    }
}

enum Conversion {
    Absolute,
    Delta,
}

/// Write to the setpoint entry, converting into its authoritative unit. A
/// device without a setpoint entry gets one with the incoming unit as
/// canonical.
fn write_setpoint(device: &mut Device, value: f64, unit: TempUnit, conversion: Conversion) {
    match device.state_mut(StateName::ThermostatTemperatureSetpoint) {
        Some(entry) => {
            let stored_unit = entry.unit.unwrap_or(TempUnit::F);
            let converted = match conversion {
                Conversion::Absolute => unit.convert_into(value, stored_unit),
                Conversion::Delta => {
                    let current = entry.value.as_f64().unwrap_or(0.0);
                    current + unit.delta_into(value, stored_unit)
                }
            };
            entry.value = StateValue::Float(converted);
        }
        None => device.device_state.push(DeviceState::with_unit(
            StateName::ThermostatTemperatureSetpoint,
            value,
            unit,
        )),
    }
}

fn adjust_volume(device: &mut Device, step: i64) {
    let current = device
        .state(StateName::CurrentVolume)
        .and_then(|entry| entry.value.as_i64())
        .unwrap_or(0);
    device.set_state(StateName::CurrentVolume, (current + step).clamp(0, 100));
}

/// Run `f` over the JSON-object state entry named `name`, creating or
/// resetting the entry to an empty object when it is missing or malformed.
fn with_map_state<T>(
    device: &mut Device,
    name: StateName,
    f: impl FnOnce(&mut serde_json::Map<String, serde_json::Value>) -> T,
) -> T {
    let mut map = match device.state(name).map(|entry| &entry.value) {
        Some(StateValue::Json(serde_json::Value::Object(map))) => map.clone(),
        _ => serde_json::Map::new(),
    };
    let out = f(&mut map);
    device.set_state(name, StateValue::Json(serde_json::Value::Object(map)));
    out
}

fn parse_float(raw: &str) -> Result<f64, ValidationError> {
    raw.parse::<f64>()
        .map_err(|_| ValidationError::FloatParse(raw.to_string()))
}

fn parse_int(raw: &str) -> Result<i64, ValidationError> {
    raw.parse::<i64>()
        .map_err(|_| ValidationError::IntParse(raw.to_string()))
}

fn parse_fan_speed(raw: &str) -> Result<i64, ValidationError> {
    match raw {
        "low" => Ok(33),
        "medium" => Ok(66),
        "high" => Ok(100),
        other => other
            .parse::<i64>()
            .map_err(|_| ValidationError::UnknownFanSpeed(other.to_string())),
    }
}

fn second_value<'a>(
    command: Command,
    values: &'a [String],
    first: &'static str,
    second: &'static str,
) -> Result<&'a str, InvalidInputError> {
    values
        .get(1)
        .map(String::as_str)
        .ok_or_else(|| InvalidInputError::RequiresTwoValues {
            command: command.to_string(),
            first,
            second,
        })
}
