//! Command names — the operations callers can request on a device.
//!
//! A [`Command`] is just the parsed operation *name*; argument parsing and
//! range checks live in the engine's validation layer, which turns a command
//! plus raw values into a typed operation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;

/// An operation name, as supplied by callers (`"on"`, `"set_brightness"`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    On,
    Off,
    ToggleOnOff,
    Open,
    Close,
    OpenPercentAbsolute,
    Start,
    Stop,
    Pause,
    Unpause,
    SetInput,
    SetBrightness,
    SetFanSpeed,
    SetTemperature,
    SetTemperatureCelsius,
    SetTemperatureFahrenheit,
    ChangeRelativeTemperature,
    ToggleSetting,
    FindDevice,
    SilenceRinging,
    Broadcast,
    SetLightEffect,
    SetLightEffectWithDuration,
    VolumeUp,
    VolumeDown,
    SetVolumeLevel,
    Mute,
    Unmute,
    SetMode,
    Lock,
    Unlock,
    Dock,
}

impl Command {
    /// The wire name of the command (`"toggle_on_off"`, `"set_input"`, …).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::ToggleOnOff => "toggle_on_off",
            Self::Open => "open",
            Self::Close => "close",
            Self::OpenPercentAbsolute => "open_percent_absolute",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Pause => "pause",
            Self::Unpause => "unpause",
            Self::SetInput => "set_input",
            Self::SetBrightness => "set_brightness",
            Self::SetFanSpeed => "set_fan_speed",
            Self::SetTemperature => "set_temperature",
            Self::SetTemperatureCelsius => "set_temperature_celsius",
            Self::SetTemperatureFahrenheit => "set_temperature_fahrenheit",
            Self::ChangeRelativeTemperature => "change_relative_temperature",
            Self::ToggleSetting => "toggle_setting",
            Self::FindDevice => "find_device",
            Self::SilenceRinging => "silence_ringing",
            Self::Broadcast => "broadcast",
            Self::SetLightEffect => "set_light_effect",
            Self::SetLightEffectWithDuration => "set_light_effect_with_duration",
            Self::VolumeUp => "volume_up",
            Self::VolumeDown => "volume_down",
            Self::SetVolumeLevel => "set_volume_level",
            Self::Mute => "mute",
            Self::Unmute => "unmute",
            Self::SetMode => "set_mode",
            Self::Lock => "lock",
            Self::Unlock => "unlock",
            Self::Dock => "dock",
        }
    }

    /// Whether this command takes values. Commands that do reject an empty
    /// values list; commands that don't reject any supplied value.
    #[must_use]
    pub fn takes_values(self) -> bool {
        !matches!(
            self,
            Self::On
                | Self::Off
                | Self::ToggleOnOff
                | Self::Open
                | Self::Close
                | Self::Start
                | Self::Stop
                | Self::Pause
                | Self::Unpause
                | Self::FindDevice
                | Self::SilenceRinging
                | Self::Mute
                | Self::Unmute
                | Self::Lock
                | Self::Unlock
                | Self::Dock
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "toggle_on_off" => Ok(Self::ToggleOnOff),
            "open" => Ok(Self::Open),
            "close" => Ok(Self::Close),
            "open_percent_absolute" => Ok(Self::OpenPercentAbsolute),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "pause" => Ok(Self::Pause),
            "unpause" => Ok(Self::Unpause),
            "set_input" => Ok(Self::SetInput),
            "set_brightness" => Ok(Self::SetBrightness),
            "set_fan_speed" => Ok(Self::SetFanSpeed),
            "set_temperature" => Ok(Self::SetTemperature),
            "set_temperature_celsius" => Ok(Self::SetTemperatureCelsius),
            "set_temperature_fahrenheit" => Ok(Self::SetTemperatureFahrenheit),
            "change_relative_temperature" => Ok(Self::ChangeRelativeTemperature),
            "toggle_setting" => Ok(Self::ToggleSetting),
            "find_device" => Ok(Self::FindDevice),
            "silence_ringing" => Ok(Self::SilenceRinging),
            "broadcast" => Ok(Self::Broadcast),
            "set_light_effect" => Ok(Self::SetLightEffect),
            "set_light_effect_with_duration" => Ok(Self::SetLightEffectWithDuration),
            "volume_up" => Ok(Self::VolumeUp),
            "volume_down" => Ok(Self::VolumeDown),
            "set_volume_level" => Ok(Self::SetVolumeLevel),
            "mute" => Ok(Self::Mute),
            "unmute" => Ok(Self::Unmute),
            "set_mode" => Ok(Self::SetMode),
            "lock" => Ok(Self::Lock),
            "unlock" => Ok(Self::Unlock),
            "dock" => Ok(Self::Dock),
            other => Err(InvalidInputError::UnknownCommand(other.to_string())),
        }
    }
}
