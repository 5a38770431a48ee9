//! Device traits — the named capabilities a device exposes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A capability a device exposes, determining which commands are valid for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Trait {
    OnOff,
    OpenClose,
    StartStop,
    TransportControl,
    InputSelector,
    Brightness,
    FanSpeed,
    TemperatureSetting,
    Toggles,
    Locator,
    Broadcast,
    LightEffects,
    Volume,
    Modes,
    LockUnlock,
    Dock,
}

impl Trait {
    /// The wire name of the trait (`"OnOff"`, `"LockUnlock"`, …).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OnOff => "OnOff",
            Self::OpenClose => "OpenClose",
            Self::StartStop => "StartStop",
            Self::TransportControl => "TransportControl",
            Self::InputSelector => "InputSelector",
            Self::Brightness => "Brightness",
            Self::FanSpeed => "FanSpeed",
            Self::TemperatureSetting => "TemperatureSetting",
            Self::Toggles => "Toggles",
            Self::Locator => "Locator",
            Self::Broadcast => "Broadcast",
            Self::LightEffects => "LightEffects",
            Self::Volume => "Volume",
            Self::Modes => "Modes",
            Self::LockUnlock => "LockUnlock",
            Self::Dock => "Dock",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
