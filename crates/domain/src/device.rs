//! Device — a capability-bearing thing living in exactly one room.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HomeGraphError, ValidationError};
use crate::state::{DeviceState, StateName, StateValue};
use crate::traits::Trait;

/// Device type tag, used to group devices within a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceType {
    Thermostat,
    Light,
    Outlet,
    Tv,
    AcUnit,
    Speaker,
    Vacuum,
    Blinds,
    Camera,
    Door,
    Garage,
    Lock,
    Switch,
    Fan,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Thermostat => "THERMOSTAT",
            Self::Light => "LIGHT",
            Self::Outlet => "OUTLET",
            Self::Tv => "TV",
            Self::AcUnit => "AC_UNIT",
            Self::Speaker => "SPEAKER",
            Self::Vacuum => "VACUUM",
            Self::Blinds => "BLINDS",
            Self::Camera => "CAMERA",
            Self::Door => "DOOR",
            Self::Garage => "GARAGE",
            Self::Lock => "LOCK",
            Self::Switch => "SWITCH",
            Self::Fan => "FAN",
        };
        f.write_str(name)
    }
}

/// One setting a toggle/mode descriptor allows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSetting {
    pub id: String,
    pub names: Vec<String>,
}

/// Descriptor for a named toggle or mode a device exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleMode {
    pub id: String,
    pub names: Vec<String>,
    #[serde(default)]
    pub settings: Vec<ModeSetting>,
}

/// A smart device: id, human-readable names, type tags, capability set,
/// toggle/mode descriptors, and an ordered list of state entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub names: Vec<String>,
    pub types: Vec<DeviceType>,
    pub traits: BTreeSet<Trait>,
    pub room_name: String,
    pub structure: String,
    #[serde(default)]
    pub toggles_modes: Vec<ToggleMode>,
    #[serde(default)]
    pub device_state: Vec<DeviceState>,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Whether the device exposes the given trait.
    #[must_use]
    pub fn supports(&self, capability: Trait) -> bool {
        self.traits.contains(&capability)
    }

    /// Look up a state entry by name.
    #[must_use]
    pub fn state(&self, name: StateName) -> Option<&DeviceState> {
        self.device_state.iter().find(|entry| entry.name == name)
    }

    /// Mutable lookup of a state entry by name.
    pub fn state_mut(&mut self, name: StateName) -> Option<&mut DeviceState> {
        self.device_state.iter_mut().find(|entry| entry.name == name)
    }

    /// Write a state value, updating the existing entry in place (its unit is
    /// preserved) or appending a new one.
    pub fn set_state(&mut self, name: StateName, value: impl Into<StateValue>) {
        let value = value.into();
        if let Some(entry) = self.state_mut(name) {
            entry.value = value;
        } else {
            self.device_state.push(DeviceState::new(name, value));
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HomeGraphError::Validation`] when:
    /// - `id` is empty ([`ValidationError::EmptyDeviceId`])
    /// - `names` is empty ([`ValidationError::EmptyDeviceNames`])
    /// - `types` is empty ([`ValidationError::EmptyDeviceTypes`])
    /// - two state entries share a name ([`ValidationError::DuplicateStateName`])
    pub fn validate(&self) -> Result<(), HomeGraphError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyDeviceId.into());
        }
        if self.names.is_empty() {
            return Err(ValidationError::EmptyDeviceNames.into());
        }
        if self.types.is_empty() {
            return Err(ValidationError::EmptyDeviceTypes.into());
        }
        let mut seen = BTreeSet::new();
        for entry in &self.device_state {
            if !seen.insert(entry.name.as_str()) {
                return Err(ValidationError::DuplicateStateName(entry.name.to_string()).into());
            }
        }
        Ok(())
    }

    /// The type tag the device is grouped under in its room.
    #[must_use]
    pub fn primary_type(&self) -> DeviceType {
        self.types.first().copied().unwrap_or(DeviceType::Switch)
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<String>,
    names: Vec<String>,
    types: Vec<DeviceType>,
    traits: BTreeSet<Trait>,
    room_name: Option<String>,
    structure: Option<String>,
    toggles_modes: Vec<ToggleMode>,
    device_state: Vec<DeviceState>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    #[must_use]
    pub fn device_type(mut self, device_type: DeviceType) -> Self {
        self.types.push(device_type);
        self
    }

    #[must_use]
    pub fn supporting(mut self, capability: Trait) -> Self {
        self.traits.insert(capability);
        self
    }

    #[must_use]
    pub fn room(mut self, room_name: impl Into<String>) -> Self {
        self.room_name = Some(room_name.into());
        self
    }

    #[must_use]
    pub fn structure(mut self, structure: impl Into<String>) -> Self {
        self.structure = Some(structure.into());
        self
    }

    #[must_use]
    pub fn toggle_mode(mut self, descriptor: ToggleMode) -> Self {
        self.toggles_modes.push(descriptor);
        self
    }

    #[must_use]
    pub fn state(mut self, entry: DeviceState) -> Self {
        self.device_state.push(entry);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`HomeGraphError::Validation`] if required fields are missing
    /// or state entries collide.
    pub fn build(self) -> Result<Device, HomeGraphError> {
        let device = Device {
            id: self.id.unwrap_or_default(),
            names: self.names,
            types: self.types,
            traits: self.traits,
            room_name: self.room_name.unwrap_or_default(),
            structure: self.structure.unwrap_or_default(),
            toggles_modes: self.toggles_modes,
            device_state: self.device_state,
        };
        device.validate()?;
        Ok(device)
    }
}
