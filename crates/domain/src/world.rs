//! World model — the structure → room → device tree, exclusively owned.
//!
//! Replaces ambient global state with an explicit instance handed to the
//! engine; a flat index keyed by device id keeps lookup O(log n) without
//! walking the tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::device::{Device, DeviceType};
use crate::error::{HomeGraphError, NotFoundError, ValidationError};

/// A named container of devices, grouped by type tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    #[serde(default)]
    pub devices: BTreeMap<DeviceType, Vec<Device>>,
}

impl Room {
    /// Create an empty room.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            devices: BTreeMap::new(),
        }
    }
}

/// A top-level "home" containing rooms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub name: String,
    #[serde(default)]
    pub rooms: BTreeMap<String, Room>,
}

impl Structure {
    /// Create an empty structure.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rooms: BTreeMap::new(),
        }
    }
}

/// Where a device lives inside the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DeviceLocation {
    structure: String,
    room: String,
    device_type: DeviceType,
}

/// The structure/room/device hierarchy plus a flat device index.
#[derive(Debug, Clone, Default)]
pub struct WorldModel {
    structures: BTreeMap<String, Structure>,
    index: BTreeMap<String, DeviceLocation>,
}

impl WorldModel {
    /// Create an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All structures, keyed by name.
    #[must_use]
    pub fn structures(&self) -> &BTreeMap<String, Structure> {
        &self.structures
    }

    /// Add an empty structure.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateStructure`] when the name is taken.
    pub fn add_structure(&mut self, name: impl Into<String>) -> Result<(), HomeGraphError> {
        let name = name.into();
        if self.structures.contains_key(&name) {
            return Err(ValidationError::DuplicateStructure(name).into());
        }
        self.structures.insert(name.clone(), Structure::new(name));
        Ok(())
    }

    /// Add an empty room to an existing structure.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::Structure`] when the structure is missing, or
    /// [`ValidationError::DuplicateRoom`] when the room name is taken.
    pub fn add_room(
        &mut self,
        structure: &str,
        room: impl Into<String>,
    ) -> Result<(), HomeGraphError> {
        let room = room.into();
        let parent = self
            .structures
            .get_mut(structure)
            .ok_or_else(|| NotFoundError::Structure(structure.to_string()))?;
        if parent.rooms.contains_key(&room) {
            return Err(ValidationError::DuplicateRoom {
                structure: structure.to_string(),
                room,
            }
            .into());
        }
        parent.rooms.insert(room.clone(), Room::new(room));
        Ok(())
    }

    /// Provision a device into the room named by its `structure`/`room_name`
    /// fields, grouped under its primary type tag.
    ///
    /// # Errors
    ///
    /// Returns a validation error from [`Device::validate`], a
    /// [`ValidationError::DuplicateDeviceId`] for an id already in use, or a
    /// [`NotFoundError`] when the target structure/room does not exist.
    pub fn add_device(&mut self, device: Device) -> Result<(), HomeGraphError> {
        device.validate()?;
        if self.index.contains_key(&device.id) {
            return Err(ValidationError::DuplicateDeviceId(device.id).into());
        }
        let structure = self
            .structures
            .get_mut(&device.structure)
            .ok_or_else(|| NotFoundError::Structure(device.structure.clone()))?;
        let room = structure
            .rooms
            .get_mut(&device.room_name)
            .ok_or_else(|| NotFoundError::Room {
                structure: device.structure.clone(),
                room: device.room_name.clone(),
            })?;

        let location = DeviceLocation {
            structure: device.structure.clone(),
            room: device.room_name.clone(),
            device_type: device.primary_type(),
        };
        self.index.insert(device.id.clone(), location);
        room.devices
            .entry(device.primary_type())
            .or_default()
            .push(device);
        Ok(())
    }

    /// Remove a device from the world, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::Device`] when the id is unknown.
    pub fn remove_device(&mut self, id: &str) -> Result<Device, HomeGraphError> {
        let location = self
            .index
            .remove(id)
            .ok_or_else(|| NotFoundError::Device(id.to_string()))?;
        let list = self
            .structures
            .get_mut(&location.structure)
            .and_then(|s| s.rooms.get_mut(&location.room))
            .and_then(|r| r.devices.get_mut(&location.device_type))
            .ok_or_else(|| NotFoundError::Device(id.to_string()))?;
        let position = list
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| NotFoundError::Device(id.to_string()))?;
        Ok(list.remove(position))
    }

    /// Whether a device with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::Device`] when the id is unknown.
    pub fn device(&self, id: &str) -> Result<&Device, NotFoundError> {
        let location = self
            .index
            .get(id)
            .ok_or_else(|| NotFoundError::Device(id.to_string()))?;
        self.structures
            .get(&location.structure)
            .and_then(|s| s.rooms.get(&location.room))
            .and_then(|r| r.devices.get(&location.device_type))
            .and_then(|list| list.iter().find(|d| d.id == id))
            .ok_or_else(|| NotFoundError::Device(id.to_string()))
    }

    /// Mutable lookup of a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::Device`] when the id is unknown.
    pub fn device_mut(&mut self, id: &str) -> Result<&mut Device, NotFoundError> {
        let location = self
            .index
            .get(id)
            .cloned()
            .ok_or_else(|| NotFoundError::Device(id.to_string()))?;
        self.structures
            .get_mut(&location.structure)
            .and_then(|s| s.rooms.get_mut(&location.room))
            .and_then(|r| r.devices.get_mut(&location.device_type))
            .and_then(|list| list.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| NotFoundError::Device(id.to_string()))
    }

    /// Iterate every device across all structures and rooms.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.structures
            .values()
            .flat_map(|s| s.rooms.values())
            .flat_map(|r| r.devices.values())
            .flatten()
    }

    /// Number of provisioned devices.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.index.len()
    }

    /// Drop every structure, room, and device.
    pub fn clear(&mut self) {
        self.structures.clear();
        self.index.clear();
    }
}
