//! Default demo world — one structure, three rooms, eight devices covering
//! every trait the registry knows about.
//!
//! The surrounding store owns the real provisioning lifecycle; this seed
//! exists so the daemon and tests have a populated world out of the box.

use homegraph_domain::device::{Device, DeviceType, ModeSetting, ToggleMode};
use homegraph_domain::state::{DeviceState, StateName, StateValue};
use homegraph_domain::temperature::TempUnit;
use homegraph_domain::traits::Trait;
use homegraph_domain::world::WorldModel;

const STRUCTURE: &str = "house";

/// Build the default world.
#[must_use]
pub fn default_world() -> WorldModel {
    let mut world = WorldModel::new();
    // The seed data is static and goes through the same validation as any
    // other provisioning; a failure here is a bug in the seed itself.
    if let Err(error) = populate(&mut world) {
        tracing::error!(%error, "failed to seed default world");
    }
    world
}

fn populate(world: &mut WorldModel) -> Result<(), homegraph_domain::error::HomeGraphError> {
    world.add_structure(STRUCTURE)?;
    for room in ["Living Room", "Bedroom", "Kitchen"] {
        world.add_room(STRUCTURE, room)?;
    }

    world.add_device(
        Device::builder()
            .id("light_001")
            .name("Living Room Light")
            .device_type(DeviceType::Light)
            .supporting(Trait::OnOff)
            .supporting(Trait::Brightness)
            .supporting(Trait::LightEffects)
            .supporting(Trait::Modes)
            .room("Living Room")
            .structure(STRUCTURE)
            .toggle_mode(light_effect_descriptor())
            .state(DeviceState::new(StateName::On, false))
            .state(DeviceState::new(StateName::Brightness, 0.5))
            .state(DeviceState::new(StateName::CurrentModes, empty_map()))
            .build()?,
    )?;

    world.add_device(
        Device::builder()
            .id("tv_001")
            .name("Living Room TV")
            .device_type(DeviceType::Tv)
            .supporting(Trait::OnOff)
            .supporting(Trait::InputSelector)
            .supporting(Trait::Volume)
            .supporting(Trait::TransportControl)
            .room("Living Room")
            .structure(STRUCTURE)
            .state(DeviceState::new(StateName::On, false))
            .state(DeviceState::new(StateName::CurrentInput, "HDMI 1"))
            .state(DeviceState::new(StateName::CurrentVolume, 25_i64))
            .state(DeviceState::new(StateName::IsMuted, false))
            .state(DeviceState::new(StateName::IsPaused, false))
            .state(DeviceState::new(StateName::IsStopped, true))
            .build()?,
    )?;

    world.add_device(
        Device::builder()
            .id("speaker_001")
            .name("Living Room Speaker")
            .device_type(DeviceType::Speaker)
            .supporting(Trait::OnOff)
            .supporting(Trait::Volume)
            .supporting(Trait::Broadcast)
            .supporting(Trait::Locator)
            .room("Living Room")
            .structure(STRUCTURE)
            .state(DeviceState::new(StateName::On, true))
            .state(DeviceState::new(StateName::CurrentVolume, 40_i64))
            .state(DeviceState::new(StateName::IsMuted, false))
            .state(DeviceState::new(StateName::IsRinging, false))
            .build()?,
    )?;

    world.add_device(
        Device::builder()
            .id("thermostat_001")
            .name("Bedroom Thermostat")
            .device_type(DeviceType::Thermostat)
            .supporting(Trait::TemperatureSetting)
            .supporting(Trait::Modes)
            .room("Bedroom")
            .structure(STRUCTURE)
            .toggle_mode(ToggleMode {
                id: "thermostatMode".to_string(),
                names: vec!["Thermostat Mode".to_string()],
                settings: vec![
                    ModeSetting {
                        id: "off".to_string(),
                        names: vec!["Off".to_string()],
                    },
                    ModeSetting {
                        id: "heat".to_string(),
                        names: vec!["Heat".to_string()],
                    },
                    ModeSetting {
                        id: "cool".to_string(),
                        names: vec!["Cool".to_string()],
                    },
                ],
            })
            .state(DeviceState::with_unit(
                StateName::ThermostatTemperatureSetpoint,
                70.0,
                TempUnit::F,
            ))
            .state(DeviceState::with_unit(
                StateName::ThermostatTemperatureAmbient,
                68.0,
                TempUnit::F,
            ))
            .state(DeviceState::new(StateName::ThermostatMode, "heat"))
            .state(DeviceState::new(StateName::CurrentModes, heat_mode()))
            .build()?,
    )?;

    world.add_device(
        Device::builder()
            .id("blinds_001")
            .name("Bedroom Blinds")
            .device_type(DeviceType::Blinds)
            .supporting(Trait::OpenClose)
            .room("Bedroom")
            .structure(STRUCTURE)
            .state(DeviceState::new(StateName::OpenPercent, 0.0))
            .build()?,
    )?;

    world.add_device(
        Device::builder()
            .id("fan_001")
            .name("Bedroom Fan")
            .device_type(DeviceType::Fan)
            .supporting(Trait::OnOff)
            .supporting(Trait::FanSpeed)
            .room("Bedroom")
            .structure(STRUCTURE)
            .state(DeviceState::new(StateName::On, false))
            .state(DeviceState::new(StateName::FanSpeed, 33_i64))
            .build()?,
    )?;

    world.add_device(
        Device::builder()
            .id("lock_001")
            .name("Kitchen Door Lock")
            .device_type(DeviceType::Lock)
            .supporting(Trait::LockUnlock)
            .room("Kitchen")
            .structure(STRUCTURE)
            .state(DeviceState::new(StateName::IsLocked, true))
            .build()?,
    )?;

    world.add_device(
        Device::builder()
            .id("vacuum_001")
            .name("Kitchen Vacuum")
            .device_type(DeviceType::Vacuum)
            .supporting(Trait::OnOff)
            .supporting(Trait::StartStop)
            .supporting(Trait::Dock)
            .supporting(Trait::Locator)
            .supporting(Trait::Toggles)
            .room("Kitchen")
            .structure(STRUCTURE)
            .toggle_mode(ToggleMode {
                id: "turbo".to_string(),
                names: vec!["Turbo".to_string()],
                settings: vec![],
            })
            .state(DeviceState::new(StateName::On, false))
            .state(DeviceState::new(StateName::IsStopped, true))
            .state(DeviceState::new(StateName::IsPaused, false))
            .state(DeviceState::new(StateName::IsDocked, true))
            .state(DeviceState::new(StateName::IsRinging, false))
            .state(DeviceState::new(StateName::ActiveToggles, turbo_off()))
            .build()?,
    )?;

    Ok(())
}

fn light_effect_descriptor() -> ToggleMode {
    ToggleMode {
        id: "lightEffect".to_string(),
        names: vec!["Light Effect".to_string()],
        settings: ["sleep", "wake", "colorLoop", "pulse"]
            .into_iter()
            .map(|id| ModeSetting {
                id: id.to_string(),
                names: vec![id.to_string()],
            })
            .collect(),
    }
}

fn empty_map() -> StateValue {
    StateValue::Json(serde_json::Value::Object(serde_json::Map::new()))
}

fn heat_mode() -> StateValue {
    StateValue::Json(serde_json::json!({ "thermostatMode": "heat" }))
}

fn turbo_off() -> StateValue {
    StateValue::Json(serde_json::json!({ "turbo": false }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_seed_eight_devices_across_three_rooms() {
        let world = default_world();
        assert_eq!(world.device_count(), 8);
        let house = world.structures().get("house").unwrap();
        assert_eq!(house.rooms.len(), 3);
    }

    #[test]
    fn should_cover_every_trait_at_least_once() {
        let world = default_world();
        let covered: std::collections::BTreeSet<Trait> = world
            .devices()
            .flat_map(|device| device.traits.iter().copied())
            .collect();
        for capability in [
            Trait::OnOff,
            Trait::OpenClose,
            Trait::StartStop,
            Trait::TransportControl,
            Trait::InputSelector,
            Trait::Brightness,
            Trait::FanSpeed,
            Trait::TemperatureSetting,
            Trait::Toggles,
            Trait::Locator,
            Trait::Broadcast,
            Trait::LightEffects,
            Trait::Volume,
            Trait::Modes,
            Trait::LockUnlock,
            Trait::Dock,
        ] {
            assert!(covered.contains(&capability), "missing {capability}");
        }
    }

    #[test]
    fn should_give_thermostat_a_fahrenheit_setpoint() {
        let world = default_world();
        let device = world.device("thermostat_001").unwrap();
        let entry = device
            .state(StateName::ThermostatTemperatureSetpoint)
            .unwrap();
        assert_eq!(entry.unit, Some(TempUnit::F));
        assert_eq!(entry.value.as_f64(), Some(70.0));
    }

    #[test]
    fn should_validate_every_seeded_device() {
        let world = default_world();
        for device in world.devices() {
            device.validate().unwrap();
        }
    }
}
