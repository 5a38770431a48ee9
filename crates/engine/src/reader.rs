//! State reader — the `details` entry point.
//!
//! Read-only: state entries come back verbatim, except temperature entries
//! which are enriched with both unit conversions. Pending schedules are
//! rendered into the snapshot from the schedule book.

use serde::Serialize;

use homegraph_domain::error::HomeGraphError;
use homegraph_domain::state::{DeviceState, StateName, StateValue};
use homegraph_domain::temperature::{round2, TempUnit};

use crate::clock::Clock;
use crate::Engine;

/// Device state snapshots, serialized as a JSON string mapping device id to
/// its list of state views.
#[derive(Debug, Clone, Serialize)]
pub struct DetailsResult {
    pub devices_info: String,
}

/// One state entry as exposed to callers.
#[derive(Debug, Clone, Serialize)]
struct StateView {
    name: StateName,
    value: StateValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<TempUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_metric: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_imperial: Option<f64>,
}

impl StateView {
    fn from_entry(entry: &DeviceState) -> Self {
        let enrichment = entry
            .name
            .is_temperature()
            .then(|| entry.value.as_f64())
            .flatten()
            .map(|value| {
                let unit = entry.unit.unwrap_or(TempUnit::F);
                (
                    unit,
                    round2(unit.convert_into(value, TempUnit::C)),
                    round2(unit.convert_into(value, TempUnit::F)),
                )
            });

        match enrichment {
            Some((unit, metric, imperial)) => Self {
                name: entry.name,
                value: entry.value.clone(),
                unit: Some(unit),
                value_metric: Some(metric),
                value_imperial: Some(imperial),
            },
            None => Self {
                name: entry.name,
                value: entry.value.clone(),
                unit: entry.unit,
                value_metric: None,
                value_imperial: None,
            },
        }
    }
}

impl<C: Clock> Engine<C> {
    /// Produce an enriched, read-only snapshot for the requested devices.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`](homegraph_domain::error::NotFoundError) when
    /// any requested device id does not exist — unknown ids are never
    /// silently omitted — or a serialization error for the response payload.
    pub fn details(&self, devices: &[String]) -> Result<DetailsResult, HomeGraphError> {
        let mut info = serde_json::Map::new();
        for id in devices {
            let device = self.world.device(id)?;
            let mut views: Vec<StateView> = device
                .device_state
                .iter()
                .map(StateView::from_entry)
                .collect();

            let pending = self.schedules.for_device(id);
            if !pending.is_empty() {
                views.push(StateView {
                    name: StateName::Schedules,
                    value: StateValue::Json(serde_json::to_value(pending)?),
                    unit: None,
                    value_metric: None,
                    value_imperial: None,
                });
            }

            info.insert(id.clone(), serde_json::to_value(views)?);
        }
        Ok(DetailsResult {
            devices_info: serde_json::to_string(&info)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use homegraph_domain::time;

    fn engine() -> Engine<ManualClock> {
        Engine::with_default_world(ManualClock::new(time::now()))
    }

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    fn info_for<'a>(
        parsed: &'a serde_json::Value,
        device_id: &str,
    ) -> &'a Vec<serde_json::Value> {
        parsed[device_id]
            .as_array()
            .expect("device entry should be a list of state views")
    }

    fn view<'a>(views: &'a [serde_json::Value], name: &str) -> &'a serde_json::Value {
        views
            .iter()
            .find(|view| view["name"] == name)
            .unwrap_or_else(|| panic!("missing state view '{name}'"))
    }

    #[test]
    fn should_return_state_entries_verbatim() {
        let engine = engine();
        let result = engine.details(&ids(&["light_001"])).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result.devices_info).unwrap();

        let views = info_for(&parsed, "light_001");
        assert_eq!(view(views, "on")["value"], serde_json::json!(false));
        assert_eq!(view(views, "brightness")["value"], serde_json::json!(0.5));
    }

    #[test]
    fn should_enrich_temperature_entries_with_both_units() {
        let engine = engine();
        let result = engine.details(&ids(&["thermostat_001"])).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result.devices_info).unwrap();

        let views = info_for(&parsed, "thermostat_001");
        let setpoint = view(views, "thermostatTemperatureSetpoint");
        assert_eq!(setpoint["unit"], serde_json::json!("F"));
        assert_eq!(setpoint["value"], serde_json::json!(70.0));
        assert_eq!(setpoint["value_imperial"], serde_json::json!(70.0));
        assert_eq!(setpoint["value_metric"], serde_json::json!(21.11));

        let ambient = view(views, "thermostatTemperatureAmbient");
        assert!(ambient.get("value_metric").is_some());
        assert!(ambient.get("value_imperial").is_some());
    }

    #[test]
    fn should_round_enriched_values_to_two_decimals() {
        let mut engine = engine();
        engine
            .run(
                &ids(&["thermostat_001"]),
                "set_temperature",
                &ids(&["20.0", "C"]),
                None,
                None,
            )
            .unwrap();
        // 20 C → 68 F stored; +1 F → 69 F; metric = (69-32)*5/9 = 20.56
        engine
            .run(
                &ids(&["thermostat_001"]),
                "change_relative_temperature",
                &ids(&["1", "F"]),
                None,
                None,
            )
            .unwrap();

        let result = engine.details(&ids(&["thermostat_001"])).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result.devices_info).unwrap();
        let views = info_for(&parsed, "thermostat_001");
        let setpoint = view(views, "thermostatTemperatureSetpoint");
        assert_eq!(setpoint["value"], serde_json::json!(69.0));
        assert_eq!(setpoint["unit"], serde_json::json!("F"));
        assert_eq!(setpoint["value_metric"], serde_json::json!(20.56));
        assert_eq!(setpoint["value_imperial"], serde_json::json!(69.0));
    }

    #[test]
    fn should_not_enrich_non_temperature_entries() {
        let engine = engine();
        let result = engine.details(&ids(&["light_001"])).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result.devices_info).unwrap();

        let views = info_for(&parsed, "light_001");
        let brightness = view(views, "brightness");
        assert!(brightness.get("value_metric").is_none());
        assert!(brightness.get("unit").is_none());
    }

    #[test]
    fn should_fail_on_unknown_device_instead_of_omitting_it() {
        let engine = engine();
        let err = engine
            .details(&ids(&["light_001", "ghost_001"]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Device 'ghost_001' not found.");
    }

    #[test]
    fn should_reflect_brightness_written_through_run() {
        let mut engine = engine();
        engine
            .run(
                &ids(&["light_001"]),
                "set_brightness",
                &ids(&["0.75"]),
                None,
                None,
            )
            .unwrap();

        let result = engine.details(&ids(&["light_001"])).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result.devices_info).unwrap();
        let views = info_for(&parsed, "light_001");
        assert_eq!(view(views, "brightness")["value"], serde_json::json!(0.75));
    }

    #[test]
    fn should_render_pending_schedules_into_snapshot() {
        let mut engine = engine();
        engine
            .run(&ids(&["light_001"]), "on", &[], Some("10m"), None)
            .unwrap();

        let result = engine.details(&ids(&["light_001"])).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result.devices_info).unwrap();
        let views = info_for(&parsed, "light_001");
        let schedules = view(views, "schedules");
        assert_eq!(schedules["value"].as_array().map(Vec::len), Some(1));
        assert_eq!(schedules["value"][0]["command"], serde_json::json!("on"));
    }

    #[test]
    fn should_not_mutate_state_when_reading() {
        let engine = engine();
        let before = engine
            .world()
            .device("thermostat_001")
            .unwrap()
            .device_state
            .clone();
        engine.details(&ids(&["thermostat_001"])).unwrap();
        let after = &engine.world().device("thermostat_001").unwrap().device_state;
        assert_eq!(*after, before);
    }
}
