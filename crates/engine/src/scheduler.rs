//! Schedule manager — listing, cancelling, and firing deferred actions.
//!
//! One canonical store, keyed by device id. The set a caller can see through
//! `view_schedules` is exactly the set `cancel_schedules` removes; there is
//! no second index to drift out of sync.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use homegraph_domain::command::Command;
use homegraph_domain::error::HomeGraphError;
use homegraph_domain::id::ScheduleId;
use homegraph_domain::schedule::{Delay, Schedule};
use homegraph_domain::time::Timestamp;

use crate::clock::Clock;
use crate::operation;
use crate::Engine;

/// Pending schedules, indexed by owning device id.
#[derive(Debug, Default)]
pub(crate) struct ScheduleBook {
    by_device: BTreeMap<String, Vec<Schedule>>,
}

impl ScheduleBook {
    pub(crate) fn insert(&mut self, schedule: Schedule) {
        self.by_device
            .entry(schedule.device_id.clone())
            .or_default()
            .push(schedule);
    }

    pub(crate) fn count_for(&self, device_id: &str) -> usize {
        self.by_device.get(device_id).map_or(0, Vec::len)
    }

    pub(crate) fn for_device(&self, device_id: &str) -> &[Schedule] {
        self.by_device.get(device_id).map_or(&[], Vec::as_slice)
    }

    /// Remove every schedule for the device, returning how many went away.
    pub(crate) fn cancel_for(&mut self, device_id: &str) -> usize {
        self.by_device.remove(device_id).map_or(0, |list| list.len())
    }

    /// Remove and return every schedule due at or before `now`, ordered by
    /// device id and, within a device, by recording order.
    pub(crate) fn take_due(&mut self, now: Timestamp) -> Vec<Schedule> {
        let mut due = Vec::new();
        for list in self.by_device.values_mut() {
            let mut remaining = Vec::with_capacity(list.len());
            for schedule in list.drain(..) {
                if schedule.due_at <= now {
                    due.push(schedule);
                } else {
                    remaining.push(schedule);
                }
            }
            *list = remaining;
        }
        self.by_device.retain(|_, list| !list.is_empty());
        due
    }

    pub(crate) fn clear(&mut self) {
        self.by_device.clear();
    }
}

/// Spoken-style summary returned by the schedule endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleSummary {
    pub tts: String,
}

/// One schedule that fired during `process_schedules`.
#[derive(Debug, Clone, Serialize)]
pub struct FiredAction {
    pub schedule_id: ScheduleId,
    pub device_id: String,
    pub command: Command,
}

impl<C: Clock> Engine<C> {
    /// Count the pending schedules across the requested devices.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`](homegraph_domain::error::NotFoundError) when
    /// any requested device id does not exist.
    pub fn view_schedules(&self, devices: &[String]) -> Result<ScheduleSummary, HomeGraphError> {
        for id in devices {
            self.world.device(id)?;
        }
        let count: usize = devices.iter().map(|id| self.schedules.count_for(id)).sum();
        Ok(ScheduleSummary {
            tts: format!("Found {count} schedules."),
        })
    }

    /// Remove every pending schedule for the requested devices. Idempotent:
    /// cancelling with none pending is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`](homegraph_domain::error::NotFoundError) when
    /// any requested device id does not exist.
    pub fn cancel_schedules(
        &mut self,
        devices: &[String],
    ) -> Result<ScheduleSummary, HomeGraphError> {
        for id in devices {
            self.world.device(id)?;
        }
        let count: usize = devices
            .iter()
            .map(|id| self.schedules.cancel_for(id))
            .sum();
        debug!(cancelled = count, "cancelled schedules");
        Ok(ScheduleSummary {
            tts: format!("Cancelled {count} schedules."),
        })
    }

    /// Fire every schedule that is due, per the engine clock.
    ///
    /// This is the external driver's entry point: the engine never watches
    /// the clock on its own. Fired schedules are removed whether or not they
    /// apply cleanly (a failed application is logged and skipped); a fired
    /// schedule carrying a duration enqueues its reversal relative to the
    /// original due time. Once fired, a schedule can no longer be cancelled.
    pub fn process_schedules(&mut self) -> Vec<FiredAction> {
        let now = self.clock.now();
        let due = self.schedules.take_due(now);
        let mut fired = Vec::with_capacity(due.len());

        for schedule in due {
            let operation = match operation::validate(schedule.command, &schedule.values) {
                Ok(operation) => operation,
                Err(error) => {
                    warn!(
                        schedule = %schedule.id,
                        device = %schedule.device_id,
                        %error,
                        "skipping schedule that no longer validates"
                    );
                    continue;
                }
            };
            let applied = self
                .world
                .device_mut(&schedule.device_id)
                .map_err(HomeGraphError::from)
                .and_then(|device| operation.apply(device));
            if let Err(error) = applied {
                warn!(
                    schedule = %schedule.id,
                    device = %schedule.device_id,
                    %error,
                    "skipping schedule that failed to apply"
                );
                continue;
            }

            let duration = schedule.duration.or_else(|| match &operation {
                crate::operation::Operation::SetLightEffectWithDuration { seconds, .. } => {
                    Some(Delay::seconds(*seconds))
                }
                _ => None,
            });
            if let Some(duration) = duration {
                if let Some((rev_command, rev_values)) = operation.reversal() {
                    self.schedules.insert(Schedule::new(
                        schedule.device_id.clone(),
                        rev_command,
                        rev_values,
                        schedule.due_at + duration.to_chrono(),
                        None,
                    ));
                }
            }

            debug!(
                schedule = %schedule.id,
                device = %schedule.device_id,
                op = %schedule.command,
                "fired schedule"
            );
            fired.push(FiredAction {
                schedule_id: schedule.id,
                device_id: schedule.device_id,
                command: schedule.command,
            });
        }
        fired
    }

    /// The pending schedules for one device, in recording order.
    #[must_use]
    pub fn schedules_for(&self, device_id: &str) -> &[Schedule] {
        self.schedules.for_device(device_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use homegraph_domain::state::StateName;
    use homegraph_domain::time;

    fn engine() -> (Engine<ManualClock>, ManualClock) {
        let clock = ManualClock::new(time::now());
        (Engine::with_default_world(clock.clone()), clock)
    }

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    fn light_is_on(engine: &Engine<ManualClock>) -> Option<bool> {
        engine
            .world()
            .device("light_001")
            .unwrap()
            .state(StateName::On)
            .and_then(|entry| entry.value.as_bool())
    }

    #[test]
    fn should_count_schedules_created_by_run() {
        let (mut engine, _clock) = engine();
        engine
            .run(&ids(&["light_001"]), "on", &[], Some("10m"), Some("5m"))
            .unwrap();

        let summary = engine.view_schedules(&ids(&["light_001"])).unwrap();
        assert_eq!(summary.tts, "Found 1 schedules.");
    }

    #[test]
    fn should_report_zero_after_cancelling() {
        let (mut engine, _clock) = engine();
        engine
            .run(&ids(&["light_001"]), "on", &[], Some("10m"), Some("5m"))
            .unwrap();

        let summary = engine.cancel_schedules(&ids(&["light_001"])).unwrap();
        assert_eq!(summary.tts, "Cancelled 1 schedules.");

        let summary = engine.view_schedules(&ids(&["light_001"])).unwrap();
        assert_eq!(summary.tts, "Found 0 schedules.");
    }

    #[test]
    fn should_cancel_idempotently_when_nothing_is_pending() {
        let (mut engine, _clock) = engine();
        let summary = engine.cancel_schedules(&ids(&["light_001"])).unwrap();
        assert_eq!(summary.tts, "Cancelled 0 schedules.");
    }

    #[test]
    fn should_reject_view_for_unknown_device() {
        let (engine, _clock) = engine();
        let err = engine.view_schedules(&ids(&["ghost_001"])).unwrap_err();
        assert_eq!(err.to_string(), "Device 'ghost_001' not found.");
    }

    #[test]
    fn should_sum_counts_across_devices() {
        let (mut engine, _clock) = engine();
        engine
            .run(&ids(&["light_001", "tv_001"]), "on", &[], Some("10m"), None)
            .unwrap();

        let summary = engine
            .view_schedules(&ids(&["light_001", "tv_001"]))
            .unwrap();
        assert_eq!(summary.tts, "Found 2 schedules.");
    }

    #[test]
    fn should_not_fire_before_due_time() {
        let (mut engine, clock) = engine();
        engine
            .run(&ids(&["light_001"]), "on", &[], Some("10m"), None)
            .unwrap();

        clock.advance(chrono::Duration::minutes(9));
        let fired = engine.process_schedules();
        assert!(fired.is_empty());
        assert_eq!(light_is_on(&engine), Some(false));
    }

    #[test]
    fn should_fire_and_remove_due_schedule() {
        let (mut engine, clock) = engine();
        engine
            .run(&ids(&["light_001"]), "on", &[], Some("10m"), None)
            .unwrap();

        clock.advance(chrono::Duration::minutes(10));
        let fired = engine.process_schedules();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].device_id, "light_001");
        assert_eq!(fired[0].command, Command::On);
        assert_eq!(light_is_on(&engine), Some(true));

        let summary = engine.view_schedules(&ids(&["light_001"])).unwrap();
        assert_eq!(summary.tts, "Found 0 schedules.");
    }

    #[test]
    fn should_enqueue_reversal_when_fired_schedule_has_duration() {
        let (mut engine, clock) = engine();
        engine
            .run(&ids(&["light_001"]), "on", &[], Some("10m"), Some("5m"))
            .unwrap();

        clock.advance(chrono::Duration::minutes(10));
        engine.process_schedules();
        assert_eq!(light_is_on(&engine), Some(true));

        // The reversal is pending, due 5 minutes after the primary fired.
        let summary = engine.view_schedules(&ids(&["light_001"])).unwrap();
        assert_eq!(summary.tts, "Found 1 schedules.");

        clock.advance(chrono::Duration::minutes(5));
        let fired = engine.process_schedules();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].command, Command::Off);
        assert_eq!(light_is_on(&engine), Some(false));

        let summary = engine.view_schedules(&ids(&["light_001"])).unwrap();
        assert_eq!(summary.tts, "Found 0 schedules.");
    }

    #[test]
    fn should_not_fire_cancelled_schedule() {
        let (mut engine, clock) = engine();
        engine
            .run(&ids(&["light_001"]), "on", &[], Some("10m"), None)
            .unwrap();
        engine.cancel_schedules(&ids(&["light_001"])).unwrap();

        clock.advance(chrono::Duration::hours(1));
        let fired = engine.process_schedules();
        assert!(fired.is_empty());
        assert_eq!(light_is_on(&engine), Some(false));
    }

    #[test]
    fn should_skip_schedule_for_removed_device() {
        let (mut engine, clock) = engine();
        engine
            .run(&ids(&["light_001"]), "on", &[], Some("10m"), None)
            .unwrap();
        engine.world_mut().remove_device("light_001").unwrap();

        clock.advance(chrono::Duration::minutes(10));
        let fired = engine.process_schedules();
        assert!(fired.is_empty());
    }

    #[test]
    fn should_revert_light_effect_after_its_duration() {
        let (mut engine, clock) = engine();
        engine
            .run(
                &ids(&["light_001"]),
                "set_light_effect_with_duration",
                &ids(&["pulse", "30"]),
                None,
                None,
            )
            .unwrap();

        clock.advance(chrono::Duration::seconds(30));
        let fired = engine.process_schedules();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].command, Command::SetMode);

        let device = engine.world().device("light_001").unwrap();
        let entry = device.state(StateName::CurrentModes).unwrap();
        let homegraph_domain::state::StateValue::Json(serde_json::Value::Object(map)) =
            &entry.value
        else {
            panic!("currentModes should be an object");
        };
        assert!(!map.contains_key("lightEffect"));
    }

    #[test]
    fn should_expose_raw_schedules_per_device() {
        let (mut engine, _clock) = engine();
        engine
            .run(&ids(&["light_001"]), "off", &[], Some("1h"), None)
            .unwrap();

        let schedules = engine.schedules_for("light_001");
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].command, Command::Off);
        assert!(engine.schedules_for("tv_001").is_empty());
    }
}
