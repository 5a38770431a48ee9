//! Command dispatcher — the `run` entry point.
//!
//! Resolution, support checks, and validation all happen before any state is
//! touched; mutations are staged on copies and committed in one pass, so a
//! failing device never leaves another half-applied.

use serde::Serialize;
use tracing::debug;

use homegraph_domain::command::Command;
use homegraph_domain::error::{HomeGraphError, InvalidInputError, UnsupportedCommandError};
use homegraph_domain::id::CardId;
use homegraph_domain::schedule::{Delay, Schedule};
use homegraph_domain::state::DeviceState;

use crate::clock::Clock;
use crate::operation::{self, Operation};
use crate::registry;
use crate::Engine;

/// Result of a mutating operation: a human-readable summary plus a reference
/// id for the action.
#[derive(Debug, Clone, Serialize)]
pub struct ActionSummary {
    pub result: String,
    pub card_id: CardId,
}

impl<C: Clock> Engine<C> {
    /// Run an operation against one or more devices.
    ///
    /// With no `delay` the mutation applies immediately; with a `delay` a
    /// schedule is recorded instead. A `duration` additionally records (or,
    /// for delayed actions, implies) a reversal once the effect has run its
    /// course.
    ///
    /// # Errors
    ///
    /// Fails fast, before any mutation, with:
    /// - [`InvalidInputError`] for an empty device list, unknown operation
    ///   names, malformed delay/duration tokens, or arity violations
    /// - [`NotFoundError`](homegraph_domain::error::NotFoundError) for an
    ///   unknown device id
    /// - [`UnsupportedCommandError`] when a target's traits do not cover the
    ///   operation
    /// - [`ValidationError`](homegraph_domain::error::ValidationError) for
    ///   operation-specific value violations
    pub fn run(
        &mut self,
        devices: &[String],
        op: &str,
        values: &[String],
        delay: Option<&str>,
        duration: Option<&str>,
    ) -> Result<ActionSummary, HomeGraphError> {
        if devices.is_empty() {
            return Err(InvalidInputError::NoDevices.into());
        }
        let command: Command = op.parse()?;
        let delay: Option<Delay> = delay.map(str::parse).transpose()?;
        let duration: Option<Delay> = duration.map(str::parse).transpose()?;

        // Resolve and capability-check every target before validating values,
        // so the first invalid device aborts the whole call.
        for id in devices {
            let device = self.world.device(id)?;
            if !registry::supports(&device.traits, command) {
                return Err(UnsupportedCommandError {
                    device_id: id.clone(),
                    command: command.to_string(),
                }
                .into());
            }
        }

        let operation = operation::validate(command, values)?;
        let now = self.clock.now();

        if let Some(delay) = delay {
            let due_at = now + delay.to_chrono();
            for id in devices {
                self.schedules.insert(Schedule::new(
                    id.clone(),
                    command,
                    values.to_vec(),
                    due_at,
                    duration,
                ));
            }
            debug!(op = %command, targets = devices.len(), %due_at, "recorded schedule");
            return Ok(ActionSummary {
                result: format!("Scheduled '{command}' for {} device(s).", devices.len()),
                card_id: CardId::new(),
            });
        }

        self.apply_now(devices, &operation)?;

        // Duration-bound immediate effects revert once the duration elapses.
        let reversal_delay = duration.or_else(|| match &operation {
            Operation::SetLightEffectWithDuration { seconds, .. } => {
                Some(Delay::seconds(*seconds))
            }
            _ => None,
        });
        if let Some(reversal_delay) = reversal_delay {
            if let Some((rev_command, rev_values)) = operation.reversal() {
                let due_at = now + reversal_delay.to_chrono();
                for id in devices {
                    self.schedules.insert(Schedule::new(
                        id.clone(),
                        rev_command,
                        rev_values.clone(),
                        due_at,
                        None,
                    ));
                }
                debug!(op = %command, reversal = %rev_command, %due_at, "recorded reversal");
            }
        }

        debug!(op = %command, targets = devices.len(), "applied operation");
        Ok(ActionSummary {
            result: format!("Applied '{command}' to {} device(s).", devices.len()),
            card_id: CardId::new(),
        })
    }

    /// Stage the mutation on copies of every target, then commit. Either all
    /// targets change or none do.
    fn apply_now(
        &mut self,
        devices: &[String],
        operation: &Operation,
    ) -> Result<(), HomeGraphError> {
        let mut staged: Vec<(String, Vec<DeviceState>)> = Vec::with_capacity(devices.len());
        for id in devices {
            let mut copy = self.world.device(id)?.clone();
            operation.apply(&mut copy)?;
            staged.push((id.clone(), copy.device_state));
        }
        for (id, device_state) in staged {
            self.world.device_mut(&id)?.device_state = device_state;
        }
        Ok(())
    }
}
