//! # homegraph-engine
//!
//! Application layer for the homegraph smart-home engine.
//!
//! ## Responsibilities
//! - **Trait registry** — which commands each capability supports
//! - **Command dispatcher** (`run`) — resolve targets, validate, apply or
//!   schedule state mutations
//! - **State reader** (`details`) — enriched, read-only state snapshots
//! - **Schedule manager** (`view_schedules` / `cancel_schedules` /
//!   `process_schedules`) — bookkeeping for deferred actions
//! - The **`Clock` port** — the engine never spawns timers; an external
//!   driver supplies time and fires due schedules
//!
//! The engine is a single logical actor: every public operation runs to
//! completion synchronously and atomically, and callers only ever receive
//! value snapshots of device state.
//!
//! ## Dependency rule
//! Depends on `homegraph-domain` only. Never imports adapter crates.

pub mod clock;
pub mod dispatcher;
pub mod operation;
pub mod reader;
pub mod registry;
pub mod scheduler;
pub mod seed;

pub use clock::{Clock, ManualClock, SystemClock};
pub use dispatcher::ActionSummary;
pub use operation::Operation;
pub use reader::DetailsResult;
pub use scheduler::{FiredAction, ScheduleSummary};

use homegraph_domain::world::WorldModel;

use crate::scheduler::ScheduleBook;

/// The smart-home command/state engine.
///
/// Owns the world model and the schedule book outright; the clock is the only
/// seam to the outside. Generic over [`Clock`] so tests and simulated-time
/// drivers can substitute a manual clock.
pub struct Engine<C = SystemClock> {
    pub(crate) world: WorldModel,
    pub(crate) schedules: ScheduleBook,
    pub(crate) clock: C,
}

impl<C: Clock> Engine<C> {
    /// Create an engine over an empty world.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            world: WorldModel::new(),
            schedules: ScheduleBook::default(),
            clock,
        }
    }

    /// Create an engine over an existing world.
    #[must_use]
    pub fn with_world(world: WorldModel, clock: C) -> Self {
        Self {
            world,
            schedules: ScheduleBook::default(),
            clock,
        }
    }

    /// Create an engine seeded with the default demo world.
    #[must_use]
    pub fn with_default_world(clock: C) -> Self {
        Self::with_world(seed::default_world(), clock)
    }

    /// Read-only access to the world model.
    #[must_use]
    pub fn world(&self) -> &WorldModel {
        &self.world
    }

    /// Mutable access to the world model, for provisioning by the
    /// surrounding store or by tests.
    pub fn world_mut(&mut self) -> &mut WorldModel {
        &mut self.world
    }

    /// Reset to the default demo world and drop all pending schedules.
    pub fn restore_default_data(&mut self) {
        self.world = seed::default_world();
        self.schedules.clear();
    }

    /// Drop every structure, device, and pending schedule.
    pub fn clear(&mut self) {
        self.world.clear();
        self.schedules.clear();
    }
}
