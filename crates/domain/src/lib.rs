//! # homegraph-domain
//!
//! Pure domain model for the homegraph smart-home engine.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (capability-bearing state holders) and their typed
//!   state entries
//! - Define **Traits** (capabilities: `OnOff`, `Volume`, `LockUnlock`, …)
//!   and **Commands** (operations a trait supports)
//! - Define the **World model** (structures → rooms → devices)
//! - Define **Schedules** (recorded future state mutations) and delay parsing
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from the engine, adapters, or IO crates.

pub mod command;
pub mod device;
pub mod error;
pub mod id;
pub mod schedule;
pub mod state;
pub mod temperature;
pub mod time;
pub mod traits;
pub mod world;
