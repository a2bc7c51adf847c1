//! # smartpanel-app
//!
//! Application layer: orchestration and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement:
//!   - `Clock`: where the simulation reads the current time
//!   - `SnapshotPublisher`: where rendered snapshots go after each tick
//! - Own the device registry in a single actor task and hand out a
//!   cloneable [`panel_actor::PanelHandle`] to every context that reads or
//!   mutates it (the simulation loop and the command interface)
//! - Run the periodic **simulation loop** with start/stop control
//! - Provide **in-process infrastructure** (snapshot bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `smartpanel-domain` only (plus `tokio` for tasks, channels
//! and timers). Never imports adapter crates.

pub mod panel_actor;
pub mod ports;
pub mod simulation;
pub mod snapshot_bus;
