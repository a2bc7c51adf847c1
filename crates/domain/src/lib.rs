//! # smartpanel-domain
//!
//! Pure domain model for the smartpanel desk-toy home automation panel.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (lights, thermostats, cameras) and their bounds
//! - Define the **Device Registry** (ordered, unique ids)
//! - Define the single **motion rule** (motion → lights on, idle → lights off)
//! - Define the **Randomizer** that perturbs powered devices
//! - Define **Commands** (user input) and **Snapshots** (what gets rendered)
//! - Tie it together in [`panel::Panel`], the state machine driven by ticks
//!   and commands
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.
//! Randomness and time are passed in by the caller.

pub mod error;
pub mod id;
pub mod time;

pub mod command;
pub mod device;
pub mod panel;
pub mod randomizer;
pub mod registry;
pub mod rule;
pub mod snapshot;
