// src/autopilot.rs

//! # Flight-Phase Autopilot
//!
//! This module assembles the PID building blocks into the five fixed-wing
//! hold laws and the flight-phase state machine that dispatches to them. It
//! also defines the data contracts shared with the external collaborators:
//! the parameter source that supplies a [`Parameters`] snapshot and the tick
//! driver that supplies an [`Input`] snapshot per control period and decides
//! phase transitions.

pub mod control_loops;
pub use control_loops::*;
pub mod flight_controller;
pub use flight_controller::*;
pub mod param_source;
pub use param_source::*;
pub mod phase;
pub use phase::*;
