// src/lib.rs

//! # Fixed-Wing PID Autopilot
//!
//! This crate computes actuator commands (aileron, elevator, rudder,
//! throttle) for a fixed-wing aircraft from sensor feedback and outer-loop
//! commands. A flight-phase state machine selects the active composite
//! control law each tick; the per-phase laws are built from PID loops with
//! trapezoidal integration, low-pass-filtered derivatives, and integrator
//! anti-windup. The crate is `no_std`, allocation-free, and generic over the
//! numeric type, so it runs on floating-point and fixed-point hardware alike.
//!
//! Trajectory planning, state estimation, and actuator mixing are outside
//! this crate: the tick driver supplies one validated [`Input`] snapshot per
//! control period together with a [`Parameters`] snapshot, and consumes the
//! resulting [`Output`].

#![no_std]
#![deny(missing_docs)]

pub mod autopilot;
pub mod pid;

#[doc(inline)]
pub use autopilot::*;

#[cfg(test)]
mod test_utils;
