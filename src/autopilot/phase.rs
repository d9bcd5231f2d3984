// src/autopilot/phase.rs

//! # Flight-Phase State Machine
//!
//! This module dispatches each control tick to the hold laws appropriate for
//! the current flight phase. During take-off the aircraft holds wings level
//! at a fixed pitch-up with capped throttle; during climb it tracks airspeed
//! and altitude with wings level; once established it tracks course,
//! airspeed, and altitude simultaneously. Phase transitions are decided by
//! the external tick driver; the state machine only runs the exit hook of
//! the phase being left so stale integrator state cannot leak into the next
//! phase.

use crate::pid::saturate;
use crate::{ControlLoops, FlightController, Input, Number, Output, Parameters};

/// The flight phases of the autopilot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightPhase {
    /// Ground roll and initial rotation: wings level, fixed pitch-up,
    /// throttle capped.
    TakeOff,
    /// Climb to the target altitude: wings level, full airspeed and
    /// altitude tracking.
    Climb,
    /// Established flight: course, airspeed, and altitude tracking.
    AltitudeHold,
}

impl FlightPhase {
    /// Runs one control tick through this phase's hold laws.
    pub fn control<T: Number>(
        self,
        loops: &mut ControlLoops<T>,
        params: &Parameters<T>,
        input: &Input<T>,
    ) -> Output<T> {
        match self {
            FlightPhase::TakeOff => take_off(loops, params, input),
            FlightPhase::Climb => climb(loops, params, input),
            FlightPhase::AltitudeHold => altitude_hold(loops, params, input),
        }
    }

    /// Runs this phase's exit hook against the loop bank.
    ///
    /// Leaving climb discards the airspeed and altitude loop state built up
    /// on the way to the target altitude; leaving altitude hold discards the
    /// course integrator. Take-off has no exit hook.
    pub fn on_exit<T: Number>(self, loops: &mut ControlLoops<T>) {
        match self {
            FlightPhase::TakeOff => (),
            FlightPhase::Climb => {
                loops.reset_airspeed_loop();
                loops.reset_altitude_loop();
            }
            FlightPhase::AltitudeHold => loops.reset_course_integrator(),
        }
    }
}

/// Pulls the altitude command toward the current altitude so it never sits
/// more than `bound` away from it.
fn clamp_altitude_command<T: Number>(altitude_cmd: T, altitude: T, bound: T) -> T {
    saturate(altitude_cmd, altitude + bound, altitude - bound)
}

fn take_off<T: Number>(
    loops: &mut ControlLoops<T>,
    params: &Parameters<T>,
    input: &Input<T>,
) -> Output<T> {
    let roll_cmd = T::zero();
    let pitch_cmd = params.takeoff_pitch;
    let throttle =
        loops.airspeed_with_throttle_hold(input.airspeed_cmd, input.airspeed, params, input.dt);

    Output {
        aileron: loops.roll_hold(roll_cmd, input.roll, input.roll_rate, params, input.dt),
        elevator: loops.pitch_hold(pitch_cmd, input.pitch, input.pitch_rate, params, input.dt),
        rudder: T::zero(),
        throttle: saturate(throttle, params.max_takeoff_throttle, T::zero()),
        roll_cmd,
        pitch_cmd,
    }
}

fn climb<T: Number>(
    loops: &mut ControlLoops<T>,
    params: &Parameters<T>,
    input: &Input<T>,
) -> Output<T> {
    let two = T::one() + T::one();
    let altitude_cmd =
        clamp_altitude_command(input.altitude_cmd, input.altitude, params.altitude_hold_zone);

    let roll_cmd = T::zero();
    // Tighter integrator gate than established flight: the loop is expected
    // to spend most of the climb outside the hold zone.
    let pitch_cmd = loops.altitude_hold(
        altitude_cmd,
        input.altitude,
        params.altitude_hold_zone / two,
        params,
        input.dt,
    );

    Output {
        aileron: loops.roll_hold(roll_cmd, input.roll, input.roll_rate, params, input.dt),
        elevator: loops.pitch_hold(pitch_cmd, input.pitch, input.pitch_rate, params, input.dt),
        rudder: T::zero(),
        throttle: loops.airspeed_with_throttle_hold(
            input.airspeed_cmd,
            input.airspeed,
            params,
            input.dt,
        ),
        roll_cmd,
        pitch_cmd,
    }
}

fn altitude_hold<T: Number>(
    loops: &mut ControlLoops<T>,
    params: &Parameters<T>,
    input: &Input<T>,
) -> Output<T> {
    let altitude_cmd =
        clamp_altitude_command(input.altitude_cmd, input.altitude, params.altitude_hold_zone);

    let roll_cmd = loops.course_hold(
        input.course_cmd,
        input.course,
        input.roll_ff,
        input.yaw_rate,
        params,
        input.dt,
    );
    let pitch_cmd = loops.altitude_hold(
        altitude_cmd,
        input.altitude,
        params.altitude_hold_zone,
        params,
        input.dt,
    );

    Output {
        aileron: loops.roll_hold(roll_cmd, input.roll, input.roll_rate, params, input.dt),
        elevator: loops.pitch_hold(pitch_cmd, input.pitch, input.pitch_rate, params, input.dt),
        // Sideslip regulation is not implemented; the rudder channel is
        // published at zero.
        rudder: T::zero(),
        throttle: loops.airspeed_with_throttle_hold(
            input.airspeed_cmd,
            input.airspeed,
            params,
            input.dt,
        ),
        roll_cmd,
        pitch_cmd,
    }
}

/// A phase-dispatching flight controller built on [`ControlLoops`].
///
/// The external tick driver owns the phase logic: it decides when to move
/// between phases from altitude and airspeed thresholds it defines, and
/// calls [`transition_to`](Autopilot::transition_to) to commit the change.
/// The autopilot runs the departing phase's exit hook at that point.
pub struct Autopilot<T: Number> {
    phase: FlightPhase,
    loops: ControlLoops<T>,
}

impl<T: Number> Autopilot<T> {
    /// Creates an autopilot in the given initial phase with zeroed loops.
    pub fn new(initial_phase: FlightPhase) -> Self {
        Autopilot {
            phase: initial_phase,
            loops: ControlLoops::new(),
        }
    }

    /// The current flight phase.
    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    /// Read access to the loop bank, for telemetry.
    pub fn loops(&self) -> &ControlLoops<T> {
        &self.loops
    }

    /// Commits a phase transition, running the departing phase's exit hook.
    /// Transitioning to the current phase is a no-op.
    pub fn transition_to(&mut self, next: FlightPhase) {
        if self.phase == next {
            return;
        }
        self.phase.on_exit(&mut self.loops);
        self.phase = next;
    }
}

impl<T: Number> FlightController<T> for Autopilot<T> {
    fn control(&mut self, params: &Parameters<T>, input: &Input<T>) -> Output<T> {
        self.phase.control(&mut self.loops, params, input)
    }
}
