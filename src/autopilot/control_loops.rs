// src/autopilot/control_loops.rs

//! # Fixed-Wing Hold Laws
//!
//! This module owns the five PID loops of the autopilot — course, roll,
//! pitch, airspeed-with-throttle, and altitude — and implements each hold
//! law on top of the shared PID steps: refresh gains and set point from the
//! parameter snapshot, run the loop, add trim or feed-forward, saturate,
//! and back-correct the integrator. The loops persist across ticks; phase
//! exit hooks reset them through the dedicated methods when the next phase
//! assigns them a different physical meaning.

use crate::pid::{
    anti_windup, compute_deadband, compute_filtered, compute_rate_damping, compute_rate_feedback,
    reset, saturate, DeadbandControlData, FilteredControlData, RateControlData,
};
use crate::{Number, Parameters};
use piddiy::PidController;

/// The per-axis PID loops behind the hold laws.
pub struct ControlLoops<T: Number> {
    course: PidController<T, RateControlData<T>>,
    roll: PidController<T, RateControlData<T>>,
    pitch: PidController<T, RateControlData<T>>,
    airspeed: PidController<T, FilteredControlData<T>>,
    altitude: PidController<T, DeadbandControlData<T>>,
}

impl<T: Number> ControlLoops<T> {
    /// Creates the loop bank with all state zeroed.
    pub fn new() -> Self {
        let mut course = PidController::new();
        course.compute_fn(compute_rate_feedback);
        let mut roll = PidController::new();
        roll.compute_fn(compute_rate_damping);
        let mut pitch = PidController::new();
        pitch.compute_fn(compute_rate_damping);
        let mut airspeed = PidController::new();
        airspeed.compute_fn(compute_filtered);
        let mut altitude = PidController::new();
        altitude.compute_fn(compute_deadband);

        ControlLoops {
            course,
            roll,
            pitch,
            airspeed,
            altitude,
        }
    }

    /// Computes the commanded roll angle that steers the aircraft onto the
    /// commanded course.
    ///
    /// The outer loop's roll feed-forward is added before saturation, so the
    /// command cap bounds the whole request, not just the feedback part.
    pub fn course_hold(
        &mut self,
        course_cmd: T,
        course: T,
        roll_ff: T,
        yaw_rate: T,
        params: &Parameters<T>,
        dt: T,
    ) -> T {
        self.course
            .set_point(course_cmd)
            .kp(params.kp_course)
            .ki(params.ki_course)
            .kd(params.kd_course);
        let data = RateControlData {
            measurement: course,
            rate: yaw_rate,
            dt,
        };

        let unsaturated = self.course.compute(data) + roll_ff;
        let roll_cmd = saturate(unsaturated, params.max_roll_cmd, -params.max_roll_cmd);
        anti_windup(
            &mut self.course,
            roll_cmd,
            unsaturated,
            dt,
            params.anti_windup_threshold,
        );

        roll_cmd
    }

    /// Computes the aileron deflection that tracks the commanded roll angle,
    /// damped by the measured roll rate.
    pub fn roll_hold(
        &mut self,
        roll_cmd: T,
        roll: T,
        roll_rate: T,
        params: &Parameters<T>,
        dt: T,
    ) -> T {
        self.roll
            .set_point(roll_cmd)
            .kp(params.kp_roll)
            .ki(params.ki_roll)
            .kd(params.kd_roll);
        let data = RateControlData {
            measurement: roll,
            rate: roll_rate,
            dt,
        };

        let unsaturated = self.roll.compute(data);
        let aileron = saturate(unsaturated, params.max_aileron, -params.max_aileron);
        anti_windup(
            &mut self.roll,
            aileron,
            unsaturated,
            dt,
            params.anti_windup_threshold,
        );

        aileron
    }

    /// Computes the elevator deflection that tracks the commanded pitch
    /// angle, damped by the measured pitch rate.
    ///
    /// The elevator trim, scaled into the law's output units, is added
    /// before saturation. The elevator channel is reversed relative to the
    /// pitch axis, so the saturated deflection is negated on return.
    pub fn pitch_hold(
        &mut self,
        pitch_cmd: T,
        pitch: T,
        pitch_rate: T,
        params: &Parameters<T>,
        dt: T,
    ) -> T {
        self.pitch
            .set_point(pitch_cmd)
            .kp(params.kp_pitch)
            .ki(params.ki_pitch)
            .kd(params.kd_pitch);
        let data = RateControlData {
            measurement: pitch,
            rate: pitch_rate,
            dt,
        };

        let unsaturated =
            params.trim_elevator / params.pwm_rad_elevator + self.pitch.compute(data);
        let elevator = saturate(unsaturated, params.max_elevator, -params.max_elevator);
        anti_windup(
            &mut self.pitch,
            elevator,
            unsaturated,
            dt,
            params.anti_windup_threshold,
        );

        -elevator
    }

    /// Computes the throttle setting that tracks the commanded airspeed,
    /// with the throttle trim added before saturation. Throttle is bounded
    /// below by zero, not by a symmetric limit.
    pub fn airspeed_with_throttle_hold(
        &mut self,
        airspeed_cmd: T,
        airspeed: T,
        params: &Parameters<T>,
        dt: T,
    ) -> T {
        self.airspeed
            .set_point(airspeed_cmd)
            .kp(params.kp_airspeed)
            .ki(params.ki_airspeed)
            .kd(params.kd_airspeed);
        let data = FilteredControlData {
            measurement: airspeed,
            tau: params.tau,
            dt,
        };

        let unsaturated = params.trim_throttle + self.airspeed.compute(data);
        let throttle = saturate(unsaturated, params.max_throttle, T::zero());
        anti_windup(
            &mut self.airspeed,
            throttle,
            unsaturated,
            dt,
            params.anti_windup_threshold,
        );

        throttle
    }

    /// Computes the commanded pitch angle that closes an altitude error.
    /// Integration is gated by `hold_zone`: outside it the integrator stays
    /// at zero, so a command step beyond the hold authority cannot wind the
    /// loop up. Produces a commanded angle, not an actuator deflection.
    pub fn altitude_hold(
        &mut self,
        altitude_cmd: T,
        altitude: T,
        hold_zone: T,
        params: &Parameters<T>,
        dt: T,
    ) -> T {
        self.altitude
            .set_point(altitude_cmd)
            .kp(params.kp_altitude)
            .ki(params.ki_altitude)
            .kd(params.kd_altitude);
        let data = DeadbandControlData {
            measurement: altitude,
            tau: params.tau,
            dt,
            deadband: hold_zone,
        };

        let unsaturated = self.altitude.compute(data);
        let pitch_cmd = saturate(unsaturated, params.max_pitch_cmd, -params.max_pitch_cmd);
        anti_windup(
            &mut self.altitude,
            pitch_cmd,
            unsaturated,
            dt,
            params.anti_windup_threshold,
        );

        pitch_cmd
    }

    /// Zeroes the airspeed loop's error, integrator, and differentiator.
    pub fn reset_airspeed_loop(&mut self) {
        reset(&mut self.airspeed);
    }

    /// Zeroes the altitude loop's error, integrator, and differentiator.
    pub fn reset_altitude_loop(&mut self) {
        reset(&mut self.altitude);
    }

    /// Zeroes the course loop's integrator, leaving its error and
    /// differentiator in place.
    pub fn reset_course_integrator(&mut self) {
        self.course.integral = T::zero();
    }

    /// The course loop's `(error, integrator, differentiator)` triple.
    pub fn course_state(&self) -> (T, T, T) {
        (self.course.error, self.course.integral, self.course.derivative)
    }

    /// The roll loop's `(error, integrator, differentiator)` triple.
    pub fn roll_state(&self) -> (T, T, T) {
        (self.roll.error, self.roll.integral, self.roll.derivative)
    }

    /// The pitch loop's `(error, integrator, differentiator)` triple.
    pub fn pitch_state(&self) -> (T, T, T) {
        (self.pitch.error, self.pitch.integral, self.pitch.derivative)
    }

    /// The airspeed loop's `(error, integrator, differentiator)` triple.
    pub fn airspeed_state(&self) -> (T, T, T) {
        (
            self.airspeed.error,
            self.airspeed.integral,
            self.airspeed.derivative,
        )
    }

    /// The altitude loop's `(error, integrator, differentiator)` triple.
    pub fn altitude_state(&self) -> (T, T, T) {
        (
            self.altitude.error,
            self.altitude.integral,
            self.altitude.derivative,
        )
    }
}
