// src/pid/deadband.rs

//! # Deadband-Gated PID Step
//!
//! This module provides the compute callback and control data structure for
//! the altitude loop. The derivative is a dirty derivative as in
//! [`crate::pid::filtered`], but integral accumulation is permitted only
//! while the tracking error lies strictly inside a hold zone around the
//! measurement; outside it the integrator is forced to zero, so a command
//! step larger than the hold authority cannot wind the loop up.

use crate::Number;
use piddiy::PidController;

/// Control data for the deadband-gated, error-filtering loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeadbandControlData<T> {
    /// Measured value of the controlled state.
    pub measurement: T,
    /// Low-pass filter time constant for the dirty derivative.
    pub tau: T,
    /// Sample period.
    pub dt: T,
    /// Half-width of the zone inside which integral action is allowed.
    pub deadband: T,
}

/// PID step with deadband-gated trapezoidal integration and a dirty
/// derivative.
pub fn compute_deadband<T: Number>(
    pid: &mut PidController<T, DeadbandControlData<T>>,
    data: DeadbandControlData<T>,
) -> (T, T, T) {
    let two = T::one() + T::one();
    let error = pid.set_point - data.measurement;

    let integral = if error.abs() < data.deadband {
        pid.integral + data.dt / two * (error + pid.error)
    } else {
        T::zero()
    };

    let denominator = two * data.tau + data.dt;
    let derivative = (two * data.tau - data.dt) / denominator * pid.derivative
        + two / denominator * (error - pid.error);

    (error, integral, derivative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    /// Test that the integral accumulates while inside the deadband.
    #[test]
    fn test_deadband_integrates_inside() {
        let mut pid = PidController::new();
        pid.compute_fn(compute_deadband)
            .set_point(10.0)
            .kp(0.0)
            .ki(1.0)
            .kd(0.0);
        let data = DeadbandControlData {
            measurement: 5.0,
            tau: 0.5,
            dt: 0.1,
            deadband: 20.0,
        };

        let (_, integral, _) = compute_deadband(&mut pid, data);
        assert!(value_close(0.25, integral));
    }

    /// Test that the integrator is forced to zero outside the deadband.
    #[test]
    fn test_deadband_zeroes_integrator_outside() {
        let mut pid = PidController::new();
        pid.compute_fn(compute_deadband)
            .set_point(100.0)
            .kp(0.0)
            .ki(1.0)
            .kd(0.0);
        pid.integral = 3.0;
        let data = DeadbandControlData {
            measurement: 0.0,
            tau: 0.5,
            dt: 0.1,
            deadband: 20.0,
        };

        let (_, integral, _) = compute_deadband(&mut pid, data);
        assert!(value_close(0.0, integral));

        // The stored integrator is overwritten on compute.
        let _ = pid.compute(data);
        assert!(value_close(0.0, pid.integral));
    }

    /// Test that the dirty derivative still runs outside the deadband.
    #[test]
    fn test_deadband_derivative_unaffected() {
        let mut pid = PidController::new();
        pid.compute_fn(compute_deadband)
            .set_point(100.0)
            .kp(0.0)
            .ki(0.0)
            .kd(1.0);
        let data = DeadbandControlData {
            measurement: 0.0,
            tau: 0.5,
            dt: 0.1,
            deadband: 20.0,
        };

        let (_, _, derivative) = compute_deadband(&mut pid, data);
        assert!(value_close(2.0 / 1.1 * 100.0, derivative));
    }

    /// Test that a negative error inside the deadband integrates normally.
    #[test]
    fn test_deadband_symmetric_about_zero() {
        let mut pid = PidController::new();
        pid.compute_fn(compute_deadband)
            .set_point(-5.0)
            .kp(0.0)
            .ki(1.0)
            .kd(0.0);
        let data = DeadbandControlData {
            measurement: 0.0,
            tau: 0.5,
            dt: 0.1,
            deadband: 20.0,
        };

        let (_, integral, _) = compute_deadband(&mut pid, data);
        assert!(value_close(-0.25, integral));
    }
}
