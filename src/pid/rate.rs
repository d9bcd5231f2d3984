// src/pid/rate.rs

//! # Measured-Rate PID Step
//!
//! This module provides the compute callbacks and control data structure for
//! loops whose derivative term comes straight from a rate gyro instead of a
//! filtered error difference. The tracking error is integrated with the
//! trapezoid rule.

use crate::Number;
use piddiy::PidController;

/// Control data for loops with a directly measured rate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RateControlData<T> {
    /// Measured value of the controlled state.
    pub measurement: T,
    /// Measured rate of change of the controlled state.
    pub rate: T,
    /// Sample period.
    pub dt: T,
}

/// PID step whose derivative term is the measured rate itself.
///
/// Used by course hold, where the yaw rate enters the roll command with
/// positive sign.
pub fn compute_rate_feedback<T: Number>(
    pid: &mut PidController<T, RateControlData<T>>,
    data: RateControlData<T>,
) -> (T, T, T) {
    let two = T::one() + T::one();
    let error = pid.set_point - data.measurement;
    let integral = pid.integral + data.dt / two * (error + pid.error);

    (error, integral, data.rate)
}

/// PID step whose derivative term opposes the measured rate.
///
/// Used by roll and pitch hold, where the body rate damps the commanded
/// motion.
pub fn compute_rate_damping<T: Number>(
    pid: &mut PidController<T, RateControlData<T>>,
    data: RateControlData<T>,
) -> (T, T, T) {
    let two = T::one() + T::one();
    let error = pid.set_point - data.measurement;
    let integral = pid.integral + data.dt / two * (error + pid.error);

    (error, integral, -data.rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    /// Test that the integral term accumulates by the trapezoid rule.
    #[test]
    fn test_rate_trapezoidal_integration() {
        let mut pid = PidController::new();
        pid.compute_fn(compute_rate_feedback)
            .set_point(10.0)
            .kp(0.0)
            .ki(1.0)
            .kd(0.0);
        let data = RateControlData {
            measurement: 0.0,
            rate: 0.0,
            dt: 0.1,
        };

        // First step integrates against a zero previous error.
        let (_, integral, _) = compute_rate_feedback(&mut pid, data);
        assert!(value_close(0.5, integral));
        let _ = pid.compute(data);

        // Second step integrates the full trapezoid.
        let (_, integral, _) = compute_rate_feedback(&mut pid, data);
        assert!(value_close(1.5, integral));
    }

    /// Test that the feedback variant passes the rate through unchanged.
    #[test]
    fn test_rate_feedback_derivative_sign() {
        let mut pid = PidController::new();
        pid.compute_fn(compute_rate_feedback)
            .set_point(10.0)
            .kp(1.0)
            .ki(1.0)
            .kd(1.0);
        let data = RateControlData {
            measurement: 0.0,
            rate: 2.0,
            dt: 0.1,
        };

        let (error, integral, derivative) = compute_rate_feedback(&mut pid, data);
        assert!(value_close(10.0, error));
        assert!(value_close(0.5, integral));
        assert!(value_close(2.0, derivative));

        // Output is the gain-weighted sum of the terms.
        let output = pid.compute(data);
        assert!(value_close(12.5, output));
    }

    /// Test that the damping variant negates the rate.
    #[test]
    fn test_rate_damping_derivative_sign() {
        let mut pid = PidController::new();
        pid.compute_fn(compute_rate_damping)
            .set_point(10.0)
            .kp(1.0)
            .ki(1.0)
            .kd(1.0);
        let data = RateControlData {
            measurement: 0.0,
            rate: 2.0,
            dt: 0.1,
        };

        let (_, _, derivative) = compute_rate_damping(&mut pid, data);
        assert!(value_close(-2.0, derivative));

        let output = pid.compute(data);
        assert!(value_close(8.5, output));
    }

    /// Test that zero error and zero rate produce zero output.
    #[test]
    fn test_rate_zero_conditions() {
        let mut pid = PidController::new();
        pid.compute_fn(compute_rate_damping)
            .set_point(0.0)
            .kp(1.0)
            .ki(1.0)
            .kd(1.0);
        let data = RateControlData {
            measurement: 0.0,
            rate: 0.0,
            dt: 0.1,
        };

        let (error, integral, derivative) = compute_rate_damping(&mut pid, data);
        let output = pid.compute(data);

        assert!(value_close(0.0, error));
        assert!(value_close(0.0, integral));
        assert!(value_close(0.0, derivative));
        assert!(value_close(0.0, output));
    }
}
