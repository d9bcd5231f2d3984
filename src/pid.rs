// src/pid.rs

//! # PID Control Module
//!
//! This module provides the compute functions and control data structures
//! for the autopilot's PID loops, together with the saturation and
//! anti-windup helpers shared by every control law.

pub mod deadband;
pub use deadband::*;
pub mod filtered;
pub use filtered::*;
pub mod rate;
pub use rate::*;

use crate::Number;
use piddiy::PidController;

/// Clamps a value between an upper and a lower limit.
///
/// Returns `upper` if `value` is above it, `lower` if `value` is below it,
/// and `value` unchanged otherwise. Callers must ensure `upper >= lower`.
pub fn saturate<T: Number>(value: T, upper: T, lower: T) -> T {
    if value > upper {
        upper
    } else if value < lower {
        lower
    } else {
        value
    }
}

/// Back-corrects a loop's integrator after output saturation.
///
/// When the saturated output differs from the raw control effort, the
/// integrator is adjusted so that recomputing the effort from the corrected
/// integrator would have produced the saturated output. This stops the
/// integrator from accumulating error the actuator cannot act upon.
///
/// The correction divides by the integral gain, so it is skipped entirely
/// when `ki` is zero or its magnitude is below `threshold`.
pub fn anti_windup<T: Number, D>(
    pid: &mut PidController<T, D>,
    saturated: T,
    unsaturated: T,
    dt: T,
    threshold: T,
) {
    if pid.ki != T::zero() && pid.ki.abs() >= threshold {
        pid.integral = pid.integral + dt / pid.ki * (saturated - unsaturated);
    }
}

/// Zeroes a loop's stored error, integrator, and differentiator.
///
/// Phase exit hooks use this to keep stale state from leaking into a phase
/// that assigns the loop a different physical meaning.
pub fn reset<T: Number, D>(pid: &mut PidController<T, D>) {
    pid.error = T::zero();
    pid.integral = T::zero();
    pid.derivative = T::zero();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_saturate_within_limits() {
        assert_eq!(saturate(0.5_f32, 1.0, -1.0), 0.5);
        assert_eq!(saturate(-1.0_f32, 1.0, -1.0), -1.0);
        assert_eq!(saturate(1.0_f32, 1.0, -1.0), 1.0);
    }

    #[test]
    fn test_saturate_clamps_to_limits() {
        assert_eq!(saturate(2.0_f32, 1.0, -1.0), 1.0);
        assert_eq!(saturate(-3.5_f32, 1.0, -1.0), -1.0);
    }

    #[test]
    fn test_saturate_fixed_point() {
        use fixed::types::I16F16;

        let upper = I16F16::from_num(0.5);
        let lower = I16F16::from_num(-0.5);
        assert_eq!(saturate(I16F16::from_num(2), upper, lower), upper);
        assert_eq!(saturate(I16F16::from_num(-2), upper, lower), lower);
        let inside = I16F16::from_num(0.25);
        assert_eq!(saturate(inside, upper, lower), inside);
    }

    #[test]
    fn test_anti_windup_corrects_integrator() {
        let mut pid: PidController<f32, RateControlData<f32>> = PidController::new();
        pid.compute_fn(compute_rate_feedback).ki(2.0);
        pid.integral = 1.0;

        // Correction is (dt / ki) * (saturated - unsaturated).
        anti_windup(&mut pid, 1.0, 3.0, 0.1, 1e-5);
        assert!(value_close(0.9, pid.integral));
    }

    #[test]
    fn test_anti_windup_skipped_for_zero_gain() {
        let mut pid: PidController<f32, RateControlData<f32>> = PidController::new();
        pid.compute_fn(compute_rate_feedback).ki(0.0);
        pid.integral = 1.0;

        anti_windup(&mut pid, 1.0, 3.0, 0.1, 0.0);
        assert!(value_close(1.0, pid.integral));
    }

    #[test]
    fn test_anti_windup_skipped_below_threshold() {
        let mut pid: PidController<f32, RateControlData<f32>> = PidController::new();
        pid.compute_fn(compute_rate_feedback).ki(1e-6);
        pid.integral = 1.0;

        anti_windup(&mut pid, 1.0, 3.0, 0.1, 1e-5);
        assert!(value_close(1.0, pid.integral));
    }

    #[test]
    fn test_reset_zeroes_loop_state() {
        let mut pid: PidController<f32, RateControlData<f32>> = PidController::new();
        pid.compute_fn(compute_rate_feedback);
        pid.error = 0.3;
        pid.integral = -1.2;
        pid.derivative = 0.7;

        reset(&mut pid);
        assert_eq!(pid.error, 0.0);
        assert_eq!(pid.integral, 0.0);
        assert_eq!(pid.derivative, 0.0);
    }
}
