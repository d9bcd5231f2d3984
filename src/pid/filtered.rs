// src/pid/filtered.rs

//! # Dirty-Derivative PID Step
//!
//! This module provides the compute callback and control data structure for
//! loops without a direct rate measurement. The derivative term is a dirty
//! derivative: a finite difference of the tracking error passed through a
//! first-order low-pass filter with time constant `tau`.

use crate::Number;
use piddiy::PidController;

/// Control data for loops that filter the error to obtain a derivative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilteredControlData<T> {
    /// Measured value of the controlled state.
    pub measurement: T,
    /// Low-pass filter time constant for the dirty derivative.
    pub tau: T,
    /// Sample period.
    pub dt: T,
}

/// PID step with trapezoidal integration and a dirty derivative.
///
/// Used by the airspeed-with-throttle loop. The previous derivative and
/// error stored in the controller carry the filter state across ticks.
pub fn compute_filtered<T: Number>(
    pid: &mut PidController<T, FilteredControlData<T>>,
    data: FilteredControlData<T>,
) -> (T, T, T) {
    let two = T::one() + T::one();
    let error = pid.set_point - data.measurement;
    let integral = pid.integral + data.dt / two * (error + pid.error);

    let denominator = two * data.tau + data.dt;
    let derivative = (two * data.tau - data.dt) / denominator * pid.derivative
        + two / denominator * (error - pid.error);

    (error, integral, derivative)
}
