// src/autopilot/param_source.rs

//! A module specifying the contract of the external parameter source. The
//! host configuration system owns parameter storage and live updates; the
//! core only ever pulls a complete, named set of numeric values out of it to
//! build a [`Parameters`] snapshot. A missing or mistyped entry is a fatal
//! configuration error surfaced to the caller, never patched over with a
//! default.

use crate::{Number, Parameters};

/// A fatal error returned by a parameter source lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    /// No parameter is registered under the requested name.
    UnknownParameter,
    /// The parameter exists but does not hold a numeric value of the
    /// requested type.
    WrongValueType,
}

impl core::fmt::Display for ParamError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let message = match self {
            ParamError::UnknownParameter => "unknown parameter name",
            ParamError::WrongValueType => "parameter holds the wrong value type",
        };
        f.write_str(message)
    }
}

/// A named store of numeric configuration values.
///
/// Implemented by the host's configuration layer. Lookups must be cheap and
/// must reflect a consistent state: if the host supports live updates, it is
/// responsible for not exposing a half-applied update through `get`.
pub trait ParameterSource<T> {
    /// Returns the value registered under `name`.
    fn get(&self, name: &str) -> Result<T, ParamError>;
}

impl<T: Number> Parameters<T> {
    /// Builds a snapshot by pulling every gain, limit, trim, and threshold
    /// from the source by name. The field names double as the parameter
    /// names. Fails on the first missing or mistyped entry.
    pub fn from_source<S: ParameterSource<T>>(source: &S) -> Result<Self, ParamError> {
        Ok(Self {
            kp_course: source.get("kp_course")?,
            ki_course: source.get("ki_course")?,
            kd_course: source.get("kd_course")?,
            kp_roll: source.get("kp_roll")?,
            ki_roll: source.get("ki_roll")?,
            kd_roll: source.get("kd_roll")?,
            kp_pitch: source.get("kp_pitch")?,
            ki_pitch: source.get("ki_pitch")?,
            kd_pitch: source.get("kd_pitch")?,
            kp_airspeed: source.get("kp_airspeed")?,
            ki_airspeed: source.get("ki_airspeed")?,
            kd_airspeed: source.get("kd_airspeed")?,
            kp_altitude: source.get("kp_altitude")?,
            ki_altitude: source.get("ki_altitude")?,
            kd_altitude: source.get("kd_altitude")?,
            tau: source.get("tau")?,
            max_aileron: source.get("max_aileron")?,
            max_elevator: source.get("max_elevator")?,
            max_throttle: source.get("max_throttle")?,
            trim_elevator: source.get("trim_elevator")?,
            trim_throttle: source.get("trim_throttle")?,
            pwm_rad_elevator: source.get("pwm_rad_elevator")?,
            max_roll_cmd: source.get("max_roll_cmd")?,
            max_pitch_cmd: source.get("max_pitch_cmd")?,
            takeoff_pitch: source.get("takeoff_pitch")?,
            max_takeoff_throttle: source.get("max_takeoff_throttle")?,
            altitude_hold_zone: source.get("altitude_hold_zone")?,
            anti_windup_threshold: source.get("anti_windup_threshold")?,
        })
    }
}
