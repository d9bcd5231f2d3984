// src/autopilot/flight_controller.rs

//! A module specifying the shared data contracts of the autopilot core: the
//! numeric trait the whole crate is generic over, the per-tick parameter and
//! sensor snapshots, the actuator output, and the trait the external tick
//! driver programs against. Fail-fast validation of the snapshots lives here
//! as well.

use piddiy::Number as PiddiyNumber;

/// Custom trait to encapsulate base number requirements.
pub trait Number: PiddiyNumber {
    /// Clamps generic PartialOrd values within a given range.
    fn clamp(self, min: Self, max: Self) -> Self {
        if self < min {
            min
        } else if max < self {
            max
        } else {
            self
        }
    }

    /// Returns the magnitude of the value.
    fn abs(self) -> Self {
        if self < Self::zero() {
            -self
        } else {
            self
        }
    }
}

impl<T: PiddiyNumber> Number for T {}

/// A fatal configuration error detected by snapshot validation.
///
/// None of these are recovered inside the core: constructing a controller
/// from an invalid snapshot is a caller bug and should be rejected up front
/// rather than allowed to misbehave silently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The sample period is zero or negative.
    NonPositiveSamplePeriod,
    /// The dirty-derivative filter time constant is zero or negative.
    NonPositiveTimeConstant,
    /// An actuator deflection limit is negative, inverting its saturation
    /// bounds.
    NegativeActuatorLimit,
    /// A commanded-angle cap is negative, inverting its saturation bounds.
    NegativeCommandCap,
    /// The altitude hold zone is negative.
    NegativeHoldZone,
    /// The anti-windup gain threshold is negative.
    NegativeAntiWindupThreshold,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let message = match self {
            ConfigError::NonPositiveSamplePeriod => "sample period must be positive",
            ConfigError::NonPositiveTimeConstant => "filter time constant must be positive",
            ConfigError::NegativeActuatorLimit => "actuator limit must not be negative",
            ConfigError::NegativeCommandCap => "command cap must not be negative",
            ConfigError::NegativeHoldZone => "altitude hold zone must not be negative",
            ConfigError::NegativeAntiWindupThreshold => {
                "anti-windup threshold must not be negative"
            }
        };
        f.write_str(message)
    }
}

/// Configuration snapshot of gains, limits, trims, and phase thresholds.
///
/// A snapshot is immutable within a tick: the control laws only ever read
/// it. Live tuning is the parameter source's concern; it must hand the core
/// a consistent snapshot, never a torn update.
#[derive(Clone, Copy)]
pub struct Parameters<T: Number> {
    /// Proportional gain for course hold.
    pub kp_course: T,
    /// Integral gain for course hold.
    pub ki_course: T,
    /// Derivative gain for course hold, applied to the yaw rate.
    pub kd_course: T,
    /// Proportional gain for roll hold.
    pub kp_roll: T,
    /// Integral gain for roll hold.
    pub ki_roll: T,
    /// Derivative gain for roll hold, applied against the roll rate.
    pub kd_roll: T,
    /// Proportional gain for pitch hold.
    pub kp_pitch: T,
    /// Integral gain for pitch hold.
    pub ki_pitch: T,
    /// Derivative gain for pitch hold, applied against the pitch rate.
    pub kd_pitch: T,
    /// Proportional gain for airspeed-with-throttle hold.
    pub kp_airspeed: T,
    /// Integral gain for airspeed-with-throttle hold.
    pub ki_airspeed: T,
    /// Derivative gain for airspeed-with-throttle hold.
    pub kd_airspeed: T,
    /// Proportional gain for altitude hold.
    pub kp_altitude: T,
    /// Integral gain for altitude hold.
    pub ki_altitude: T,
    /// Derivative gain for altitude hold.
    pub kd_altitude: T,
    /// Low-pass filter time constant for the dirty derivatives.
    pub tau: T,
    /// Maximum aileron deflection.
    pub max_aileron: T,
    /// Maximum elevator deflection.
    pub max_elevator: T,
    /// Maximum throttle setting.
    pub max_throttle: T,
    /// Elevator trim for steady, unaccelerated flight.
    pub trim_elevator: T,
    /// Throttle trim for steady, unaccelerated flight.
    pub trim_throttle: T,
    /// Elevator PWM per radian; divides the elevator trim into the pitch
    /// law's output units.
    pub pwm_rad_elevator: T,
    /// Maximum commanded roll angle out of course hold, in radians.
    pub max_roll_cmd: T,
    /// Maximum commanded pitch angle out of altitude hold, in radians.
    pub max_pitch_cmd: T,
    /// Fixed pitch-up command during take-off, in radians.
    pub takeoff_pitch: T,
    /// Throttle ceiling while in the take-off phase.
    pub max_takeoff_throttle: T,
    /// Altitude hold-zone half-width used for command clamping and for
    /// gating the altitude integrator.
    pub altitude_hold_zone: T,
    /// Integral-gain magnitude below which the anti-windup back-correction
    /// is skipped; conventionally a small epsilon such as 1e-5.
    pub anti_windup_threshold: T,
}

impl<T: Number> Parameters<T> {
    /// Creates a snapshot with placeholder values: unity gains on the
    /// proportional terms and limits, zero everywhere else. These must be
    /// replaced with values tuned for the airframe.
    ///
    /// Example Usage
    /// ```
    /// use fixedwing_autopilot::Parameters;
    ///
    /// let mut params = Parameters::<f32>::new();
    ///
    /// // Set the PID gains for the roll loop.
    /// params.kp_roll = 0.8;
    /// params.ki_roll = 0.05;
    /// params.kd_roll = 0.15;
    ///
    /// // Set the actuator limits and trims.
    /// params.max_aileron = 0.35;
    /// params.trim_throttle = 0.55;
    ///
    /// // Set the phase thresholds.
    /// params.max_takeoff_throttle = 0.8;
    /// params.takeoff_pitch = 3.0_f32.to_radians();
    /// params.altitude_hold_zone = 10.0;
    /// params.anti_windup_threshold = 1e-5;
    ///
    /// assert!(params.validate().is_ok());
    /// ```
    pub fn new() -> Self {
        Self {
            kp_course: T::one(),
            ki_course: T::zero(),
            kd_course: T::zero(),
            kp_roll: T::one(),
            ki_roll: T::zero(),
            kd_roll: T::zero(),
            kp_pitch: T::one(),
            ki_pitch: T::zero(),
            kd_pitch: T::zero(),
            kp_airspeed: T::one(),
            ki_airspeed: T::zero(),
            kd_airspeed: T::zero(),
            kp_altitude: T::one(),
            ki_altitude: T::zero(),
            kd_altitude: T::zero(),
            tau: T::one(),
            max_aileron: T::one(),
            max_elevator: T::one(),
            max_throttle: T::one(),
            trim_elevator: T::zero(),
            trim_throttle: T::zero(),
            pwm_rad_elevator: T::one(),
            max_roll_cmd: T::one(),
            max_pitch_cmd: T::one(),
            takeoff_pitch: T::zero(),
            max_takeoff_throttle: T::one(),
            altitude_hold_zone: T::one(),
            anti_windup_threshold: T::zero(),
        }
    }

    /// Checks the snapshot for values that would invert a saturation bound
    /// or destabilize a filter. Call once when a snapshot is (re)built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tau <= T::zero() {
            return Err(ConfigError::NonPositiveTimeConstant);
        }
        if self.max_aileron < T::zero()
            || self.max_elevator < T::zero()
            || self.max_throttle < T::zero()
            || self.max_takeoff_throttle < T::zero()
        {
            return Err(ConfigError::NegativeActuatorLimit);
        }
        if self.max_roll_cmd < T::zero() || self.max_pitch_cmd < T::zero() {
            return Err(ConfigError::NegativeCommandCap);
        }
        if self.altitude_hold_zone < T::zero() {
            return Err(ConfigError::NegativeHoldZone);
        }
        if self.anti_windup_threshold < T::zero() {
            return Err(ConfigError::NegativeAntiWindupThreshold);
        }
        Ok(())
    }
}

/// One tick's sensor and outer-loop command snapshot. Read-only within a
/// tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Input<T> {
    /// Roll angle.
    pub roll: T,
    /// Pitch angle.
    pub pitch: T,
    /// Body roll rate.
    pub roll_rate: T,
    /// Body pitch rate.
    pub pitch_rate: T,
    /// Body yaw rate.
    pub yaw_rate: T,
    /// Measured airspeed.
    pub airspeed: T,
    /// Measured altitude.
    pub altitude: T,
    /// Measured course angle.
    pub course: T,
    /// Commanded course angle.
    pub course_cmd: T,
    /// Commanded airspeed.
    pub airspeed_cmd: T,
    /// Commanded altitude.
    pub altitude_cmd: T,
    /// Roll feed-forward from the outer loop, added to the course law.
    pub roll_ff: T,
    /// Sample period for this tick.
    pub dt: T,
}

impl<T: Number> Input<T> {
    /// Checks the per-tick preconditions the control laws rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dt <= T::zero() {
            return Err(ConfigError::NonPositiveSamplePeriod);
        }
        Ok(())
    }
}

/// Actuator commands plus the intermediate commanded angles, rebuilt in full
/// every tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Output<T> {
    /// Aileron deflection.
    pub aileron: T,
    /// Elevator deflection.
    pub elevator: T,
    /// Rudder deflection.
    pub rudder: T,
    /// Throttle setting.
    pub throttle: T,
    /// Commanded roll angle the aileron deflection is tracking.
    pub roll_cmd: T,
    /// Commanded pitch angle the elevator deflection is tracking.
    pub pitch_cmd: T,
}

/// A trait for controllers that turn one tick's snapshots into actuator
/// commands.
///
/// The external tick driver holds the controller through this trait, calls
/// [`control`](FlightController::control) once per control period, and
/// publishes the returned [`Output`]. Calls must be serialized; the core
/// assumes at most one tick is in flight.
pub trait FlightController<T: Number> {
    /// Computes the actuator commands for one tick.
    fn control(&mut self, params: &Parameters<T>, input: &Input<T>) -> Output<T>;
}
