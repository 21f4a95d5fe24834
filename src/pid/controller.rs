// src/pid/controller.rs

//! # Channel PID Controller
//!
//! A PID controller for a single control channel. The terms can be
//! evaluated together through [`Pid::output`] or one at a time when a loop
//! needs to shape a term before summing, as the altitude loop does with its
//! derivative.
//!
//! The integral and derivative terms mutate the controller. Evaluating the
//! same term twice in one tick counts that tick twice.

use crate::pid::{compute_terms, differentiate, integrate, TermData};
use crate::Number;
use piddiy::PidController;

/// Gains and limits for one PID channel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PidGains<T> {
    /// Proportional gain.
    pub kp: T,
    /// Integral gain.
    pub ki: T,
    /// Derivative gain.
    pub kd: T,
    /// Magnitude limit of the integral accumulator. Zero disables it.
    pub integral_limit: T,
    /// Magnitude limit of the combined output. Zero disables it.
    pub output_limit: T,
}

impl<T> PidGains<T> {
    /// Creates a gain set.
    pub const fn new(kp: T, ki: T, kd: T, integral_limit: T, output_limit: T) -> Self {
        Self {
            kp,
            ki,
            kd,
            integral_limit,
            output_limit,
        }
    }
}

/// PID controller for one control channel.
pub struct Pid<T: Number> {
    controller: PidController<T, TermData<T>>,
    gains: PidGains<T>,
    has_previous: bool,
}

impl<T: Number> Pid<T> {
    /// Creates a controller using the provided gains.
    pub fn with_gains(gains: PidGains<T>) -> Self {
        let mut controller = PidController::new();
        controller
            .compute_fn(compute_terms)
            .kp(gains.kp)
            .ki(gains.ki)
            .kd(gains.kd);

        Pid {
            controller,
            gains,
            has_previous: false,
        }
    }

    /// Creates a controller with all gains and limits at zero.
    pub fn new() -> Self {
        let zero = T::zero();
        Self::with_gains(PidGains::new(zero, zero, zero, zero, zero))
    }

    /// Replaces gains and limits. The integrator and the previous error are kept;
    /// call [`Pid::reset`] for a clean start.
    pub fn configure(&mut self, gains: PidGains<T>) {
        self.controller.kp(gains.kp).ki(gains.ki).kd(gains.kd);
        self.gains = gains;
    }

    /// Current gains and limits.
    pub fn gains(&self) -> PidGains<T> {
        self.gains
    }

    /// Clears the integrator and forgets the previous error.
    pub fn reset(&mut self) {
        self.controller.integral = T::zero();
        self.controller.error = T::zero();
        self.has_previous = false;
    }

    /// Accumulated integral, before the integral gain is applied.
    pub fn integrator(&self) -> T {
        self.controller.integral
    }

    /// `kp * error`.
    pub fn proportional(&self, error: T) -> T {
        self.gains.kp * error
    }

    /// Adds `error * dt` to the integrator, saturating at the integral limit,
    /// and returns the accumulator scaled by `ki`.
    pub fn integral(&mut self, error: T, dt: T) -> T {
        let integral = integrate(
            self.controller.integral,
            error,
            dt,
            self.gains.integral_limit,
        );
        self.controller.integral = integral;
        self.gains.ki * integral
    }

    /// `kd * (error - previous) / dt`, zero on the first sample or when `dt`
    /// is not positive. Records `error` as the previous error.
    pub fn derivative(&mut self, error: T, dt: T) -> T {
        let derivative = differentiate(self.controller.error, error, dt, self.has_previous);
        self.controller.error = error;
        self.has_previous = true;
        self.gains.kd * derivative
    }

    /// Sum of all three terms, clamped to the output limit.
    pub fn output(&mut self, error: T, dt: T) -> T {
        let data = TermData {
            error,
            dt,
            integral_limit: self.gains.integral_limit,
            has_previous: self.has_previous,
        };
        let output = self.controller.compute(data);
        self.has_previous = true;
        output.clamp_magnitude(self.gains.output_limit)
    }
}

impl<T: Number> Default for Pid<T> {
    fn default() -> Self {
        Self::new()
    }
}
