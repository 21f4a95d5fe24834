// src/pid/terms.rs

//! # Error-Driven PID Terms
//!
//! This module provides a compute function and control data structure
//! to evaluate the integral and derivative terms of a PID controller from
//! an externally computed error.

use crate::Number;
use piddiy::PidController;

/// Control data for the error-driven PID compute callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TermData<T> {
    /// Target minus measurement for this tick.
    pub error: T,
    /// The time delta since the last computation, in seconds.
    pub dt: T,
    /// The maximum magnitude of the integral accumulator. Zero disables it.
    pub integral_limit: T,
    /// Whether the controller holds an error from an earlier tick.
    pub has_previous: bool,
}

/// Accumulates `error * dt` and saturates the result at `limit`.
/// A non-positive (or NaN) `dt` leaves the accumulator unchanged.
pub fn integrate<T: Number>(integral: T, error: T, dt: T, limit: T) -> T {
    if !(T::zero() < dt) {
        return integral;
    }
    (integral + error * dt).clamp_magnitude(limit)
}

/// Rate of change of the error. Zero when there is no previous error or
/// when `dt` cannot be divided by.
pub fn differentiate<T: Number>(previous: T, error: T, dt: T, has_previous: bool) -> T {
    if !has_previous || !(T::zero() < dt) {
        return T::zero();
    }
    (error - previous) / dt
}

/// Error-driven PID compute callback.
pub fn compute_terms<T: Number>(
    pid: &mut PidController<T, TermData<T>>,
    data: TermData<T>,
) -> (T, T, T) {
    let integral = integrate(pid.integral, data.error, data.dt, data.integral_limit);
    let derivative = differentiate(pid.error, data.error, data.dt, data.has_previous);

    (data.error, integral, derivative)
}
