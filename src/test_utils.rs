// src/test_utils.rs

//! This module contains utilities for testing.

use crate::Vector3;

/// A constant defining the tolerance within which floating-point values
/// are considered close enough to be equal.
pub const TEST_TOLERANCE: f32 = 1e-5;

/// Tolerance for values in the hundreds or thousands, such as throttle,
/// where `TEST_TOLERANCE` is below the `f32` resolution.
pub const COARSE_TOLERANCE: f32 = 1e-3;

/// Checks if `value` is within `tolerance` of `target`.
pub fn value_within(target: f32, value: f32, tolerance: f32) -> bool {
    (target - value).abs() < tolerance
}

/// Checks if two floating point numbers are close enough to be considered
/// equal, using `TEST_TOLERANCE`.
pub fn value_close(target: f32, value: f32) -> bool {
    value_within(target, value, TEST_TOLERANCE)
}

/// Checks if each component of `value` is close to the matching component
/// of `target`, given as a (roll, pitch, yaw) tuple.
pub fn vector_close(target: (f32, f32, f32), value: Vector3<f32>) -> bool {
    value_close(target.0, value.x) && value_close(target.1, value.y) && value_close(target.2, value.z)
}
