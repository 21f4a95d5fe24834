// src/vector.rs

//! Three axis value type used to pass measurements and targets around.

use core::ops::Sub;

/// A roll/pitch/yaw or x/y/z triple.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3<T> {
    /// Roll axis or x component.
    pub x: T,
    /// Pitch axis or y component.
    pub y: T,
    /// Yaw axis or z component.
    pub z: T,
}

impl<T> Vector3<T> {
    /// Creates a vector from its components.
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: Sub<Output = T>> Sub for Vector3<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl<T> From<(T, T, T)> for Vector3<T> {
    fn from((x, y, z): (T, T, T)) -> Self {
        Self { x, y, z }
    }
}
