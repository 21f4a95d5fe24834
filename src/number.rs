// src/number.rs

//! Numeric requirements shared by the controllers.

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

    /// Clamps the value to `[-limit, limit]`.
    /// A limit of zero or less disables the clamp.
    fn clamp_magnitude(self, limit: Self) -> Self {
        if Self::zero() < limit {
            Number::clamp(self, -limit, limit)
        } else {
            self
        }
    }
}

impl<T: PiddiyNumber> Number for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use fixed::types::I16F16;

    /// Test that an in-range value passes through unchanged.
    #[test]
    fn test_clamp_magnitude_in_range_is_identity() {
        for value in [-299.5_f32, -1.0, 0.0, 0.25, 300.0] {
            assert_eq!(value, value.clamp_magnitude(300.0));
            assert_eq!(value, value.clamp_magnitude(300.0).clamp_magnitude(300.0));
        }
    }

    /// Test that out-of-range values saturate at the limit.
    #[test]
    fn test_clamp_magnitude_saturates() {
        assert_eq!(150.0, 151.0_f32.clamp_magnitude(150.0));
        assert_eq!(-150.0, (-1.0e9_f32).clamp_magnitude(150.0));
    }

    /// Test that a zero limit disables the clamp.
    #[test]
    fn test_clamp_magnitude_zero_limit_disabled() {
        assert_eq!(12_345.0, 12_345.0_f32.clamp_magnitude(0.0));
        assert_eq!(-7.5, (-7.5_f32).clamp_magnitude(0.0));
    }

    /// Test the clamp on a fixed point type.
    #[test]
    fn test_clamp_magnitude_fixed() {
        let limit = I16F16::from_num(50);
        assert_eq!(limit, I16F16::from_num(80).clamp_magnitude(limit));
        assert_eq!(-limit, I16F16::from_num(-80).clamp_magnitude(limit));
        assert_eq!(
            I16F16::from_num(3),
            I16F16::from_num(3).clamp_magnitude(limit)
        );
    }
}
