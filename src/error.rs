// src/error.rs

//! Errors reported when reviewing a tuning table.
//!
//! The control path never returns errors. It saturates instead.

use thiserror::Error;

use crate::ControlChannel;

/// Tuning table problems found by [`FlightControlConfig::validate`](crate::FlightControlConfig::validate).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A gain is NaN or infinite.
    #[error("non-finite gain on {0:?}")]
    NonFiniteGain(ControlChannel),

    /// An integral or output limit is negative or not finite.
    #[error("invalid clamp limit on {0:?}")]
    InvalidLimit(ControlChannel),

    /// The maximum altitude is not a positive finite value.
    #[error("invalid height limit")]
    InvalidHeightLimit,
}

/// Result alias for configuration review.
pub type ConfigResult<T> = Result<T, ConfigError>;
