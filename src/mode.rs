// src/mode.rs

//! # Mode Gate
//!
//! Decides per axis whether the automatic cascade or the pilot's sticks drive
//! the loop. The whole policy is the table in [`FlightMode::policy`].

/// Flight mode supplied by the flight status manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlightMode {
    /// Sticks drive throttle and yaw rate directly.
    #[default]
    Manual,
    /// Altitude hold, stick yaw rate.
    SemiAuto,
    /// Altitude and position hold, stick yaw rate.
    Auto,
    /// Guidance supplied targets, including heading.
    Command,
    /// Returning to the home position.
    ReturnToHome,
    /// Automatic descent and landing.
    AutoLand,
}

/// Source of the throttle command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThrottleSource {
    /// Raw stick throttle, forwarded unchanged.
    Stick,
    /// Output of the vertical velocity loop.
    Altitude,
}

/// Source of the yaw outer loop error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum YawSource {
    /// Stick yaw rate scaled by the manual yaw rate gain.
    Stick,
    /// Angle error against the stored heading target.
    Heading,
}

/// Per-axis routing for one flight mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModePolicy {
    /// Where the throttle comes from.
    pub throttle: ThrottleSource,
    /// Where the yaw error comes from.
    pub yaw: YawSource,
}

impl FlightMode {
    /// Routing table for this mode.
    pub const fn policy(self) -> ModePolicy {
        use ThrottleSource as T;
        use YawSource as Y;

        let (throttle, yaw) = match self {
            FlightMode::Manual => (T::Stick, Y::Stick),
            FlightMode::SemiAuto | FlightMode::Auto => (T::Altitude, Y::Stick),
            FlightMode::Command | FlightMode::ReturnToHome | FlightMode::AutoLand => {
                (T::Altitude, Y::Heading)
            }
        };
        ModePolicy { throttle, yaw }
    }
}

/// Pilot stick inputs the mode gate may route into the loops.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StickInput {
    /// Requested yaw rate.
    pub yaw_rate: f32,
    /// Raw throttle, in motor driver units.
    pub throttle: f32,
}
