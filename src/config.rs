// src/config.rs

//! Startup tuning table for every control channel.

use crate::{ConfigError, ConfigResult, ControlChannel, PidGains};

/// Default maximum altitude, in the same units as the altitude estimate.
pub const DEFAULT_HEIGHT_LIMIT: f32 = 10_000.0;

/// Gains and limits for every channel plus the altitude ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlightControlConfig {
    gains: [PidGains<f32>; ControlChannel::COUNT],
    /// Maximum altitude the position loop may target.
    pub height_limit: f32,
}

impl FlightControlConfig {
    /// Creates the stock tuning table.
    ///
    /// Example Usage
    /// ```
    /// use flight_control_core::{ControlChannel, FlightControlConfig, PidGains};
    ///
    /// let mut config = FlightControlConfig::new();
    ///
    /// // Soften the roll rate loop.
    /// config.set_gains(
    ///     ControlChannel::RollInner,
    ///     PidGains::new(0.15, 0.4, 0.015, 250.0, 50.0),
    /// );
    /// config.height_limit = 5_000.0;
    ///
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new() -> Self {
        use ControlChannel::*;

        let mut config = Self {
            gains: [PidGains::default(); ControlChannel::COUNT],
            height_limit: DEFAULT_HEIGHT_LIMIT,
        };

        config.set_gains(RollInner, PidGains::new(0.2, 0.5, 0.018, 250.0, 50.0));
        config.set_gains(PitchInner, PidGains::new(0.2, 0.5, 0.02, 300.0, 50.0));
        config.set_gains(YawInner, PidGains::new(1.5, 1.5, 0.0, 150.0, 50.0));

        config.set_gains(RollOuter, PidGains::new(3.0, 0.0, 0.0, 0.0, 0.0));
        config.set_gains(PitchOuter, PidGains::new(3.0, 0.0, 0.0, 0.0, 0.0));
        config.set_gains(YawOuter, PidGains::new(1.5, 0.0, 0.0, 0.0, 0.0));

        config.set_gains(VelX, PidGains::new(2.0, 0.8, 0.0, 50.0, 30.0));
        config.set_gains(VelY, PidGains::new(2.0, 0.8, 0.0, 50.0, 30.0));
        config.set_gains(VelZ, PidGains::new(2.0, 0.8, 0.01, 250.0, 30.0));

        config.set_gains(PosX, PidGains::new(1.5, 0.0, 0.0, 0.0, 0.0));
        config.set_gains(PosY, PidGains::new(1.5, 0.0, 0.0, 0.0, 0.0));
        config.set_gains(PosZ, PidGains::new(2.5, 0.0, 0.0, 0.0, 0.0));

        config
    }

    /// Gains for one channel.
    pub fn gains(&self, channel: ControlChannel) -> PidGains<f32> {
        self.gains[channel.index()]
    }

    /// Replaces the gains for one channel.
    pub fn set_gains(&mut self, channel: ControlChannel, gains: PidGains<f32>) -> &mut Self {
        self.gains[channel.index()] = gains;
        self
    }

    /// Reviews the table for values the control loop cannot use.
    ///
    /// The loop itself does not call this; a bad table is a tuning mistake to
    /// catch before flight.
    pub fn validate(&self) -> ConfigResult<()> {
        for channel in ControlChannel::ALL {
            let gains = self.gains(channel);
            if ![gains.kp, gains.ki, gains.kd].iter().all(|g| g.is_finite()) {
                return Err(ConfigError::NonFiniteGain(channel));
            }
            if ![gains.integral_limit, gains.output_limit]
                .iter()
                .all(|l| l.is_finite() && *l >= 0.0)
            {
                return Err(ConfigError::InvalidLimit(channel));
            }
        }
        if !(self.height_limit.is_finite() && self.height_limit > 0.0) {
            return Err(ConfigError::InvalidHeightLimit);
        }
        Ok(())
    }
}

impl Default for FlightControlConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that the stock table matches the documented tuning.
    #[test]
    fn test_config_stock_table() {
        let config = FlightControlConfig::new();
        assert_eq!(
            PidGains::new(0.2, 0.5, 0.018, 250.0, 50.0),
            config.gains(ControlChannel::RollInner)
        );
        assert_eq!(
            PidGains::new(0.2, 0.5, 0.02, 300.0, 50.0),
            config.gains(ControlChannel::PitchInner)
        );
        assert_eq!(
            PidGains::new(2.0, 0.8, 0.01, 250.0, 30.0),
            config.gains(ControlChannel::VelZ)
        );
        assert_eq!(
            PidGains::new(2.5, 0.0, 0.0, 0.0, 0.0),
            config.gains(ControlChannel::PosZ)
        );
        assert_eq!(10_000.0, config.height_limit);
        assert_eq!(Ok(()), config.validate());
    }

    /// Test that negative limits are reported.
    #[test]
    fn test_config_validate_negative_limit() {
        let mut config = FlightControlConfig::new();
        config.set_gains(
            ControlChannel::YawInner,
            PidGains::new(1.5, 1.5, 0.0, -1.0, 50.0),
        );
        assert_eq!(
            Err(ConfigError::InvalidLimit(ControlChannel::YawInner)),
            config.validate()
        );
    }

    /// Test that non-finite gains are reported.
    #[test]
    fn test_config_validate_non_finite_gain() {
        let mut config = FlightControlConfig::new();
        config.set_gains(
            ControlChannel::PosX,
            PidGains::new(f32::NAN, 0.0, 0.0, 0.0, 0.0),
        );
        assert_eq!(
            Err(ConfigError::NonFiniteGain(ControlChannel::PosX)),
            config.validate()
        );
    }

    /// Test that the height limit must be positive.
    #[test]
    fn test_config_validate_height_limit() {
        let mut config = FlightControlConfig::new();
        config.height_limit = 0.0;
        assert_eq!(Err(ConfigError::InvalidHeightLimit), config.validate());
    }
}
