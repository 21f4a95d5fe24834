// src/altitude.rs

//! # Altitude and Vertical Velocity Cascade
//!
//! The inner stage turns the vertical velocity error into an absolute
//! throttle command around the hover trim.
//!
//! The outer altitude stage is only compiled with the `position-hold`
//! feature. Nothing in the periodic scheduler calls it; a guidance task that
//! wants altitude hold has to run it and let it write the velocity target.

use crate::{ControlChannel, FlightControlState, Number};

/// Hover throttle midpoint added to the velocity loop output.
pub const HOVER_THROTTLE: f32 = 1000.0;
/// Upper bound of the throttle command. The lower bound is zero.
pub const MAX_THROTTLE: f32 = 2.0 * HOVER_THROTTLE;
/// Limit of the derivative contribution to the throttle.
pub const ALT_DERIVATIVE_LIMIT: f32 = 300.0;
/// Share of the previous filtered vertical velocity kept on every sample.
pub const VELOCITY_FILTER_RETAIN: f32 = 0.992;
/// Limit of the climb rate target produced by the altitude loop.
#[cfg(feature = "position-hold")]
pub const MAX_CLIMB_RATE: f32 = 300.0;

impl FlightControlState {
    /// Vertical velocity inner loop.
    ///
    /// Low-pass filters `vel_z`, then sums the P and I terms, the D term
    /// clamped on its own, and the hover trim. The sum is clamped to
    /// `[0, MAX_THROTTLE]`.
    pub fn altitude_inner_control(&mut self, vel_z: f32, dt: f32) -> f32 {
        let vel_lpf = self.vel_z_filter.update(vel_z);
        let vel_error = self.vel_inner_target.z - vel_lpf;

        let pid = &mut self.pids[ControlChannel::VelZ];
        let mut throttle = pid.proportional(vel_error);
        throttle += pid.integral(vel_error, dt);
        throttle += pid
            .derivative(vel_error, dt)
            .clamp_magnitude(ALT_DERIVATIVE_LIMIT);
        throttle += HOVER_THROTTLE;

        Number::clamp(throttle, 0.0, MAX_THROTTLE)
    }
}

#[cfg(feature = "position-hold")]
impl FlightControlState {
    /// Sets the altitude target of the outer altitude loop.
    pub fn set_alt_outer_target(&mut self, altitude: f32) {
        self.alt_outer_target = altitude;
    }

    /// Altitude target of the outer altitude loop.
    pub fn alt_outer_target(&self) -> f32 {
        self.alt_outer_target
    }

    /// Altitude outer loop.
    ///
    /// P-only control of the altitude error, with the target capped at the
    /// height limit. The climb rate target is clamped and written as the
    /// vertical velocity target.
    pub fn altitude_outer_control(&mut self, altitude: f32) -> f32 {
        let target = if self.alt_outer_target > self.height_limit {
            self.height_limit
        } else {
            self.alt_outer_target
        };
        let climb_rate = self.pids[ControlChannel::PosZ]
            .proportional(target - altitude)
            .clamp_magnitude(MAX_CLIMB_RATE);

        self.set_alt_inner_target(climb_rate);
        climb_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use crate::{FlightControlConfig, PidGains};

    fn state() -> FlightControlState {
        FlightControlState::new(&FlightControlConfig::new())
    }

    /// Test that zero error gives exactly the hover trim.
    #[test]
    fn test_altitude_zero_error_is_trim() {
        let mut fc = state();
        for _ in 0..10 {
            assert_eq!(HOVER_THROTTLE, fc.altitude_inner_control(0.0, 0.01));
        }
    }

    /// Test the throttle against hand computed terms.
    #[test]
    fn test_altitude_specific_output() {
        let mut fc = state();
        fc.set_alt_inner_target(100.0);

        // Filter seeds at 20, so the error is 80.
        // P = 2.0 * 80, I = 0.8 * 80 * 0.01, no derivative history.
        let throttle = fc.altitude_inner_control(20.0, 0.01);
        assert!(value_within(1160.64, throttle, COARSE_TOLERANCE), "Throttle was {}", throttle);

        // Same error, so the integrator doubles and D stays zero.
        let throttle = fc.altitude_inner_control(20.0, 0.01);
        assert!(value_within(1161.28, throttle, COARSE_TOLERANCE), "Throttle was {}", throttle);
    }

    /// Test that the vertical velocity is filtered before the error.
    #[test]
    fn test_altitude_velocity_filtered() {
        let mut fc = state();
        let _ = fc.altitude_inner_control(0.0, 0.0);
        let throttle = fc.altitude_inner_control(100.0, 0.0);

        // Filtered velocity is 0.8, only P acts with a zero time step.
        assert!(
            value_within(HOVER_THROTTLE - 1.6, throttle, COARSE_TOLERANCE),
            "Throttle was {}",
            throttle
        );
    }

    /// Test that the derivative contribution is clamped on its own.
    #[test]
    fn test_altitude_derivative_clamped() {
        let mut config = FlightControlConfig::new();
        config.set_gains(
            ControlChannel::VelZ,
            PidGains::new(2.0, 0.8, 10.0, 250.0, 30.0),
        );
        let mut fc = FlightControlState::new(&config);
        let _ = fc.altitude_inner_control(0.0, 0.01);

        fc.set_alt_inner_target(100.0);
        let throttle = fc.altitude_inner_control(0.0, 0.01);
        // P = 200, I = 0.8 * 1, D = 10 * 100 / 0.01 clamped to 300.
        assert!(value_within(1500.8, throttle, COARSE_TOLERANCE), "Throttle was {}", throttle);

        fc.set_alt_inner_target(-100.0);
        let throttle = fc.altitude_inner_control(0.0, 0.01);
        // P = -200, I = 0.8 * (1 - 1), D clamped to -300.
        assert!(value_within(500.0, throttle, COARSE_TOLERANCE), "Throttle was {}", throttle);
    }

    /// Test that the throttle stays within its range.
    #[test]
    fn test_altitude_throttle_bounded() {
        let mut fc = state();
        for target in [-1.0e5, -2000.0, 0.0, 2000.0, 1.0e5] {
            fc.set_alt_inner_target(target);
            for _ in 0..20 {
                let throttle = fc.altitude_inner_control(0.0, 0.01);
                assert!(
                    (0.0..=MAX_THROTTLE).contains(&throttle),
                    "Throttle was {}",
                    throttle
                );
            }
        }
    }

    /// Test that the altitude loop respects the height limit.
    #[cfg(feature = "position-hold")]
    #[test]
    fn test_altitude_outer_height_limit() {
        let mut config = FlightControlConfig::new();
        config.height_limit = 1_000.0;
        let mut fc = FlightControlState::new(&config);

        fc.set_alt_outer_target(5_000.0);
        let climb_rate = fc.altitude_outer_control(990.0);
        // Target capped at 1000, so 2.5 * 10.
        assert!(value_close(25.0, climb_rate));
        assert_eq!(climb_rate, fc.alt_inner_target());

        let climb_rate = fc.altitude_outer_control(0.0);
        assert!(value_close(MAX_CLIMB_RATE, climb_rate));
    }
}
