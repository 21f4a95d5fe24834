// src/attitude.rs

//! # Attitude Cascade
//!
//! The outer stage turns the angle error into a rate target. The inner stage
//! turns the rate error into a torque-equivalent command per axis.
//!
//! The outer stage is driven by a collaborator at a rate at or below the
//! inner loop and hands its result over through the inner rate target.

use crate::{ControlChannel, FlightControlState, FlightMode, Number, StickInput, Vector3, YawSource};

/// Scale from outer loop gain units to rate target units.
pub const OUTER_LOOP_SCALE: f32 = 10.0;
/// Roll and pitch rate target limit.
pub const ROLL_PITCH_RATE_LIMIT: f32 = 300.0;
/// Yaw rate target limit.
pub const YAW_RATE_LIMIT: f32 = 150.0;
/// Yaw inner loop output limit, applied before the sign inversion.
pub const YAW_OUTPUT_LIMIT: f32 = 500.0;
/// Scale applied to the stick yaw rate when the sticks drive yaw.
pub const MANUAL_YAW_RATE_GAIN: f32 = 1.0;

impl FlightControlState {
    /// Attitude outer loop.
    ///
    /// Computes the angle error against the outer target, runs P-only control
    /// per axis, clamps the resulting rate targets and stores them as the
    /// inner loop target. The yaw error comes from the sticks or the heading
    /// target as the mode policy says. Returns the new rate target.
    pub fn attitude_outer_control(
        &mut self,
        angle: Vector3<f32>,
        mode: FlightMode,
        stick: StickInput,
    ) -> Vector3<f32> {
        let target = self.att_outer_target;
        let yaw_error = match mode.policy().yaw {
            YawSource::Stick => stick.yaw_rate * MANUAL_YAW_RATE_GAIN,
            YawSource::Heading => target.z - angle.z,
        };
        let angle_error = Vector3::new(target.x - angle.x, target.y - angle.y, yaw_error);

        let rate_target = Vector3::new(
            (self.pids[ControlChannel::RollOuter].proportional(angle_error.x) * OUTER_LOOP_SCALE)
                .clamp_magnitude(ROLL_PITCH_RATE_LIMIT),
            (self.pids[ControlChannel::PitchOuter].proportional(angle_error.y) * OUTER_LOOP_SCALE)
                .clamp_magnitude(ROLL_PITCH_RATE_LIMIT),
            (self.pids[ControlChannel::YawOuter].proportional(angle_error.z) * OUTER_LOOP_SCALE)
                .clamp_magnitude(YAW_RATE_LIMIT),
        );

        self.set_att_inner_target(rate_target);
        rate_target
    }

    /// Attitude inner loop.
    ///
    /// Runs full PID on the rate error of each axis. The yaw output is clamped
    /// and then negated, since yaw torque runs opposite to the measured yaw
    /// rate in the actuator mapping.
    pub fn attitude_inner_control(&mut self, gyro: Vector3<f32>, dt: f32) -> Vector3<f32> {
        let rate_error = self.att_inner_target - gyro;

        let roll = self.pids[ControlChannel::RollInner].output(rate_error.x, dt);
        let pitch = self.pids[ControlChannel::PitchInner].output(rate_error.y, dt);
        let yaw = self.pids[ControlChannel::YawInner].output(rate_error.z, dt);

        Vector3::new(roll, pitch, -yaw.clamp_magnitude(YAW_OUTPUT_LIMIT))
    }
}
