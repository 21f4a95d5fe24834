// src/state.rs

//! The aggregate owned by the control subsystem.
//!
//! Cascade stages are methods on [`FlightControlState`] and live in the
//! [`attitude`](crate::attitude) and [`altitude`](crate::altitude) modules.
//! Targets are written through the setters here, either directly by the
//! owning context or through a [`TargetMailbox`](crate::TargetMailbox).

use crate::{
    ControlChannel, FlightControlConfig, LowPassFilter, Pid, PidBank, Vector3,
    VELOCITY_FILTER_RETAIN,
};

/// Controllers, targets and filter state for the flight control loops.
pub struct FlightControlState {
    pub(crate) pids: PidBank<f32>,
    pub(crate) att_inner_target: Vector3<f32>,
    pub(crate) att_outer_target: Vector3<f32>,
    pub(crate) vel_inner_target: Vector3<f32>,
    #[cfg(feature = "position-hold")]
    pub(crate) alt_outer_target: f32,
    pub(crate) height_limit: f32,
    pub(crate) vel_z_filter: LowPassFilter,
}

impl FlightControlState {
    /// Creates the state and seeds every channel from `config`.
    pub fn new(config: &FlightControlConfig) -> Self {
        let mut state = Self {
            pids: PidBank::new(),
            att_inner_target: Vector3::default(),
            att_outer_target: Vector3::default(),
            vel_inner_target: Vector3::default(),
            #[cfg(feature = "position-hold")]
            alt_outer_target: 0.0,
            height_limit: config.height_limit,
            vel_z_filter: LowPassFilter::new(VELOCITY_FILTER_RETAIN),
        };
        state.configure(config);
        state
    }

    /// Seeds every channel's gains and limits and the height limit.
    /// Integrators are kept; see [`FlightControlState::reset_controllers`].
    pub fn configure(&mut self, config: &FlightControlConfig) {
        for channel in ControlChannel::ALL {
            self.pids[channel].configure(config.gains(channel));
        }
        self.height_limit = config.height_limit;
        debug!("flight control configured, height limit {}", self.height_limit);
    }

    /// Clears every integrator, derivative history and filter. Call on arming.
    pub fn reset_controllers(&mut self) {
        self.pids.reset_all();
        self.vel_z_filter.reset();
    }

    /// Resets the vertical velocity loop before the altitude cascade takes
    /// over the throttle.
    pub(crate) fn reset_altitude_loop(&mut self) {
        self.pids[ControlChannel::VelZ].reset();
        self.vel_z_filter.reset();
    }

    /// Controller for one channel.
    pub fn pid(&self, channel: ControlChannel) -> &Pid<f32> {
        &self.pids[channel]
    }

    /// Sets the rate target of the attitude inner loop.
    pub fn set_att_inner_target(&mut self, target: Vector3<f32>) {
        self.att_inner_target = target;
    }

    /// Sets the vertical velocity target of the altitude inner loop.
    pub fn set_alt_inner_target(&mut self, target: f32) {
        self.vel_inner_target.z = target;
    }

    /// Sets the angle target of the attitude outer loop.
    pub fn set_att_outer_target(&mut self, target: Vector3<f32>) {
        self.att_outer_target = target;
    }

    /// Rate target of the attitude inner loop.
    pub fn att_inner_target(&self) -> Vector3<f32> {
        self.att_inner_target
    }

    /// Vertical velocity target.
    pub fn alt_inner_target(&self) -> f32 {
        self.vel_inner_target.z
    }

    /// Angle target of the attitude outer loop.
    pub fn att_outer_target(&self) -> Vector3<f32> {
        self.att_outer_target
    }

    /// Maximum altitude.
    pub fn height_limit(&self) -> f32 {
        self.height_limit
    }
}
