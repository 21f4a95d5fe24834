// src/scheduler.rs

//! # Periodic Scheduler
//!
//! Entry point of the hard real-time inner loop. Every call to
//! [`InnerLoopScheduler::tick`] measures the time since the previous call,
//! runs the attitude inner loop, runs the altitude inner loop when the mode
//! gate hands it the throttle, and forwards one command to the motor driver.
//!
//! The attitude outer loop and the altitude outer loop are not run from here.
//! Their owners write the targets this loop reads.

use num_traits::float::FloatCore;

use crate::{FlightControlState, FlightMode, StickInput, ThrottleSource, Vector3};

/// Longest interval fed to the loops, in seconds. Longer gaps are clamped.
pub const MAX_DELTA_T: f32 = 0.1;

/// Relative interval deviation from the nominal period that gets logged.
pub const TIMING_DEVIATION_WARN: f32 = 0.3;

/// Monotonic microsecond time source.
pub trait MicrosClock {
    /// Current time in microseconds.
    fn now_us(&mut self) -> u64;
}

/// Motor mixing and output stage.
pub trait MotorDriver {
    /// Takes one roll, pitch, yaw and throttle command.
    fn command(&mut self, command: MotorCommand);
}

/// Command handed to the motor driver once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorCommand {
    /// Roll torque command.
    pub roll: f32,
    /// Pitch torque command.
    pub pitch: f32,
    /// Yaw torque command.
    pub yaw: f32,
    /// Absolute throttle command.
    pub throttle: f32,
}

/// Collaborator outputs consumed on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InnerLoopInputs {
    /// Angular rate from the gyro.
    pub gyro: Vector3<f32>,
    /// Vertical velocity from navigation.
    pub vel_z: f32,
    /// Current flight mode.
    pub mode: FlightMode,
    /// Pilot sticks.
    pub stick: StickInput,
}

/// Measures loop timing and runs one inner loop tick per call.
pub struct InnerLoopScheduler<C: MicrosClock> {
    clock: C,
    previous_us: Option<u64>,
    nominal_dt: Option<f32>,
    throttle_source: Option<ThrottleSource>,
}

impl<C: MicrosClock> InnerLoopScheduler<C> {
    /// Creates a scheduler reading `clock`.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            previous_us: None,
            nominal_dt: None,
            throttle_source: None,
        }
    }

    /// Creates a scheduler that logs intervals far from `nominal_dt` seconds.
    pub fn with_nominal_period(clock: C, nominal_dt: f32) -> Self {
        Self {
            nominal_dt: Some(nominal_dt),
            ..Self::new(clock)
        }
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the clock.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Forgets the previous timestamp and throttle source, so the next tick
    /// behaves like the first one.
    pub fn restart(&mut self) {
        self.previous_us = None;
        self.throttle_source = None;
    }

    /// Seconds since the previous call. Zero on the first call and when the
    /// clock runs backwards; clamped to [`MAX_DELTA_T`].
    fn delta_t(&mut self) -> f32 {
        let now = self.clock.now_us();
        let Some(previous) = self.previous_us.replace(now) else {
            trace!("inner loop first tick at {} us", now);
            return 0.0;
        };

        let dt = now.saturating_sub(previous) as f32 * 1e-6;
        if let Some(nominal_dt) = self.nominal_dt {
            if FloatCore::abs(dt - nominal_dt) > nominal_dt * TIMING_DEVIATION_WARN {
                warn!(
                    "inner loop timing deviation: expected {} us, got {} us",
                    (nominal_dt * 1e6) as u32,
                    (dt * 1e6) as u32
                );
            }
        }
        if dt > MAX_DELTA_T {
            warn!("inner loop gap of {} us clamped", (dt * 1e6) as u32);
            return MAX_DELTA_T;
        }
        dt
    }

    /// Runs one inner loop tick and forwards the command to `motor`.
    pub fn tick<M: MotorDriver>(
        &mut self,
        fc: &mut FlightControlState,
        inputs: &InnerLoopInputs,
        motor: &mut M,
    ) -> MotorCommand {
        let dt = self.delta_t();

        let attitude = fc.attitude_inner_control(inputs.gyro, dt);

        let policy = inputs.mode.policy();
        if self.throttle_source != Some(policy.throttle) {
            debug!("throttle source {} in mode {}", policy.throttle, inputs.mode);
            if policy.throttle == ThrottleSource::Altitude {
                fc.reset_altitude_loop();
            }
            self.throttle_source = Some(policy.throttle);
        }
        let throttle = match policy.throttle {
            ThrottleSource::Stick => inputs.stick.throttle,
            ThrottleSource::Altitude => fc.altitude_inner_control(inputs.vel_z, dt),
        };

        let command = MotorCommand {
            roll: attitude.x,
            pitch: attitude.y,
            yaw: attitude.z,
            throttle,
        };
        motor.command(command);
        command
    }
}
