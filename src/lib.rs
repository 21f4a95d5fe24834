// src/lib.rs

//! # Cascaded Multirotor Flight Control Core
//!
//! This crate provides a `no_std`, no-alloc flight control core for
//! multirotors. It turns attitude, angular rate and vertical velocity
//! estimates into a roll, pitch, yaw and throttle command at a fixed
//! real-time rate.
//!
//! The control law is a set of nested PID loops:
//!
//! - an attitude cascade where the angle loop produces a rate target and the
//!   rate loop produces a torque-equivalent command per axis,
//! - a vertical velocity loop that produces an absolute throttle command
//!   around the hover trim,
//! - a mode gate that decides per axis whether the cascade or the pilot's
//!   sticks drive the loop,
//! - a periodic scheduler that measures the loop interval, runs one inner
//!   loop tick and forwards the result to the motor driver.
//!
//! Estimation, mixing, motor output, receiver decoding and flight mode
//! management are collaborators. They hand the core plain numeric vectors
//! and a [`FlightMode`].
//!
//! ## Example
//!
//! ```
//! use flight_control_core::{
//!     FlightControlConfig, FlightControlState, FlightMode, InnerLoopInputs, InnerLoopScheduler,
//!     MicrosClock, MotorCommand, MotorDriver, StickInput, Vector3,
//! };
//!
//! struct Clock(u64);
//! impl MicrosClock for Clock {
//!     fn now_us(&mut self) -> u64 {
//!         self.0 += 4_000;
//!         self.0
//!     }
//! }
//!
//! struct Motors(MotorCommand);
//! impl MotorDriver for Motors {
//!     fn command(&mut self, command: MotorCommand) {
//!         self.0 = command;
//!     }
//! }
//!
//! let mut fc = FlightControlState::new(&FlightControlConfig::new());
//! let mut scheduler = InnerLoopScheduler::new(Clock(0));
//! let mut motors = Motors(MotorCommand::default());
//!
//! let stick = StickInput { yaw_rate: 0.0, throttle: 1200.0 };
//! fc.attitude_outer_control(Vector3::new(0.0, 0.0, 0.0), FlightMode::Manual, stick);
//! let inputs = InnerLoopInputs {
//!     gyro: Vector3::new(0.0, 0.0, 0.0),
//!     vel_z: 0.0,
//!     mode: FlightMode::Manual,
//!     stick,
//! };
//! scheduler.tick(&mut fc, &inputs, &mut motors);
//! assert_eq!(1200.0, motors.0.throttle);
//! ```

#![no_std]
#![deny(missing_docs)]

#[macro_use]
mod fmt;

pub mod altitude;
pub mod attitude;
pub mod channel;
pub mod config;
pub mod error;
pub mod filter;
pub mod mailbox;
pub mod mode;
pub mod number;
pub mod pid;
pub mod scheduler;
pub mod state;
pub mod vector;

#[doc(inline)]
pub use altitude::*;
#[doc(inline)]
pub use attitude::*;
#[doc(inline)]
pub use channel::*;
#[doc(inline)]
pub use config::*;
#[doc(inline)]
pub use error::*;
#[doc(inline)]
pub use filter::*;
#[doc(inline)]
pub use mailbox::*;
#[doc(inline)]
pub use mode::*;
#[doc(inline)]
pub use number::*;
#[doc(inline)]
pub use pid::*;
#[doc(inline)]
pub use scheduler::*;
#[doc(inline)]
pub use state::*;
#[doc(inline)]
pub use vector::*;

#[cfg(test)]
mod test_utils;
