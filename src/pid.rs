// src/pid.rs

//! # PID Control Module
//!
//! This module provides the compute callback and the per-channel controller
//! used by every loop of the flight control core.

pub mod controller;
pub use controller::*;
pub mod terms;
pub use terms::*;
