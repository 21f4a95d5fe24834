// src/mailbox.rs

//! Atomic handoff of loop targets from another execution context.
//!
//! A guidance task or an interrupt handler running at its own cadence posts
//! whole targets here. The control context applies them to its
//! [`FlightControlState`] between ticks, so the loops never see a partially
//! written vector.
//!
//! ```
//! use flight_control_core::{FlightControlConfig, FlightControlState, TargetMailbox, Vector3};
//!
//! static TARGETS: TargetMailbox = TargetMailbox::new();
//!
//! // Guidance context.
//! TARGETS.post_att_outer_target(Vector3::new(0.0, 50.0, 900.0));
//!
//! // Control context, before the tick.
//! let mut fc = FlightControlState::new(&FlightControlConfig::new());
//! TARGETS.apply_to(&mut fc);
//! assert_eq!(Vector3::new(0.0, 50.0, 900.0), fc.att_outer_target());
//! ```

use core::cell::Cell;

use critical_section::Mutex;

use crate::{FlightControlState, Vector3};

/// Targets posted since the last [`TargetMailbox::apply_to`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingTargets {
    /// Rate target for the attitude inner loop.
    pub att_inner: Option<Vector3<f32>>,
    /// Angle target for the attitude outer loop.
    pub att_outer: Option<Vector3<f32>>,
    /// Vertical velocity target.
    pub alt_inner: Option<f32>,
}

/// Interrupt-safe holder for targets written outside the control context.
pub struct TargetMailbox {
    pending: Mutex<Cell<PendingTargets>>,
}

impl TargetMailbox {
    /// Creates an empty mailbox. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(PendingTargets {
                att_inner: None,
                att_outer: None,
                alt_inner: None,
            })),
        }
    }

    fn update(&self, f: impl FnOnce(&mut PendingTargets)) {
        critical_section::with(|cs| {
            let cell = self.pending.borrow(cs);
            let mut pending = cell.get();
            f(&mut pending);
            cell.set(pending);
        });
    }

    /// Posts a rate target for the attitude inner loop.
    pub fn post_att_inner_target(&self, target: Vector3<f32>) {
        self.update(|pending| pending.att_inner = Some(target));
    }

    /// Posts an angle target for the attitude outer loop.
    pub fn post_att_outer_target(&self, target: Vector3<f32>) {
        self.update(|pending| pending.att_outer = Some(target));
    }

    /// Posts a vertical velocity target.
    pub fn post_alt_inner_target(&self, target: f32) {
        self.update(|pending| pending.alt_inner = Some(target));
    }

    /// Removes and returns everything posted so far.
    pub fn take(&self) -> PendingTargets {
        critical_section::with(|cs| self.pending.borrow(cs).replace(PendingTargets::default()))
    }

    /// Writes every posted target into `fc` and empties the mailbox.
    pub fn apply_to(&self, fc: &mut FlightControlState) {
        let pending = self.take();
        if let Some(target) = pending.att_inner {
            fc.set_att_inner_target(target);
        }
        if let Some(target) = pending.att_outer {
            fc.set_att_outer_target(target);
        }
        if let Some(target) = pending.alt_inner {
            fc.set_alt_inner_target(target);
        }
    }
}

impl Default for TargetMailbox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlightControlConfig;

    /// Test that the latest post wins and untouched targets are kept.
    #[test]
    fn test_mailbox_latest_post_wins() {
        let mailbox = TargetMailbox::new();
        let mut fc = FlightControlState::new(&FlightControlConfig::new());
        fc.set_att_outer_target(Vector3::new(1.0, 1.0, 1.0));

        mailbox.post_att_inner_target(Vector3::new(10.0, 0.0, 0.0));
        mailbox.post_att_inner_target(Vector3::new(20.0, 5.0, -5.0));
        mailbox.post_alt_inner_target(-30.0);
        mailbox.apply_to(&mut fc);

        assert_eq!(Vector3::new(20.0, 5.0, -5.0), fc.att_inner_target());
        assert_eq!(-30.0, fc.alt_inner_target());
        assert_eq!(Vector3::new(1.0, 1.0, 1.0), fc.att_outer_target());
    }

    /// Test that applying empties the mailbox.
    #[test]
    fn test_mailbox_apply_empties() {
        let mailbox = TargetMailbox::new();
        mailbox.post_att_outer_target(Vector3::new(3.0, 2.0, 1.0));

        let mut fc = FlightControlState::new(&FlightControlConfig::new());
        mailbox.apply_to(&mut fc);
        assert_eq!(PendingTargets::default(), mailbox.take());

        fc.set_att_outer_target(Vector3::default());
        mailbox.apply_to(&mut fc);
        assert_eq!(Vector3::default(), fc.att_outer_target());
    }
}
