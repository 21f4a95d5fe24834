// src/channel.rs

//! Control channels and the fixed bank of PID controllers behind them.

use core::ops::{Index, IndexMut};

use crate::{Number, Pid};

/// One axis of one loop tier. Each channel owns exactly one PID controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlChannel {
    /// Roll rate loop.
    RollInner,
    /// Pitch rate loop.
    PitchInner,
    /// Yaw rate loop.
    YawInner,
    /// Roll angle loop.
    RollOuter,
    /// Pitch angle loop.
    PitchOuter,
    /// Yaw angle loop.
    YawOuter,
    /// X velocity loop.
    VelX,
    /// Y velocity loop.
    VelY,
    /// Vertical velocity loop.
    VelZ,
    /// X position loop.
    PosX,
    /// Y position loop.
    PosY,
    /// Altitude loop.
    PosZ,
}

impl ControlChannel {
    /// Number of channels.
    pub const COUNT: usize = 12;

    /// Every channel, in index order.
    pub const ALL: [ControlChannel; ControlChannel::COUNT] = [
        ControlChannel::RollInner,
        ControlChannel::PitchInner,
        ControlChannel::YawInner,
        ControlChannel::RollOuter,
        ControlChannel::PitchOuter,
        ControlChannel::YawOuter,
        ControlChannel::VelX,
        ControlChannel::VelY,
        ControlChannel::VelZ,
        ControlChannel::PosX,
        ControlChannel::PosY,
        ControlChannel::PosZ,
    ];

    /// Position of the channel in a [`PidBank`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Fixed-size table of PID controllers indexed by [`ControlChannel`].
pub struct PidBank<T: Number> {
    pids: [Pid<T>; ControlChannel::COUNT],
}

impl<T: Number> PidBank<T> {
    /// Creates a bank of unconfigured controllers.
    pub fn new() -> Self {
        Self {
            pids: core::array::from_fn(|_| Pid::new()),
        }
    }

    /// Resets every controller.
    pub fn reset_all(&mut self) {
        self.pids.iter_mut().for_each(Pid::reset);
    }
}

impl<T: Number> Default for PidBank<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Number> Index<ControlChannel> for PidBank<T> {
    type Output = Pid<T>;

    fn index(&self, channel: ControlChannel) -> &Pid<T> {
        &self.pids[channel.index()]
    }
}

impl<T: Number> IndexMut<ControlChannel> for PidBank<T> {
    fn index_mut(&mut self, channel: ControlChannel) -> &mut Pid<T> {
        &mut self.pids[channel.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PidGains;

    /// Test that every channel maps to its own slot.
    #[test]
    fn test_channel_indices_are_unique_and_dense() {
        for (i, channel) in ControlChannel::ALL.iter().enumerate() {
            assert_eq!(i, channel.index(), "{:?} is out of order.", channel);
        }
    }

    /// Test that channels address independent controllers.
    #[test]
    fn test_bank_channels_are_independent() {
        let mut bank = PidBank::<f32>::new();
        bank[ControlChannel::VelZ].configure(PidGains::new(2.0, 0.8, 0.01, 250.0, 30.0));

        assert_eq!(2.0, bank[ControlChannel::VelZ].gains().kp);
        assert_eq!(0.0, bank[ControlChannel::VelY].gains().kp);
        assert_eq!(0.0, bank[ControlChannel::PosZ].gains().kp);
    }

    /// Test that reset_all clears every integrator.
    #[test]
    fn test_bank_reset_all() {
        let mut bank = PidBank::<f32>::new();
        for channel in ControlChannel::ALL {
            bank[channel].configure(PidGains::new(0.0, 1.0, 0.0, 0.0, 0.0));
            let _ = bank[channel].integral(1.0, 1.0);
        }
        bank.reset_all();
        for channel in ControlChannel::ALL {
            assert_eq!(0.0, bank[channel].integrator());
        }
    }
}
