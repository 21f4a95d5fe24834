// src/filter.rs

//! Single pole low-pass filter for noisy estimates.

/// Exponential low-pass filter: `y = retain * y + (1 - retain) * x`.
///
/// The first sample seeds the state, so the output starts at the
/// measurement instead of ramping up from zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LowPassFilter {
    retain: f32,
    state: Option<f32>,
}

impl LowPassFilter {
    /// Creates a filter keeping `retain` of the previous output each sample.
    pub const fn new(retain: f32) -> Self {
        Self {
            retain,
            state: None,
        }
    }

    /// Feeds one sample and returns the filtered value.
    pub fn update(&mut self, sample: f32) -> f32 {
        let output = match self.state {
            Some(previous) => previous * self.retain + sample * (1.0 - self.retain),
            None => sample,
        };
        self.state = Some(output);
        output
    }

    /// Last filtered value, if any sample has been seen.
    pub fn value(&self) -> Option<f32> {
        self.state
    }

    /// Forgets the state. The next sample seeds the filter again.
    pub fn reset(&mut self) {
        self.state = None;
    }
}
