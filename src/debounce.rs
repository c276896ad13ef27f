//! Bit-parallel switch debouncer.
//!
//! Each channel owns a 2-bit down-counter. The counters are bit-sliced across
//! two masks, `low` and `high`, so one update handles all eight possible
//! channels with a fixed handful of bitwise operations and no loop.
//!
//! ```text
//! counter  high low
//!    3       1   1    stable, nothing pending
//!    2       1   0
//!    1       0   1
//!    0       0   0    threshold reached: flip the committed state
//! ```
//!
//! A channel whose sample agrees with its committed state is reloaded to 3.
//! A disagreeing channel counts down one step per sample, so a change is
//! accepted on the third consecutive disagreeing sample (30 ms at the
//! nominal 10 ms tick). The counter is reloaded as soon as it expires and
//! therefore never wraps below zero.

/// Consecutive disagreeing samples needed before a level change is accepted.
pub const DEBOUNCE_SAMPLES: u8 = 3;

/// Debounces up to eight channels at once.
///
/// Samples are "pressed" masks: a set bit means the raw line is at its
/// active level.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    low: u8,
    high: u8,
    /// Committed (debounced) level of every channel.
    state: u8,
}

impl Debouncer {
    /// All channels released, all counters at 3.
    pub const fn new() -> Self {
        Self {
            low: 0xFF,
            high: 0xFF,
            state: 0,
        }
    }

    /// Feed one raw sample and return the channels that just became pressed.
    ///
    /// Release transitions are debounced the same way but never reported.
    pub fn update(&mut self, raw: u8) -> u8 {
        let delta = raw ^ self.state;

        // One step down: 3 -> 2 -> 1 -> 0.
        let low = !self.low;
        let high = self.high & self.low;

        let expired = delta & !(low | high);
        let reload = !delta | expired;
        self.low = low | reload;
        self.high = high | reload;

        self.state ^= expired;
        expired & self.state
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
