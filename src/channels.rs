//! Button channels and indicator lamps.
//!
//! Every input line gets a bit in a `u8` mask, so the debouncer and the edge
//! store can handle all of them with plain bitwise operations. The three game
//! buttons share their index with the indicator they play.

/// Number of sampled button channels.
pub const CHANNEL_COUNT: usize = 4;

/// Channel of the button that plays the red symbol (D-pad left).
pub const RED_CHANNEL: u8 = 0;
/// Channel of the button that plays the yellow symbol (D-pad up).
pub const YELLOW_CHANNEL: u8 = 1;
/// Channel of the button that plays the green symbol (D-pad right).
pub const GREEN_CHANNEL: u8 = 2;
/// Channel of the start button.
pub const START_CHANNEL: u8 = 3;

/// Channels that record a symbol while the player reproduces the pattern.
pub const INPUT_MASK: u8 = (1 << RED_CHANNEL) | (1 << YELLOW_CHANNEL) | (1 << GREEN_CHANNEL);
/// Channel that starts a round.
pub const START_MASK: u8 = 1 << START_CHANNEL;

/// One of the three indicators, and the symbol it stands for in a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Indicator {
    Red,
    Yellow,
    Green,
}

impl Indicator {
    /// Size of the symbol alphabet.
    pub const COUNT: usize = 3;

    pub const ALL: [Self; Self::COUNT] = [Self::Red, Self::Yellow, Self::Green];

    /// Indicator for a symbol index, `None` outside the alphabet.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Red),
            1 => Some(Self::Yellow),
            2 => Some(Self::Green),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Indicator played by the lowest set channel of `mask`.
    ///
    /// Only the game channels count; the start channel has no indicator.
    pub const fn from_channels(mask: u8) -> Option<Self> {
        let mask = mask & INPUT_MASK;
        if mask == 0 {
            return None;
        }
        Self::from_index(mask.trailing_zeros() as usize)
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Which indicators are lit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct Lamps(u8);

impl Lamps {
    pub const OFF: Self = Self(0);
    pub const ALL: Self = Self((1 << Indicator::COUNT) - 1);

    pub const fn is_lit(self, indicator: Indicator) -> bool {
        self.0 & indicator.bit() != 0
    }

    pub const fn is_off(self) -> bool {
        self.0 == 0
    }

    pub fn set(&mut self, indicator: Indicator) {
        self.0 |= indicator.bit();
    }

    pub fn clear(&mut self, indicator: Indicator) {
        self.0 &= !indicator.bit();
    }

    pub fn toggle(&mut self, indicator: Indicator) {
        self.0 ^= indicator.bit();
    }

    /// Toggle every indicator together.
    ///
    /// Lamps that are out of step are brought back in step: a partly lit set
    /// goes fully dark.
    pub fn toggle_all(&mut self) {
        *self = if self.is_off() { Self::ALL } else { Self::OFF };
    }

    pub fn clear_all(&mut self) {
        self.0 = 0;
    }
}
