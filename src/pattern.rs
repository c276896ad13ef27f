//! Pattern sequences and the generator that fills them.

use crate::channels::Indicator;

/// Shortest round, and the length every new game starts at.
pub const MIN_ROUND_LEN: usize = 3;
/// Longest round; one more win wraps back to [`MIN_ROUND_LEN`].
pub const MAX_ROUND_LEN: usize = 15;

/// Seed used when the entropy source reads zero (xorshift's fixed point).
const FALLBACK_SEED: u32 = 0x2545_F491;

/// Source of a seed for the next round.
///
/// On the badge this is the free-running system timer; any `FnMut() -> u32`
/// will do for tests.
pub trait Entropy {
    fn seed(&mut self) -> u32;
}

impl<F: FnMut() -> u32> Entropy for F {
    fn seed(&mut self) -> u32 {
        self()
    }
}

/// xorshift32. Cheap and good enough for a toy game.
#[derive(Clone, Copy, Debug)]
struct Rng(u32);

impl Rng {
    const fn new(seed: u32) -> Self {
        if seed == 0 {
            Self(FALLBACK_SEED)
        } else {
            Self(seed)
        }
    }

    fn next(&mut self) -> u32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        self.0
    }

    fn range(&mut self, max: u32) -> u32 {
        self.next() % max
    }
}

/// Fixed-capacity run of symbols, sized for the longest round.
#[derive(Clone, Copy, Debug)]
pub struct Sequence {
    symbols: [Indicator; MAX_ROUND_LEN],
    len: usize,
}

impl Sequence {
    pub const fn new() -> Self {
        Self {
            symbols: [Indicator::Red; MAX_ROUND_LEN],
            len: 0,
        }
    }

    /// Start over with `len` placeholder symbols, clamped to the capacity.
    pub fn reset(&mut self, len: usize) {
        self.len = len.min(MAX_ROUND_LEN);
        self.symbols = [Indicator::Red; MAX_ROUND_LEN];
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Symbol at `index`, or `None` once the sequence is exhausted.
    pub fn get(&self, index: usize) -> Option<Indicator> {
        self.as_slice().get(index).copied()
    }

    /// Overwrite the symbol at `index`. Indices past the end are rejected.
    pub fn set(&mut self, index: usize, symbol: Indicator) -> bool {
        match self.symbols[..self.len].get_mut(index) {
            Some(slot) => {
                *slot = symbol;
                true
            }
            None => false,
        }
    }

    pub fn as_slice(&self) -> &[Indicator] {
        &self.symbols[..self.len]
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Sequence {}

/// Produces the pattern for each round.
#[derive(Clone, Copy, Debug)]
pub struct PatternGenerator {
    rng: Rng,
}

impl PatternGenerator {
    pub const fn new(seed: u32) -> Self {
        Self { rng: Rng::new(seed) }
    }

    pub fn reseed(&mut self, seed: u32) {
        self.rng = Rng::new(seed);
    }

    /// Fill `sequence` with `len` independent, uniformly drawn symbols.
    ///
    /// `len` is clamped to the sequence capacity.
    pub fn generate(&mut self, sequence: &mut Sequence, len: usize) {
        sequence.reset(len);
        for slot in &mut sequence.symbols[..sequence.len] {
            let index = self.rng.range(Indicator::COUNT as u32) as usize;
            *slot = Indicator::ALL[index];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length_for_every_round() {
        let mut generator = PatternGenerator::new(0xC0FF_EE00);
        let mut sequence = Sequence::new();
        for len in MIN_ROUND_LEN..=MAX_ROUND_LEN {
            generator.generate(&mut sequence, len);
            assert_eq!(sequence.len(), len);
            assert!(sequence.as_slice().iter().all(|s| s.index() < Indicator::COUNT));
        }
    }

    #[test]
    fn length_is_clamped_to_capacity() {
        let mut generator = PatternGenerator::new(7);
        let mut sequence = Sequence::new();
        generator.generate(&mut sequence, MAX_ROUND_LEN + 5);
        assert_eq!(sequence.len(), MAX_ROUND_LEN);
    }

    #[test]
    fn same_seed_same_pattern() {
        let mut a = Sequence::new();
        let mut b = Sequence::new();
        PatternGenerator::new(1234).generate(&mut a, MAX_ROUND_LEN);
        PatternGenerator::new(1234).generate(&mut b, MAX_ROUND_LEN);
        assert_eq!(a, b);

        let mut generator = PatternGenerator::new(99);
        generator.reseed(1234);
        generator.generate(&mut b, MAX_ROUND_LEN);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_seed_still_varies() {
        let mut sequence = Sequence::new();
        PatternGenerator::new(0).generate(&mut sequence, MAX_ROUND_LEN);
        let first = sequence.as_slice()[0];
        assert!(sequence.as_slice().iter().any(|&s| s != first));
    }

    #[test]
    fn all_symbols_show_up() {
        let mut generator = PatternGenerator::new(42);
        let mut sequence = Sequence::new();
        let mut seen = [false; Indicator::COUNT];
        for _ in 0..20 {
            generator.generate(&mut sequence, MAX_ROUND_LEN);
            for s in sequence.as_slice() {
                seen[s.index()] = true;
            }
        }
        assert_eq!(seen, [true; Indicator::COUNT]);
    }

    #[test]
    fn out_of_range_access_is_rejected() {
        let mut sequence = Sequence::new();
        sequence.reset(3);
        assert!(sequence.set(2, Indicator::Green));
        assert!(!sequence.set(3, Indicator::Green));
        assert_eq!(sequence.get(2), Some(Indicator::Green));
        assert_eq!(sequence.get(3), None);
        assert_eq!(sequence.get(usize::MAX), None);
    }

    #[test]
    fn closures_are_entropy_sources() {
        let mut counter = 10u32;
        let mut source = || {
            counter += 1;
            counter
        };
        assert_eq!(source.seed(), 11);
        assert_eq!(source.seed(), 12);
    }
}
