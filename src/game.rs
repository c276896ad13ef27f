//! The memory game state machine.
//!
//! Two actors drive a [`Game`]:
//!
//! - the **slow tick** calls [`Game::on_slow_tick`] to animate the lamps, play
//!   the pattern back and confirm the player's selection;
//! - the **main loop** calls [`Game::poll`] to consume debounced presses,
//!   start rounds and judge them.
//!
//! Each state belongs to one of them ([`State::is_timed`] /
//! [`State::is_polled`]); the other actor leaves it alone. `Starting` and
//! `GameOver` are the only states both look at, and there the slow tick
//! touches nothing but the lamps.

use crate::{
    channels::{
        INPUT_MASK,
        Indicator,
        Lamps,
        START_MASK,
    },
    edges::EdgeEvents,
    pattern::{
        Entropy,
        MAX_ROUND_LEN,
        MIN_ROUND_LEN,
        PatternGenerator,
        Sequence,
    },
};

/// Slow tick period while waiting for the start button.
pub const ATTRACT_PERIOD_MS: u64 = 400;
/// Slow tick period while the pattern plays back.
pub const PLAYBACK_PERIOD_MS: u64 = 300;
/// Slow tick period while a recorded selection blinks.
pub const SELECTION_PERIOD_MS: u64 = 100;

/// Lamp toggles that confirm a selection: two full on/off cycles.
const SELECTION_TOGGLES: u8 = 4;

/// Lamp that blinks after a lost round.
const FAILURE_INDICATOR: Indicator = Indicator::Red;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum State {
    /// All lamps blink until the start button is pressed.
    Starting,
    /// The pattern plays back, one symbol every other slow tick.
    ShowingPattern,
    /// Waiting for the player's next symbol.
    Recording,
    /// The symbol just recorded blinks as confirmation.
    BlinkingSelection,
    /// The failure lamp blinks until the start button is pressed.
    GameOver,
}

impl State {
    /// The slow tick acts in this state.
    pub const fn is_timed(self) -> bool {
        !matches!(self, Self::Recording)
    }

    /// The main loop consumes input in this state.
    pub const fn is_polled(self) -> bool {
        matches!(self, Self::Starting | Self::Recording | Self::GameOver)
    }
}

/// Slow tick period requested by the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum SlowPeriod {
    Attract,
    Playback,
    Selection,
}

impl SlowPeriod {
    pub const fn as_millis(self) -> u64 {
        match self {
            Self::Attract => ATTRACT_PERIOD_MS,
            Self::Playback => PLAYBACK_PERIOD_MS,
            Self::Selection => SELECTION_PERIOD_MS,
        }
    }
}

/// Number of symbols in the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct RoundLength(usize);

impl RoundLength {
    pub const MIN: Self = Self(MIN_ROUND_LEN);
    pub const MAX: Self = Self(MAX_ROUND_LEN);

    pub const fn get(self) -> usize {
        self.0
    }

    /// One symbol longer, wrapping past the maximum back to the minimum.
    pub fn advance(&mut self) {
        self.0 += 1;
        if self.0 > MAX_ROUND_LEN {
            self.0 = MIN_ROUND_LEN;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::MIN;
    }
}

impl Default for RoundLength {
    fn default() -> Self {
        Self::MIN
    }
}

pub struct Game {
    state: State,
    round: RoundLength,
    pattern: Sequence,
    entered: Sequence,
    /// Index into both sequences.
    cursor: usize,
    /// Playback: 0 on light ticks, 1 on dark ticks. Selection: toggles done.
    phase: u8,
    selection: Option<Indicator>,
    lamps: Lamps,
    period: SlowPeriod,
    generator: PatternGenerator,
}

impl Game {
    pub const fn new() -> Self {
        Self {
            state: State::Starting,
            round: RoundLength::MIN,
            pattern: Sequence::new(),
            entered: Sequence::new(),
            cursor: 0,
            phase: 0,
            selection: None,
            lamps: Lamps::OFF,
            period: SlowPeriod::Attract,
            generator: PatternGenerator::new(0),
        }
    }

    pub const fn state(&self) -> State {
        self.state
    }

    pub const fn lamps(&self) -> Lamps {
        self.lamps
    }

    pub const fn round_len(&self) -> RoundLength {
        self.round
    }

    /// Period the slow tick should run at right now.
    pub const fn slow_period(&self) -> SlowPeriod {
        self.period
    }

    /// The pattern of the round in progress.
    pub fn pattern(&self) -> &[Indicator] {
        self.pattern.as_slice()
    }

    /// Advance the time-paced states by one slow tick.
    pub fn on_slow_tick(&mut self, edges: &EdgeEvents) {
        match self.state {
            State::Starting => self.lamps.toggle_all(),
            State::ShowingPattern => self.show_next(edges),
            State::BlinkingSelection => self.confirm_selection(edges),
            State::GameOver => self.blink(FAILURE_INDICATOR),
            State::Recording => {}
        }
    }

    /// Consume pending presses for the input-driven states.
    pub fn poll(&mut self, edges: &EdgeEvents, entropy: &mut impl Entropy) {
        match self.state {
            State::Starting | State::GameOver => {
                if edges.check_and_clear(START_MASK) != 0 {
                    self.begin_round(edges, entropy.seed());
                }
            }
            State::Recording => self.record(edges),
            State::ShowingPattern | State::BlinkingSelection => {}
        }
    }

    fn begin_round(&mut self, edges: &EdgeEvents, seed: u32) {
        let len = self.round.get();
        self.generator.reseed(seed);
        self.generator.generate(&mut self.pattern, len);
        self.entered.reset(len);
        self.cursor = 0;
        self.phase = 0;
        self.selection = None;
        self.lamps.clear_all();
        edges.discard();
        self.period = SlowPeriod::Playback;
        self.state = State::ShowingPattern;
    }

    fn show_next(&mut self, edges: &EdgeEvents) {
        self.lamps.clear_all();

        if self.cursor >= self.pattern.len() {
            self.cursor = 0;
            edges.discard();
            self.state = State::Recording;
            return;
        }

        if self.phase == 0 {
            if let Some(symbol) = self.pattern.get(self.cursor) {
                self.lamps.set(symbol);
                self.cursor += 1;
            }
        }
        self.phase ^= 1;
    }

    fn record(&mut self, edges: &EdgeEvents) {
        if self.cursor >= self.entered.len() {
            self.judge();
            return;
        }

        let Some(symbol) = Indicator::from_channels(edges.check_and_clear(INPUT_MASK)) else {
            return;
        };
        self.entered.set(self.cursor, symbol);
        self.selection = Some(symbol);
        self.phase = 0;
        self.lamps.clear_all();
        self.period = SlowPeriod::Selection;
        self.state = State::BlinkingSelection;
    }

    fn confirm_selection(&mut self, edges: &EdgeEvents) {
        if let Some(symbol) = self.selection {
            self.blink(symbol);
            self.phase += 1;
            if self.phase < SELECTION_TOGGLES {
                return;
            }
        }

        self.lamps.clear_all();
        self.selection = None;
        edges.discard();
        self.cursor += 1;
        self.state = State::Recording;
    }

    fn judge(&mut self) {
        if self.entered == self.pattern {
            self.round.advance();
            self.state = State::Starting;
        } else {
            self.round.reset();
            self.state = State::GameOver;
        }
        self.cursor = 0;
        self.lamps.clear_all();
        self.period = SlowPeriod::Attract;
    }

    /// Toggle one lamp and keep every other lamp dark.
    fn blink(&mut self, indicator: Indicator) {
        let lit = self.lamps.is_lit(indicator);
        self.lamps.clear_all();
        if !lit {
            self.lamps.set(indicator);
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
