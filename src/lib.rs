//! # simon-badge
//!
//! "Repeat the pattern" memory game for the Disobey 2026 badge.
//!
//! The badge plays a random sequence on three indicators (red, yellow and
//! green, drawn on the WS2812 strip), and the player repeats it on D-pad
//! left, up and right. Every win makes the next round one symbol longer.
//!
//! The crate is split in two layers:
//!
//! - **Game core** ([`channels`], [`debounce`], [`edges`], [`pattern`],
//!   [`game`]): plain `no_std` logic with no allocation and no hardware
//!   access. It builds on any target and is unit tested on the host.
//! - **Board glue** (`board`, `buttons`, `leds`, `scheduler`): pin
//!   assignments, the WS2812 driver and the embassy tasks that drive the
//!   core. Only compiled for the badge.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let peripherals = simon_badge::init();
//! let resources = simon_badge::split_resources!(peripherals);
//!
//! let buttons = mk_static!(Buttons, resources.buttons.into());
//! spawner.must_spawn(scheduler::sampler_task(buttons));
//!
//! let mut leds: Leds = resources.leds.into();
//! scheduler::run_game(&mut leds).await
//! ```

#![cfg_attr(not(test), no_std)]

pub mod channels;
pub mod debounce;
pub mod edges;
pub mod game;
pub mod pattern;

#[cfg(target_os = "none")]
mod board;
#[cfg(target_os = "none")]
mod buttons;
#[cfg(target_os = "none")]
mod leds;
#[cfg(target_os = "none")]
pub mod scheduler;

#[cfg(target_os = "none")]
pub use board::*;
#[cfg(target_os = "none")]
pub use buttons::Buttons;
pub use channels::{
    Indicator,
    Lamps,
};
pub use debounce::Debouncer;
pub use edges::EdgeEvents;
pub use game::{
    Game,
    RoundLength,
    SlowPeriod,
    State,
};
#[cfg(target_os = "none")]
pub use leds::{
    LED_COUNT,
    Leds,
};
pub use pattern::{
    Entropy,
    PatternGenerator,
    Sequence,
};
