//! The two periodic ticks and the game loop.
//!
//! - [`sampler_task`] runs every [`SAMPLE_PERIOD_MS`], debounces the buttons
//!   and posts press edges to [`EDGES`].
//! - [`run_game`] owns the [`Game`]. It wakes on its slow ticker or on new
//!   edges, forwards ticks to [`Game::on_slow_tick`], then polls the game for
//!   input. The slow ticker is re-armed whenever the game asks for another
//!   period.

use defmt::{
    debug,
    info,
};
use embassy_futures::select::{
    Either,
    select,
};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    signal::Signal,
};
use embassy_time::{
    Duration,
    Instant,
    Ticker,
};

use crate::{
    Buttons,
    Debouncer,
    EdgeEvents,
    Game,
    Leds,
    SlowPeriod,
    State,
};

/// Button sampling period.
pub const SAMPLE_PERIOD_MS: u64 = 10;

/// Press edges not yet consumed by the game loop.
pub static EDGES: EdgeEvents = EdgeEvents::new();

/// Raised by the sampler whenever it posts an edge.
static INPUT: Signal<CriticalSectionRawMutex, ()> = Signal::new();

#[embassy_executor::task]
pub async fn sampler_task(buttons: &'static Buttons) {
    info!("Sampling buttons every {} ms", SAMPLE_PERIOD_MS);

    let mut debouncer = Debouncer::new();
    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_PERIOD_MS));
    loop {
        ticker.next().await;
        let pressed = debouncer.update(buttons.sample());
        if pressed != 0 {
            debug!("Pressed {=u8:b}", pressed);
            EDGES.post(pressed);
            INPUT.signal(());
        }
    }
}

/// Low bits of the free-running system timer, used to seed each round.
fn uptime() -> u32 {
    Instant::now().as_ticks() as u32
}

fn slow_ticker(period: SlowPeriod) -> Ticker {
    Ticker::every(Duration::from_millis(period.as_millis()))
}

/// Play forever.
pub async fn run_game(leds: &mut Leds<'_>) -> ! {
    let mut game = Game::new();
    let mut period = game.slow_period();
    let mut ticker = slow_ticker(period);
    let mut lamps = game.lamps();

    leds.show(lamps);
    leds.update().await;
    info!("Press START to play");

    loop {
        let before = game.state();

        if let Either::First(()) = select(ticker.next(), INPUT.wait()).await {
            game.on_slow_tick(&EDGES);
        }
        game.poll(&EDGES, &mut uptime);

        if game.state() != before {
            log_transition(before, &game);
        }

        if game.slow_period() != period {
            period = game.slow_period();
            ticker = slow_ticker(period);
        }

        if game.lamps() != lamps {
            lamps = game.lamps();
            leds.show(lamps);
            leds.update().await;
        }
    }
}

fn log_transition(before: State, game: &Game) {
    let after = game.state();
    debug!("{} -> {}", before, after);

    match after {
        State::ShowingPattern => {
            info!("Round of {} symbols", game.round_len().get());
            debug!("Pattern: {}", game.pattern());
        }
        State::Starting => {
            info!("Round won, next round has {} symbols", game.round_len().get());
        }
        State::GameOver => info!("Round lost, press START to try again"),
        _ => {}
    }
}
