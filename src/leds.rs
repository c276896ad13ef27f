//! The three game indicators, drawn on the badge's WS2812 strip.
//!
//! The strip has 10 LEDs in two bars of five. Index 0 is bottom right and the
//! indices run counter clockwise, so 4 and 5 are the two top LEDs and 9 is
//! bottom left.
//!
//! ```text
//!   5 ── yellow ── 4
//!   6              3
//!   7  red  green  2
//!   8              1
//!   9              0
//! ```

use core::ops::Range;

use defmt::error;
use embassy_time::{
    Duration,
    Timer,
};
use esp_hal::{
    Blocking,
    gpio::Level,
    rmt::{
        PulseCode,
        Tx,
    },
};
use palette::Srgb;

use crate::channels::{
    Indicator,
    Lamps,
};

/// Number of WS2812 LEDs on the badge.
pub const LED_COUNT: usize = 10;

/// 24 bits per LED plus the end marker.
const PULSE_COUNT: usize = LED_COUNT * 24 + 1;

const DARK: Srgb<u8> = Srgb::new(0, 0, 0);

const fn region(indicator: Indicator) -> Range<usize> {
    match indicator {
        Indicator::Red => 6..10,
        Indicator::Yellow => 4..6,
        Indicator::Green => 0..4,
    }
}

const fn color(indicator: Indicator) -> Srgb<u8> {
    match indicator {
        Indicator::Red => Srgb::new(40, 0, 0),
        Indicator::Yellow => Srgb::new(30, 20, 0),
        Indicator::Green => Srgb::new(0, 40, 0),
    }
}

/// WS2812 strip driver.
///
/// [`show`](Leds::show) paints the frame buffer, [`update`](Leds::update)
/// sends it to the strip. Pulses are encoded into a fixed buffer, so nothing
/// is allocated per frame.
pub struct Leds<'a> {
    channel: Option<esp_hal::rmt::Channel<'a, Blocking, Tx>>,
    framebuffer: [Srgb<u8>; LED_COUNT],
    pulses: [PulseCode; PULSE_COUNT],
}

impl<'a> Leds<'a> {
    pub fn new(channel: esp_hal::rmt::Channel<'a, Blocking, Tx>) -> Self {
        Self {
            channel: Some(channel),
            framebuffer: [DARK; LED_COUNT],
            pulses: [PulseCode::default(); PULSE_COUNT],
        }
    }

    /// Paint the lit indicators; everything else goes dark.
    pub fn show(&mut self, lamps: Lamps) {
        self.framebuffer.fill(DARK);
        for indicator in Indicator::ALL {
            if lamps.is_lit(indicator) {
                self.framebuffer[region(indicator)].fill(color(indicator));
            }
        }
    }

    /// Flush the frame buffer to the physical LEDs.
    pub async fn update(&mut self) {
        let Some(channel) = self.channel.take() else {
            error!("RMT channel lost during previous transmission");
            return;
        };

        self.encode();

        let transaction = match channel.transmit(&self.pulses[..]) {
            Ok(t) => t,
            Err(e) => {
                error!("RMT transmit failed: {}", e);
                return;
            }
        };

        self.channel = Some(match transaction.wait() {
            Ok(ch) => ch,
            Err((err, ch)) => {
                error!("RMT transaction failed: {}", err);
                ch
            }
        });

        // WS2812 reset time
        Timer::after(Duration::from_micros(50)).await;
    }

    fn encode(&mut self) {
        let mut pulses = self.pulses.iter_mut();
        for color in &self.framebuffer {
            // WS2812 expects GRB byte order
            for byte in [color.green, color.red, color.blue] {
                for i in (0..8).rev() {
                    if let Some(pulse) = pulses.next() {
                        *pulse = Self::bit_to_pulse((byte >> i) & 1 != 0);
                    }
                }
            }
        }
        if let Some(end) = pulses.next() {
            *end = PulseCode::end_marker();
        }
    }

    /// WS2812 bit timing at 40 MHz RMT clock.
    const fn bit_to_pulse(bit: bool) -> PulseCode {
        if bit {
            // '1': 0.8 µs high (32 ticks), 0.45 µs low (18 ticks)
            PulseCode::new(Level::High, 32, Level::Low, 18)
        } else {
            // '0': 0.4 µs high (16 ticks), 0.85 µs low (34 ticks)
            PulseCode::new(Level::High, 16, Level::Low, 34)
        }
    }
}
