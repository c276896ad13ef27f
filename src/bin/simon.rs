//! Memory game firmware.
//!
//! - START begins a round; all lamps blink while the badge waits for it
//! - Watch the pattern, then repeat it with LEFT (red), UP (yellow) and
//!   RIGHT (green)
//! - Each win adds a symbol, a mistake blinks red until START is pressed

#![no_std]
#![no_main]

use defmt::info;
#[allow(clippy::wildcard_imports)]
use simon_badge::*;
use embassy_executor::Spawner;
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = simon_badge::init();
    let resources = split_resources!(peripherals);

    // Only the runtime allocates; the game itself never does.
    esp_alloc::heap_allocator!(size: 16 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let buttons = mk_static!(Buttons, resources.buttons.into());
    spawner.must_spawn(scheduler::sampler_task(buttons));

    let mut leds: Leds<'static> = resources.leds.into();
    info!("Simon ready");

    scheduler::run_game(&mut leds).await
}
