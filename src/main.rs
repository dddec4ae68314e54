//! gamepad-demo: bring up the ESPlay buttons and log every change.
//!
//! Polls the published state every 100 ms, well below the 10 ms sampling
//! rate, so quick taps may be missed here while still being debounced
//! correctly by the sampler.

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::log::EspLogger;

use esplay_gamepad::hal::{self, GamepadPeripherals};
use esplay_gamepad::{Gamepad, GamepadConfig, GamepadState};

static GAMEPAD: Gamepad = Gamepad::new();

const POLL_MS: u32 = 100;

fn main() {
    esp_idf_svc::sys::link_patches();
    EspLogger::initialize_default();

    log::info!(
        "gamepad-demo {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    );

    let peripherals = match Peripherals::take() {
        Ok(p) => p,
        Err(e) => {
            log::error!("peripherals already taken: {}", e);
            return;
        }
    };

    let config = GamepadConfig::default();
    let pads = GamepadPeripherals {
        i2c: peripherals.i2c0,
        sda: peripherals.pins.gpio21,
        scl: peripherals.pins.gpio22,
        menu: peripherals.pins.gpio35,
        l: peripherals.pins.gpio36,
        r: peripherals.pins.gpio34,
    };

    if let Err(e) = hal::initialize(&GAMEPAD, pads, &config) {
        log::error!("gamepad init failed: {}", e);
        return;
    }

    let mut previous = GamepadState::RELEASED;
    let mut current = GamepadState::RELEASED;
    let mut last_failures = 0;

    loop {
        GAMEPAD.read(&mut current);

        let edges = current.edges(&previous);
        if !edges.is_empty() {
            log::info!("buttons {} (bits 0x{:03x})", current, current.bits());
        }
        previous = current;

        let stats = GAMEPAD.stats();
        if stats.bus_failures != last_failures {
            log::warn!(
                "expander {}: {} failed reads over {} cycles",
                if stats.bus_ok { "recovered" } else { "offline" },
                stats.bus_failures,
                stats.cycles
            );
            last_failures = stats.bus_failures;
        }

        FreeRtos::delay_ms(POLL_MS);
    }
}
