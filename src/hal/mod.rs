//! Hardware Abstraction Layer for the ESPlay gamepad.
//!
//! Thin wrappers around ESP-IDF peripherals.
//! Business logic stays in core modules, HAL is just I/O and bring-up.

pub mod gpio;
pub mod i2c;
pub mod task;

pub use gpio::{button_pins, ButtonPin};
pub use i2c::{open_bus, BoundedI2c};
pub use task::PinnedThread;

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::{Gpio21, Gpio22, Gpio34, Gpio35, Gpio36};
use esp_idf_svc::hal::i2c::I2C0;

use crate::config::GamepadConfig;
use crate::error::InitError;
use crate::gamepad::Gamepad;
use crate::sampler::Sampler;
use crate::source::ExpanderReader;

/// Peripherals the gamepad takes ownership of.
pub struct GamepadPeripherals {
    pub i2c: I2C0,
    pub sda: Gpio21,
    pub scl: Gpio22,
    pub menu: Gpio35,
    pub l: Gpio36,
    pub r: Gpio34,
}

/// Bring up the bus and pins, then start the sampling task.
///
/// Call exactly once, before the first `read()`. A second call fails with
/// [`InitError::AlreadyInitialized`] before touching any hardware.
pub fn initialize(
    gamepad: &'static Gamepad,
    p: GamepadPeripherals,
    config: &GamepadConfig,
) -> Result<(), InitError> {
    if gamepad.is_claimed() {
        log::warn!("gamepad initialize() called twice");
        return Err(InitError::AlreadyInitialized);
    }

    let bus = open_bus(p.i2c, p.sda, p.scl, config)?;
    log::info!("I2C driver installed");

    let pins = button_pins(p.menu, p.l, p.r)?;

    let sampler = Sampler::new(ExpanderReader::new(bus, config.expander_addr), pins);
    gamepad.start(
        sampler,
        FreeRtos,
        config.sample_period,
        PinnedThread::from_config(config),
    )
}
