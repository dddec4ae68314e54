//! GPIO HAL for the directly wired buttons.
//!
//! GPIO34..39 on the ESP32 are input-only and have no internal pull
//! resistors; the board pulls them up externally.

use esp_idf_svc::hal::gpio::{AnyInputPin, Gpio34, Gpio35, Gpio36, Input, InputPin, PinDriver};

use crate::channel::PIN_CHANNELS;
use crate::error::InitError;
use crate::source::PinReader;

/// One configured button input.
pub type ButtonPin = PinDriver<'static, AnyInputPin, Input>;

/// Configure Menu, L and R as inputs, in [`crate::Channel::DIRECT`] order.
pub fn button_pins(
    menu: Gpio35,
    l: Gpio36,
    r: Gpio34,
) -> Result<PinReader<ButtonPin, PIN_CHANNELS>, InitError> {
    let menu = input(menu.downgrade_input())?;
    let l = input(l.downgrade_input())?;
    let r = input(r.downgrade_input())?;
    Ok(PinReader::new([menu, l, r]))
}

fn input(pin: AnyInputPin) -> Result<ButtonPin, InitError> {
    PinDriver::input(pin).map_err(|e| {
        log::error!("button pin config failed: {}", e);
        InitError::Pin
    })
}
