//! Raw button readers.
//!
//! Two disjoint sources feed the debouncer:
//! - [`ExpanderReader`]: one byte from the PCF8574 over I2C, bit i = channel i
//! - [`PinReader`]: one GPIO per remaining channel
//!
//! Both are active-low in hardware. Readers invert before returning, so
//! downstream code always sees `true` = pressed.
//!
//! Readers never block past the bus driver's own timeout and never
//! propagate errors: a failed read means "nothing pressed" for that cycle.

use embedded_hal::digital::InputPin;
use embedded_hal::i2c::I2c;

use crate::channel::EXPANDER_CHANNELS;
use crate::config::FAILURE_LOG_INTERVAL;

/// Expander byte meaning "no buttons pressed".
pub const IDLE_PORT: u8 = 0xFF;

/// Active-low byte → pressed flags, bit i → `[i]`.
#[inline]
pub fn decode_port(port: u8) -> [bool; EXPANDER_CHANNELS] {
    let mut pressed = [false; EXPANDER_CHANNELS];
    for (i, p) in pressed.iter_mut().enumerate() {
        *p = (port >> i) & 1 == 0;
    }
    pressed
}

/// PCF8574 quasi-bidirectional port read.
///
/// A plain one-byte read returns the pin levels; no register addressing.
pub struct ExpanderReader<B> {
    bus: B,
    address: u8,
    failures: u32,
    last_ok: bool,
}

impl<B: I2c> ExpanderReader<B> {
    pub fn new(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            failures: 0,
            last_ok: true,
        }
    }

    /// Read the raw port byte.
    ///
    /// Returns [`IDLE_PORT`] if the transaction fails.
    pub fn read_port(&mut self) -> u8 {
        let mut buf = [IDLE_PORT];
        match self.bus.read(self.address, &mut buf) {
            Ok(()) => {
                self.last_ok = true;
                buf[0]
            }
            Err(e) => {
                self.last_ok = false;
                self.failures = self.failures.wrapping_add(1);
                // First failure, then one in FAILURE_LOG_INTERVAL
                if self.failures.wrapping_sub(1) % FAILURE_LOG_INTERVAL == 0 {
                    log::error!(
                        "expander read at 0x{:02x} failed ({} total): {:?}",
                        self.address,
                        self.failures,
                        e
                    );
                }
                IDLE_PORT
            }
        }
    }

    /// Read and decode: `true` = pressed.
    #[inline]
    pub fn read(&mut self) -> [bool; EXPANDER_CHANNELS] {
        decode_port(self.read_port())
    }

    /// Failed reads since creation.
    #[inline]
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Whether the most recent read succeeded.
    #[inline]
    pub fn last_ok(&self) -> bool {
        self.last_ok
    }

    /// Give back the bus.
    pub fn release(self) -> B {
        self.bus
    }
}

/// Directly wired, active-low buttons.
///
/// Slot order matches [`crate::Channel::DIRECT`].
pub struct PinReader<P, const M: usize> {
    pins: [P; M],
}

impl<P: InputPin, const M: usize> PinReader<P, M> {
    pub fn new(pins: [P; M]) -> Self {
        Self { pins }
    }

    /// Sample every pin: low = pressed. A pin that reports an error
    /// reads as released.
    pub fn read(&mut self) -> [bool; M] {
        let mut pressed = [false; M];
        for (pin, out) in self.pins.iter_mut().zip(pressed.iter_mut()) {
            *out = pin.is_low().unwrap_or(false);
        }
        pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    struct FixedBus(Result<u8, ErrorKind>);

    impl ErrorType for FixedBus {
        type Error = ErrorKind;
    }

    impl I2c for FixedBus {
        fn transaction(&mut self, _address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
            let byte = self.0?;
            for op in operations.iter_mut() {
                if let Operation::Read(buf) = op {
                    buf.fill(byte);
                }
            }
            Ok(())
        }
    }

    struct Level(bool);

    impl embedded_hal::digital::ErrorType for Level {
        type Error = Infallible;
    }

    impl InputPin for Level {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.0)
        }
    }

    #[test]
    fn test_decode_active_low() {
        let pressed = decode_port(0b1111_1010);
        assert_eq!(pressed, [true, false, true, false, false, false, false, false]);
        assert_eq!(decode_port(IDLE_PORT), [false; 8]);
        assert_eq!(decode_port(0x00), [true; 8]);
    }

    #[test]
    fn test_expander_success() {
        let mut reader = ExpanderReader::new(FixedBus(Ok(0xFE)), 0x20);
        assert_eq!(reader.read_port(), 0xFE);
        assert!(reader.last_ok());
        assert_eq!(reader.failures(), 0);
    }

    #[test]
    fn test_expander_failure_reads_idle() {
        let mut reader = ExpanderReader::new(FixedBus(Err(ErrorKind::Other)), 0x20);
        assert_eq!(reader.read(), [false; 8]);
        assert!(!reader.last_ok());
        assert_eq!(reader.failures(), 1);

        for _ in 0..250 {
            reader.read_port();
        }
        assert_eq!(reader.failures(), 251);
    }

    #[test]
    fn test_release_returns_bus() {
        let reader = ExpanderReader::new(FixedBus(Ok(0x7F)), 0x20);
        let FixedBus(byte) = reader.release();
        assert_eq!(byte, Ok(0x7F));
    }

    #[test]
    fn test_pins_active_low() {
        let mut pins = PinReader::new([Level(false), Level(true), Level(false)]);
        assert_eq!(pins.read(), [true, false, true]);
    }
}
