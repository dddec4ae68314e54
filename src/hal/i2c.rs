//! I2C bus for the PCF8574 expander.
//!
//! The embedded-hal impl on `I2cDriver` waits forever. The expander sits
//! on a connector and can vanish, so every transfer here carries the
//! configured tick timeout instead.

use core::time::Duration;

use embedded_hal::i2c::{ErrorType, I2c, Operation};
use esp_idf_svc::hal::delay::TickType;
use esp_idf_svc::hal::gpio::{Gpio21, Gpio22};
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver, I2cError, I2C0};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::TickType_t;

use crate::config::GamepadConfig;
use crate::error::InitError;

/// `I2cDriver` with a bounded timeout on every transfer.
pub struct BoundedI2c<'d> {
    driver: I2cDriver<'d>,
    timeout: TickType_t,
}

impl<'d> BoundedI2c<'d> {
    pub fn new(driver: I2cDriver<'d>, timeout: Duration) -> Self {
        Self {
            driver,
            timeout: TickType::from(timeout).ticks(),
        }
    }
}

impl ErrorType for BoundedI2c<'_> {
    type Error = I2cError;
}

impl I2c for BoundedI2c<'_> {
    fn read(&mut self, address: u8, read: &mut [u8]) -> Result<(), Self::Error> {
        self.driver
            .read(address, read, self.timeout)
            .map_err(I2cError::other)
    }

    fn write(&mut self, address: u8, write: &[u8]) -> Result<(), Self::Error> {
        self.driver
            .write(address, write, self.timeout)
            .map_err(I2cError::other)
    }

    fn write_read(&mut self, address: u8, write: &[u8], read: &mut [u8]) -> Result<(), Self::Error> {
        self.driver
            .write_read(address, write, read, self.timeout)
            .map_err(I2cError::other)
    }

    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations.iter_mut() {
            match op {
                Operation::Read(buf) => self.read(address, buf)?,
                Operation::Write(buf) => self.write(address, buf)?,
            }
        }
        Ok(())
    }
}

/// Install the I2C master driver with internal pull-ups enabled.
pub fn open_bus(
    i2c: I2C0,
    sda: Gpio21,
    scl: Gpio22,
    config: &GamepadConfig,
) -> Result<BoundedI2c<'static>, InitError> {
    let bus_config = I2cConfig::new()
        .baudrate(Hertz(config.bus_freq_hz))
        .sda_enable_pullup(true)
        .scl_enable_pullup(true);

    let driver = I2cDriver::new(i2c, sda, scl, &bus_config).map_err(|e| {
        log::error!("I2C driver install failed: {}", e);
        InitError::Bus
    })?;

    Ok(BoundedI2c::new(driver, config.bus_timeout))
}
