//! Module: config
//!
//! Purpose: Fixed wiring and timing for the ESPlay gamepad.
//!
//! Pin Map:
//! GPIO |     Function      |      Notes
//! -----+-------------------+----------------------------------
//!  21  | I2C SDA           | PCF8574 expander, external + internal pull-up
//!  22  | I2C SCL           | 100 kHz
//!  34  | R shoulder        | Input-only, active LOW, no internal pull
//!  35  | Menu              | Input-only, active LOW, no internal pull
//!  36  | L shoulder        | Input-only, active LOW, no internal pull
//!
//! Pins are fixed by the typed peripherals in `hal::GamepadPeripherals`.
//!
//! Safety: Safe. Plain data.

use core::time::Duration;

/// 7-bit address of the PCF8574 (A2..A0 grounded).
pub const EXPANDER_ADDR: u8 = 0x20;

/// I2C clock.
pub const BUS_FREQ_HZ: u32 = 100_000;

/// Time between sampling cycles.
pub const SAMPLE_PERIOD_MS: u64 = 10;

/// Upper bound on one expander read.
pub const BUS_TIMEOUT_MS: u64 = 20;

/// Log the first bus failure and then one in this many.
pub const FAILURE_LOG_INTERVAL: u32 = 100;

/// Sampling task stack (bytes).
pub const TASK_STACK_SIZE: usize = 4096;

/// FreeRTOS priority of the sampling task.
pub const TASK_PRIORITY: u8 = 5;

/// Core the sampling task is pinned to.
pub const TASK_CORE: u8 = 1;

/// Gamepad bring-up parameters.
#[derive(Debug, Clone)]
pub struct GamepadConfig {
    pub expander_addr: u8,
    pub bus_freq_hz: u32,
    pub sample_period: Duration,
    pub bus_timeout: Duration,
    pub task_stack_size: usize,
    pub task_priority: u8,
    pub task_core: u8,
}

impl Default for GamepadConfig {
    fn default() -> Self {
        Self {
            expander_addr: EXPANDER_ADDR,
            bus_freq_hz: BUS_FREQ_HZ,
            sample_period: Duration::from_millis(SAMPLE_PERIOD_MS),
            bus_timeout: Duration::from_millis(BUS_TIMEOUT_MS),
            task_stack_size: TASK_STACK_SIZE,
            task_priority: TASK_PRIORITY,
            task_core: TASK_CORE,
        }
    }
}

impl GamepadConfig {
    /// Shortest time a press or release takes to show up.
    pub fn min_debounce_time(&self) -> Duration {
        self.sample_period * 2
    }
}
