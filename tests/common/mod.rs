//! Host-side mocks for the expander bus, button pins, delay and spawner.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital;
use embedded_hal::i2c::{self, ErrorType, I2c, NoAcknowledgeSource, Operation};

use esplay_gamepad::{
    Channel, ExpanderReader, Gamepad, GamepadState, PinReader, Sampler, SpawnError, TaskSpawner,
};

pub const ADDR: u8 = 0x20;

struct BusLine {
    port: AtomicU8,
    fail: AtomicBool,
    reads: AtomicU32,
}

/// PCF8574 stand-in. Clones share the same port byte.
#[derive(Clone)]
pub struct MockBus {
    line: Arc<BusLine>,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            line: Arc::new(BusLine {
                port: AtomicU8::new(0xFF),
                fail: AtomicBool::new(false),
                reads: AtomicU32::new(0),
            }),
        }
    }

    /// Drive the raw (active-low) port byte.
    pub fn set_port(&self, port: u8) {
        self.line.port.store(port, Ordering::SeqCst);
    }

    /// Hold exactly these expander channels down.
    pub fn hold(&self, channels: &[Channel]) {
        let mut port = 0xFFu8;
        for ch in channels {
            port &= !(1 << ch.index());
        }
        self.set_port(port);
    }

    pub fn set_failing(&self, fail: bool) {
        self.line.fail.store(fail, Ordering::SeqCst);
    }

    pub fn reads(&self) -> u32 {
        self.line.reads.load(Ordering::SeqCst)
    }
}

impl ErrorType for MockBus {
    type Error = i2c::ErrorKind;
}

impl I2c for MockBus {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        self.line.reads.fetch_add(1, Ordering::SeqCst);
        if address != ADDR || self.line.fail.load(Ordering::SeqCst) {
            return Err(i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        let port = self.line.port.load(Ordering::SeqCst);
        for op in operations.iter_mut() {
            if let Operation::Read(buf) = op {
                buf.fill(port);
            }
        }
        Ok(())
    }
}

struct PinLine {
    low: AtomicBool,
    broken: AtomicBool,
}

/// Active-low button pin. Clones share the same level.
#[derive(Clone)]
pub struct MockPin {
    line: Arc<PinLine>,
}

impl MockPin {
    pub fn new() -> Self {
        Self {
            line: Arc::new(PinLine {
                low: AtomicBool::new(false),
                broken: AtomicBool::new(false),
            }),
        }
    }

    pub fn press(&self, pressed: bool) {
        self.line.low.store(pressed, Ordering::SeqCst);
    }

    pub fn set_broken(&self, broken: bool) {
        self.line.broken.store(broken, Ordering::SeqCst);
    }
}

impl digital::ErrorType for MockPin {
    type Error = digital::ErrorKind;
}

impl digital::InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        if self.line.broken.load(Ordering::SeqCst) {
            return Err(digital::ErrorKind::Other);
        }
        Ok(self.line.low.load(Ordering::SeqCst))
    }
}

/// Handles to everything a test sampler reads from.
pub struct Rig {
    pub bus: MockBus,
    /// Menu, L, R
    pub pins: [MockPin; 3],
}

impl Rig {
    pub fn new() -> Self {
        Self {
            bus: MockBus::new(),
            pins: [MockPin::new(), MockPin::new(), MockPin::new()],
        }
    }

    pub fn sampler(&self) -> Sampler<MockBus, MockPin> {
        Sampler::new(
            ExpanderReader::new(self.bus.clone(), ADDR),
            PinReader::new(self.pins.clone()),
        )
    }

    pub fn pin(&self, channel: Channel) -> &MockPin {
        let slot = Channel::DIRECT
            .iter()
            .position(|c| *c == channel)
            .expect("not a direct channel");
        &self.pins[slot]
    }
}

/// `DelayNs` on top of `std::thread::sleep`.
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

/// Detached `std::thread`.
pub struct StdSpawner;

impl TaskSpawner for StdSpawner {
    fn spawn<F>(self, task: F) -> Result<(), SpawnError>
    where
        F: FnOnce() + Send + 'static,
    {
        std::thread::Builder::new()
            .name("input_task".into())
            .spawn(task)
            .map(|_| ())
            .map_err(|_| SpawnError)
    }
}

/// Refuses every spawn, like a FreeRTOS heap with no room for a stack.
pub struct FailingSpawner;

impl TaskSpawner for FailingSpawner {
    fn spawn<F>(self, _task: F) -> Result<(), SpawnError>
    where
        F: FnOnce() + Send + 'static,
    {
        Err(SpawnError)
    }
}

pub fn leak_gamepad() -> &'static Gamepad {
    Box::leak(Box::new(Gamepad::new()))
}

/// Poll `read()` until `pred` holds or the timeout expires.
pub fn wait_for(gamepad: &Gamepad, timeout: Duration, pred: impl Fn(&GamepadState) -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    let mut state = GamepadState::RELEASED;
    while Instant::now() < deadline {
        gamepad.read(&mut state);
        if pred(&state) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    false
}
