//! Module: sampler
//!
//! Purpose: The periodic sampling task. Pulls raw samples from both
//! readers, runs the debouncer and publishes the result.
//!
//! Architecture:
//! - Owns the readers and the debounce registers; nothing else touches them
//! - Keeps its own copy of the last published state (it is the only writer,
//!   so the copy always equals what the store holds)
//! - `cycle()` is one iteration and is what the tests drive
//! - `run()` loops forever; there is no shutdown path
//!
//! Safety: Safe. Takes the store lock once per cycle, for one copy.

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use embedded_hal::i2c::I2c;

use crate::channel::{Channel, Source, CHANNEL_COUNT, PIN_CHANNELS};
use crate::debounce::Debouncer;
use crate::source::{ExpanderReader, PinReader};
use crate::state::{GamepadState, StateStore};
use crate::stats::InputStats;

pub struct Sampler<B, P> {
    expander: ExpanderReader<B>,
    pins: PinReader<P, PIN_CHANNELS>,
    debouncer: Debouncer<CHANNEL_COUNT>,
    published: GamepadState,
}

impl<B: I2c, P: InputPin> Sampler<B, P> {
    pub fn new(expander: ExpanderReader<B>, pins: PinReader<P, PIN_CHANNELS>) -> Self {
        Self {
            expander,
            pins,
            debouncer: Debouncer::new(),
            published: GamepadState::RELEASED,
        }
    }

    /// Replace the debouncer (e.g. to start from a known history).
    pub fn with_debouncer(mut self, debouncer: Debouncer<CHANNEL_COUNT>) -> Self {
        self.debouncer = debouncer;
        self
    }

    /// One raw sample per channel, `true` = pressed.
    pub fn sample_raw(&mut self) -> [bool; CHANNEL_COUNT] {
        let bus = self.expander.read();
        let pins = self.pins.read();

        let mut raw = [false; CHANNEL_COUNT];
        for ch in Channel::ALL {
            raw[ch.index()] = match ch.source() {
                Source::Expander { bit } => bus[bit as usize],
                Source::Pin { slot } => pins[slot as usize],
            };
        }
        raw
    }

    /// Run one sampling cycle and publish the result.
    pub fn cycle(&mut self, store: &StateStore, stats: &InputStats) -> GamepadState {
        // 1. Age history
        self.debouncer.shift();

        // 2. Pull raw samples
        let raw = self.sample_raw();

        // 3. Debounce, ambiguous channels carry the last published value
        let mut next = self.published;
        self.debouncer.apply(&raw, next.as_mut_array());

        // 4. Publish
        store.publish(&next);
        self.published = next;

        stats.record_cycle(self.expander.failures(), self.expander.last_ok());
        next
    }

    /// Sample forever, sleeping `period` between cycles.
    pub fn run<D: DelayNs>(
        mut self,
        store: &StateStore,
        stats: &InputStats,
        mut delay: D,
        period: Duration,
    ) -> ! {
        let period_ms = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        log::info!("sampling every {} ms", period_ms);

        loop {
            self.cycle(store, stats);
            delay.delay_ms(period_ms);
        }
    }

    /// Last state this sampler published.
    #[inline]
    pub fn published(&self) -> GamepadState {
        self.published
    }

    #[inline]
    pub fn debouncer(&self) -> &Debouncer<CHANNEL_COUNT> {
        &self.debouncer
    }
}
