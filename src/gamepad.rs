//! Public read API.
//!
//! [`Gamepad`] bundles everything the sampling task and the consumers
//! share: the published state, the counters and the initialization flag.
//! It is built `const` so it can live in a `static`, and the sampling
//! task borrows it `'static`.
//!
//! # Usage
//!
//! ```ignore
//! static GAMEPAD: Gamepad = Gamepad::new();
//!
//! GAMEPAD.start(sampler, FreeRtos, period, spawner)?;
//!
//! let mut buttons = GamepadState::default();
//! loop {
//!     GAMEPAD.read(&mut buttons);
//!     if buttons[Channel::Start] { /* ... */ }
//! }
//! ```

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use embedded_hal::i2c::I2c;

use crate::error::{InitError, SpawnError};
use crate::sampler::Sampler;
use crate::state::{GamepadState, StateStore};
use crate::stats::{InputStats, StatsSnapshot};

/// Something that can start a long-lived task.
///
/// On device this is a pinned FreeRTOS thread, in tests a plain
/// `std::thread`.
pub trait TaskSpawner {
    fn spawn<F>(self, task: F) -> Result<(), SpawnError>
    where
        F: FnOnce() + Send + 'static;
}

pub struct Gamepad {
    store: StateStore,
    stats: InputStats,
    /// Set once the sampling task exists. Gates `read()`.
    initialized: AtomicBool,
    /// Set by the first `start()`. Guards against a second sampling task.
    claimed: AtomicBool,
}

impl Gamepad {
    pub const fn new() -> Self {
        Self {
            store: StateStore::new(),
            stats: InputStats::new(),
            initialized: AtomicBool::new(false),
            claimed: AtomicBool::new(false),
        }
    }

    /// Start the sampling task.
    ///
    /// Must succeed exactly once. A second call returns
    /// [`InitError::AlreadyInitialized`] without touching the running task.
    /// If the task cannot be created the gamepad stays uninitialized and
    /// `start()` may be retried.
    pub fn start<B, P, D, S>(
        &'static self,
        sampler: Sampler<B, P>,
        delay: D,
        period: Duration,
        spawner: S,
    ) -> Result<(), InitError>
    where
        B: I2c + Send + 'static,
        P: InputPin + Send + 'static,
        D: DelayNs + Send + 'static,
        S: TaskSpawner,
    {
        if self
            .claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::warn!("gamepad already initialized, refusing to start a second sampler");
            return Err(InitError::AlreadyInitialized);
        }

        let store = &self.store;
        let stats = &self.stats;
        if let Err(e) = spawner.spawn(move || sampler.run(store, stats, delay, period)) {
            self.claimed.store(false, Ordering::Release);
            log::error!("gamepad: {}", e);
            return Err(e.into());
        }

        self.initialized.store(true, Ordering::Release);
        log::info!("gamepad init done");
        Ok(())
    }

    /// Copy the current debounced state into `out`.
    ///
    /// `out.as_mut_array()` is the caller's `[bool; CHANNEL_COUNT]` buffer,
    /// indexed by [`crate::Channel::index`].
    ///
    /// Before a successful `start()` this does nothing: `out` is left
    /// exactly as it was. Never blocks longer than one array copy.
    #[inline]
    pub fn read(&self, out: &mut GamepadState) {
        if !self.is_initialized() {
            return;
        }
        self.store.snapshot_into(out);
    }

    /// Current debounced state, all released if not initialized.
    pub fn state(&self) -> GamepadState {
        let mut state = GamepadState::RELEASED;
        self.read(&mut state);
        state
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// True once `start()` has been entered, even if it has not finished.
    #[inline]
    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::Acquire)
    }

    #[inline]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

impl Default for Gamepad {
    fn default() -> Self {
        Self::new()
    }
}
