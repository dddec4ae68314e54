//! Debounced button state and the store that publishes it.
//!
//! # Architecture
//!
//! ```text
//! Sampling task ──publish()──▶ StateStore ──snapshot()──▶ Consumers
//!  (sole writer)               (one lock)                (any context)
//! ```
//!
//! # Rules
//!
//! - Exactly one writer: the sampling task
//! - Any number of readers, from any execution context
//! - Both critical sections copy one `GamepadState` and nothing else
//! - A reader sees either the whole old array or the whole new one

use core::cell::Cell;
use core::ops::Index;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::channel::{Channel, CHANNEL_COUNT};

/// Stable (debounced) value of every channel. `true` = pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GamepadState {
    values: [bool; CHANNEL_COUNT],
}

impl GamepadState {
    /// Everything released.
    pub const RELEASED: GamepadState = GamepadState {
        values: [false; CHANNEL_COUNT],
    };

    pub const fn from_array(values: [bool; CHANNEL_COUNT]) -> Self {
        Self { values }
    }

    #[inline]
    pub const fn as_array(&self) -> &[bool; CHANNEL_COUNT] {
        &self.values
    }

    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [bool; CHANNEL_COUNT] {
        &mut self.values
    }

    #[inline]
    pub fn is_pressed(&self, channel: Channel) -> bool {
        self.values[channel.index()]
    }

    #[inline]
    pub fn set(&mut self, channel: Channel, pressed: bool) {
        self.values[channel.index()] = pressed;
    }

    pub fn any_pressed(&self) -> bool {
        self.values.iter().any(|&v| v)
    }

    /// Channels currently pressed, in index order.
    pub fn pressed(&self) -> impl Iterator<Item = Channel> + '_ {
        Channel::ALL
            .iter()
            .copied()
            .filter(move |ch| self.values[ch.index()])
    }

    /// Packed form: bit i set when channel i is pressed.
    pub fn bits(&self) -> u16 {
        self.values
            .iter()
            .enumerate()
            .fold(0u16, |acc, (i, &v)| acc | ((v as u16) << i))
    }

    /// Transitions from `previous` to `self`.
    pub fn edges(&self, previous: &GamepadState) -> Edges {
        let now = self.bits();
        let before = previous.bits();
        Edges {
            pressed: now & !before,
            released: before & !now,
        }
    }
}

impl Index<Channel> for GamepadState {
    type Output = bool;

    fn index(&self, channel: Channel) -> &bool {
        &self.values[channel.index()]
    }
}

impl core::fmt::Display for GamepadState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("[")?;
        let mut first = true;
        for ch in self.pressed() {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(ch.name())?;
            first = false;
        }
        f.write_str("]")
    }
}

/// Channel transitions between two snapshots, as bitmasks (bit i = channel i).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Edges {
    pub pressed: u16,
    pub released: u16,
}

impl Edges {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pressed == 0 && self.released == 0
    }

    #[inline]
    pub fn just_pressed(&self, channel: Channel) -> bool {
        self.pressed & (1 << channel.index()) != 0
    }

    #[inline]
    pub fn just_released(&self, channel: Channel) -> bool {
        self.released & (1 << channel.index()) != 0
    }
}

/// Mutex-guarded published state.
///
/// The lock is a blocking, uncancellable critical section. Neither side
/// holds it for more than one `CHANNEL_COUNT`-bool copy.
///
/// # Usage
///
/// ```ignore
/// static STORE: StateStore = StateStore::new();
///
/// // Sampling task:
/// STORE.publish(&debounced);
///
/// // Consumer:
/// let now = STORE.snapshot();
/// ```
pub struct StateStore {
    state: Mutex<CriticalSectionRawMutex, Cell<GamepadState>>,
}

impl StateStore {
    /// Create a store holding the all-released state.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(GamepadState::RELEASED)),
        }
    }

    /// Replace the whole published array in one critical section.
    #[inline]
    pub fn publish(&self, state: &GamepadState) {
        self.state.lock(|cell| cell.set(*state));
    }

    /// Copy the whole published array out in one critical section.
    #[inline]
    pub fn snapshot(&self) -> GamepadState {
        self.state.lock(|cell| cell.get())
    }

    /// Copy into a caller-owned buffer.
    #[inline]
    pub fn snapshot_into(&self, out: &mut GamepadState) {
        *out = self.snapshot();
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
