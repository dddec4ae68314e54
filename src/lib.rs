//! # esplay-gamepad
//!
//! Debounced button input for the ESPlay handheld.
//!
//! ## Architecture
//!
//! One sampling task owns the hardware. Everything else only reads:
//! - [`Sampler`] reads the PCF8574 and the direct pins, debounces, publishes
//! - [`StateStore`] holds the one published [`GamepadState`]
//! - [`Gamepad::read`] copies it out under a short critical section
//!
//! The core (channels, debounce, sampler, store) is hardware-agnostic and
//! tested on the host. ESP-IDF bring-up lives in [`hal`] behind the
//! `esp32` feature.

#![cfg_attr(not(any(test, feature = "esp32")), no_std)]

pub mod channel;
pub mod config;
pub mod debounce;
pub mod error;
pub mod gamepad;
pub mod sampler;
pub mod source;
pub mod state;
pub mod stats;

#[cfg(feature = "esp32")]
pub mod hal;

pub use channel::{Channel, Source, CHANNEL_COUNT};
pub use config::GamepadConfig;
pub use debounce::Debouncer;
pub use error::{InitError, SpawnError};
pub use gamepad::{Gamepad, TaskSpawner};
pub use sampler::Sampler;
pub use source::{ExpanderReader, PinReader};
pub use state::{Edges, GamepadState, StateStore};
pub use stats::{InputStats, StatsSnapshot};
