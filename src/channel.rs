//! Module: channel
//!
//! Purpose: The closed set of logical buttons and where each one is wired.
//!
//! Architecture:
//! - Channels 0..7 come from the PCF8574 expander, bit i = channel i
//! - Remaining channels come from dedicated input-only GPIOs
//! - Each channel has exactly one source, checked at compile time
//!
//! Safety: Safe. No unsafe blocks. Copy types only.

/// Number of logical channels.
pub const CHANNEL_COUNT: usize = 11;

/// Number of channels packed into one expander byte.
pub const EXPANDER_CHANNELS: usize = 8;

/// Number of channels wired straight to GPIO.
pub const PIN_CHANNELS: usize = CHANNEL_COUNT - EXPANDER_CHANNELS;

/// One logical button.
///
/// Discriminants are the index into [`crate::GamepadState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Channel {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
    Select = 4,
    Start = 5,
    A = 6,
    B = 7,
    Menu = 8,
    L = 9,
    R = 10,
}

/// Where a channel's raw sample comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// Bit position in the expander byte (active-low).
    Expander { bit: u8 },
    /// Slot in the direct pin array (active-low).
    Pin { slot: u8 },
}

impl Channel {
    /// All channels in index order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Up,
        Channel::Right,
        Channel::Down,
        Channel::Left,
        Channel::Select,
        Channel::Start,
        Channel::A,
        Channel::B,
        Channel::Menu,
        Channel::L,
        Channel::R,
    ];

    /// Channels read from direct pins, in pin-slot order.
    pub const DIRECT: [Channel; PIN_CHANNELS] = [Channel::Menu, Channel::L, Channel::R];

    /// Index into a state array.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Channel at `index`, if any.
    pub const fn from_index(index: usize) -> Option<Channel> {
        if index < CHANNEL_COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Hardware source of this channel.
    pub const fn source(self) -> Source {
        match self {
            Channel::Up => Source::Expander { bit: 0 },
            Channel::Right => Source::Expander { bit: 1 },
            Channel::Down => Source::Expander { bit: 2 },
            Channel::Left => Source::Expander { bit: 3 },
            Channel::Select => Source::Expander { bit: 4 },
            Channel::Start => Source::Expander { bit: 5 },
            Channel::A => Source::Expander { bit: 6 },
            Channel::B => Source::Expander { bit: 7 },
            Channel::Menu => Source::Pin { slot: 0 },
            Channel::L => Source::Pin { slot: 1 },
            Channel::R => Source::Pin { slot: 2 },
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Channel::Up => "Up",
            Channel::Right => "Right",
            Channel::Down => "Down",
            Channel::Left => "Left",
            Channel::Select => "Select",
            Channel::Start => "Start",
            Channel::A => "A",
            Channel::B => "B",
            Channel::Menu => "Menu",
            Channel::L => "L",
            Channel::R => "R",
        }
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Check that the source table is a bijection onto
/// (expander bits 0..8) + (pin slots 0..PIN_CHANNELS), and that the
/// `ALL` / `DIRECT` tables agree with it.
const fn source_map_is_exact() -> bool {
    let mut bit_owners = [0u8; EXPANDER_CHANNELS];
    let mut slot_owners = [0u8; PIN_CHANNELS];

    let mut i = 0;
    while i < CHANNEL_COUNT {
        let ch = Channel::ALL[i];
        if ch.index() != i {
            return false;
        }
        match ch.source() {
            Source::Expander { bit } => {
                if bit as usize >= EXPANDER_CHANNELS {
                    return false;
                }
                bit_owners[bit as usize] += 1;
            }
            Source::Pin { slot } => {
                if slot as usize >= PIN_CHANNELS {
                    return false;
                }
                // DIRECT must list this channel at its slot
                if Channel::DIRECT[slot as usize] as u8 != ch as u8 {
                    return false;
                }
                slot_owners[slot as usize] += 1;
            }
        }
        i += 1;
    }

    let mut b = 0;
    while b < EXPANDER_CHANNELS {
        if bit_owners[b] != 1 {
            return false;
        }
        b += 1;
    }
    let mut s = 0;
    while s < PIN_CHANNELS {
        if slot_owners[s] != 1 {
            return false;
        }
        s += 1;
    }
    true
}

const _: () = assert!(source_map_is_exact(), "channel source map must cover every bit and pin exactly once");
