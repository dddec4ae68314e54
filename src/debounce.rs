//! Shift-register debounce filter.
//!
//! Pure logic, no hardware dependencies. Consumes raw samples,
//! produces stable states. Fully testable on host.
//!
//! # Per channel, per cycle
//!
//! 1. `reg <<= 1` (oldest sample falls off the top)
//! 2. `reg |= raw` (1 = pressed this cycle)
//! 3. Look at the two newest samples:
//!    - `0b00` → released
//!    - `0b11` → pressed
//!    - `0b01` / `0b10` → keep the previous stable value
//!
//! Two consecutive identical samples are needed to flip a channel in
//! either direction, so the minimum debounce time is two sample periods.

use crate::channel::CHANNEL_COUNT;

/// Bits of history that decide the stable state.
pub const DEBOUNCE_MASK: u8 = 0b11;

/// Register value at power-up.
///
/// All history bits read "pressed" except the newest one, so the first
/// cycle after reset is always ambiguous or released and a button held
/// through boot still needs two pressed samples to register.
pub const COLD_START_REGISTER: u8 = 0xFE;

/// Register value after a long run of released samples.
pub const SETTLED_RELEASED: u8 = 0x00;

/// Register value after a long run of pressed samples.
pub const SETTLED_PRESSED: u8 = 0xFF;

/// Stable value implied by a register, or `None` while mid-transition.
#[inline]
pub const fn decide(register: u8) -> Option<bool> {
    match register & DEBOUNCE_MASK {
        0b00 => Some(false),
        0b11 => Some(true),
        _ => None,
    }
}

/// Per-channel history registers.
///
/// Owned exclusively by the sampling task; consumers never see it.
#[derive(Clone, Debug)]
pub struct Debouncer<const N: usize = CHANNEL_COUNT> {
    registers: [u8; N],
}

impl<const N: usize> Debouncer<N> {
    /// Registers at cold start.
    pub const fn new() -> Self {
        Self {
            registers: [COLD_START_REGISTER; N],
        }
    }

    /// Registers seeded with a known history.
    pub const fn with_registers(registers: [u8; N]) -> Self {
        Self { registers }
    }

    /// Step 1: age every register by one sample.
    #[inline]
    pub fn shift(&mut self) {
        for reg in self.registers.iter_mut() {
            *reg <<= 1;
        }
    }

    /// Steps 2-3: fold in this cycle's raw samples and update `stable`.
    ///
    /// Channels whose two newest samples disagree keep their value in
    /// `stable`. Each channel only reads its own register and raw sample.
    pub fn apply(&mut self, raw: &[bool; N], stable: &mut [bool; N]) {
        for ((reg, &pressed), out) in self
            .registers
            .iter_mut()
            .zip(raw.iter())
            .zip(stable.iter_mut())
        {
            *reg |= pressed as u8;
            if let Some(value) = decide(*reg) {
                *out = value;
            }
        }
    }

    /// One full cycle: `shift()` then `apply()`.
    #[inline]
    pub fn update(&mut self, raw: &[bool; N], stable: &mut [bool; N]) {
        self.shift();
        self.apply(raw, stable);
    }

    /// Current register for `channel`.
    #[inline]
    pub fn register(&self, channel: usize) -> u8 {
        self.registers[channel]
    }

    #[inline]
    pub fn registers(&self) -> &[u8; N] {
        &self.registers
    }
}

impl<const N: usize> Default for Debouncer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(d: &mut Debouncer<1>, stable: &mut [bool; 1], raw: bool) -> bool {
        d.update(&[raw], stable);
        stable[0]
    }

    #[test]
    fn test_decide() {
        assert_eq!(decide(0x00), Some(false));
        assert_eq!(decide(0x03), Some(true));
        assert_eq!(decide(0x0E), None);
        assert_eq!(decide(0x01), None);
        assert_eq!(decide(0xFC), Some(false));
    }

    #[test]
    fn test_trace_from_settled_released() {
        let mut d = Debouncer::<1>::with_registers([SETTLED_RELEASED]);
        let mut stable = [false];

        let expected = [
            (true, false, 0x01),
            (true, true, 0x03),
            (true, true, 0x07),
            (false, true, 0x0E),
            (false, false, 0x1C),
        ];

        for (raw, want, reg) in expected {
            assert_eq!(step(&mut d, &mut stable, raw), want);
            assert_eq!(d.register(0), reg);
        }
    }

    #[test]
    fn test_cold_start_single_press_is_ignored() {
        let mut d = Debouncer::<1>::new();
        let mut stable = [false];

        assert!(!step(&mut d, &mut stable, true));
        assert!(step(&mut d, &mut stable, true));
    }

    #[test]
    fn test_cold_start_release_stays_released() {
        let mut d = Debouncer::<1>::new();
        let mut stable = [false];

        assert!(!step(&mut d, &mut stable, false));
        assert!(!step(&mut d, &mut stable, false));
    }

    #[test]
    fn test_shift_drops_oldest_bit() {
        let mut d = Debouncer::<1>::with_registers([0x80]);
        d.shift();
        assert_eq!(d.register(0), 0x00);
    }
}
