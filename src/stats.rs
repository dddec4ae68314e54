//! Sampling diagnostics.
//!
//! A failing expander never reaches the consumer as an error: the bus
//! channels simply read "released". These counters are how you find out
//! that it is happening.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Thread-safe sampling counters.
///
/// Written by the sampling task after every cycle, readable from any
/// context without taking the state lock.
///
/// # Usage
///
/// ```ignore
/// let stats = GAMEPAD.stats();
/// if !stats.bus_ok {
///     show_controller_warning(stats.bus_failures);
/// }
/// ```
pub struct InputStats {
    /// Sampling cycles completed since start.
    cycles: AtomicU32,

    /// Total failed expander reads since start (never cleared).
    bus_failures: AtomicU32,

    /// True if the most recent expander read succeeded.
    bus_ok: AtomicBool,
}

impl InputStats {
    pub const fn new() -> Self {
        Self {
            cycles: AtomicU32::new(0),
            bus_failures: AtomicU32::new(0),
            bus_ok: AtomicBool::new(true),
        }
    }

    /// Record one finished cycle.
    ///
    /// `bus_failures` is the reader's running total, not a delta.
    #[inline]
    pub fn record_cycle(&self, bus_failures: u32, bus_ok: bool) {
        self.bus_failures.store(bus_failures, Ordering::Relaxed);
        self.bus_ok.store(bus_ok, Ordering::Relaxed);
        self.cycles.fetch_add(1, Ordering::Release);
    }

    #[inline]
    pub fn cycles(&self) -> u32 {
        self.cycles.load(Ordering::Acquire)
    }

    #[inline]
    pub fn bus_failures(&self) -> u32 {
        self.bus_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn bus_ok(&self) -> bool {
        self.bus_ok.load(Ordering::Relaxed)
    }

    /// Get a snapshot of the counters.
    #[inline]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            cycles: self.cycles(),
            bus_failures: self.bus_failures(),
            bus_ok: self.bus_ok(),
        }
    }
}

impl Default for InputStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the sampling counters at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub cycles: u32,
    pub bus_failures: u32,
    pub bus_ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_basic() {
        let stats = InputStats::new();

        assert_eq!(stats.cycles(), 0);
        assert_eq!(stats.bus_failures(), 0);
        assert!(stats.bus_ok());

        stats.record_cycle(1, false);

        let snap = stats.snapshot();
        assert_eq!(snap.cycles, 1);
        assert_eq!(snap.bus_failures, 1);
        assert!(!snap.bus_ok);
    }

    #[test]
    fn test_failures_preserved_after_recovery() {
        let stats = InputStats::new();

        stats.record_cycle(1, false);
        stats.record_cycle(2, false);
        stats.record_cycle(2, true);

        assert_eq!(stats.cycles(), 3);
        assert_eq!(stats.bus_failures(), 2);
        assert!(stats.bus_ok());
    }
}
