// ClintSim - Timer Interrupt Bring-up Harness
// Copyright (C) 2026 The ClintSim Authors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::mtime::MtimeBlock;
use std::sync::atomic::{AtomicU32, Ordering};

/// Core-local timer block: free-running 64-bit counter and comparator,
/// each exposed as an independently-updating 32-bit register pair, the
/// same layout the hardware maps at base `0x30000`.
#[derive(Debug, Default)]
pub struct SimClint {
    count_low: AtomicU32,
    count_high: AtomicU32,
    cmp_low: AtomicU32,
    cmp_high: AtomicU32,
}

impl SimClint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counter(start: u64) -> Self {
        let clint = Self::default();
        clint.count_low.store(start as u32, Ordering::SeqCst);
        clint
            .count_high
            .store((start >> 32) as u32, Ordering::SeqCst);
        clint
    }

    /// Whole-counter view for the simulation loop, which owns time and
    /// never races its own register updates.
    pub fn counter(&self) -> u64 {
        (u64::from(self.count_high.load(Ordering::SeqCst)) << 32)
            | u64::from(self.count_low.load(Ordering::SeqCst))
    }

    pub fn comparator(&self) -> u64 {
        (u64::from(self.cmp_high.load(Ordering::SeqCst)) << 32)
            | u64::from(self.cmp_low.load(Ordering::SeqCst))
    }

    /// Advance the counter. The two halves are stored separately, low
    /// half first, exactly the window the guest's retry loop exists for.
    pub fn advance(&self, ticks: u64) {
        let next = self.counter().wrapping_add(ticks);
        self.count_low.store(next as u32, Ordering::SeqCst);
        self.count_high.store((next >> 32) as u32, Ordering::SeqCst);
    }

    /// Hardware interrupt condition: counter has reached the comparator.
    /// Whether the line is actually taken is gated by the CPU enables.
    pub fn irq_asserted(&self) -> bool {
        self.counter() >= self.comparator()
    }

    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "counter": self.counter(),
            "comparator": self.comparator(),
        })
    }
}

impl MtimeBlock for SimClint {
    fn counter_low(&self) -> u32 {
        self.count_low.load(Ordering::SeqCst)
    }

    fn counter_high(&self) -> u32 {
        self.count_high.load(Ordering::SeqCst)
    }

    fn set_compare_low(&self, value: u32) {
        self.cmp_low.store(value, Ordering::SeqCst);
    }

    fn set_compare_high(&self, value: u32) {
        self.cmp_high.store(value, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::SimClint;
    use crate::mtime::{MachineTimer, MtimeBlock};
    use std::sync::Arc;

    #[test]
    fn advance_carries_into_the_high_word() {
        let clint = SimClint::with_counter(0xFFFF_FFFF);
        clint.advance(1);
        assert_eq!(clint.counter(), 1 << 32);
        assert_eq!(clint.counter_low(), 0);
        assert_eq!(clint.counter_high(), 1);
    }

    #[test]
    fn irq_asserts_once_counter_reaches_comparator() {
        let clint = SimClint::new();
        clint.set_compare_low(10);
        assert!(!clint.irq_asserted());

        clint.advance(9);
        assert!(!clint.irq_asserted());

        clint.advance(1);
        assert!(clint.irq_asserted());
    }

    #[test]
    fn machine_timer_composes_the_split_counter() {
        let clint = Arc::new(SimClint::with_counter(0x1_0000_0005));
        let timer = MachineTimer::new(clint);
        assert_eq!(timer.read_counter(), 0x1_0000_0005);
    }
}
