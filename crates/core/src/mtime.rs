// ClintSim - Timer Interrupt Bring-up Harness
// Copyright (C) 2026 The ClintSim Authors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use std::sync::Arc;

/// Register-level view of the core-local timer block.
///
/// The 64-bit counter and comparator are physically exposed as pairs of
/// independently-updating 32-bit registers; the counter pair is read-only
/// and the comparator pair is write-only.
pub trait MtimeBlock: std::fmt::Debug + Send + Sync {
    fn counter_low(&self) -> u32;
    fn counter_high(&self) -> u32;
    fn set_compare_low(&self, value: u32);
    fn set_compare_high(&self, value: u32);
}

/// 64-bit view over a split counter/comparator register pair.
#[derive(Debug, Clone)]
pub struct MachineTimer {
    block: Arc<dyn MtimeBlock>,
}

impl MachineTimer {
    pub fn new(block: Arc<dyn MtimeBlock>) -> Self {
        Self { block }
    }

    /// Read the free-running counter without observing a torn low/high
    /// pair. The low word can carry into the high word between the two
    /// reads, so the high word is sampled before and after and the read
    /// is retried until both samples match.
    pub fn read_counter(&self) -> u64 {
        loop {
            let high = self.block.counter_high();
            let low = self.block.counter_low();
            if self.block.counter_high() == high {
                return (u64::from(high) << 32) | u64::from(low);
            }
        }
    }

    /// Program the comparator, low half first. The pair is not latched
    /// atomically; callers must only reprogram it while the timer
    /// interrupt source is disabled.
    pub fn write_comparator(&self, value: u64) {
        self.block.set_compare_low(value as u32);
        self.block.set_compare_high((value >> 32) as u32);
    }
}
