// ClintSim - Timer Interrupt Bring-up Harness
// Copyright (C) 2026 The ClintSim Authors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Thin adapters binding the hardware traits to the fixed physical
//! register addresses for deployment on the real machine. Host-side code
//! uses the `sim` backends instead; nothing here is safe to touch unless
//! the register block is actually mapped.

use crate::console::ByteOut;
use crate::mtime::MtimeBlock;
use crate::HaltLine;
use std::ptr::{read_volatile, write_volatile};

pub const CHAR_OUT_ADDR: usize = 0x20000;
pub const SIM_STOP_ADDR: usize = 0x20008;
pub const MTIME_LOW_ADDR: usize = 0x30000;
pub const MTIME_HIGH_ADDR: usize = 0x30004;
pub const MTIMECMP_LOW_ADDR: usize = 0x30008;
pub const MTIMECMP_HIGH_ADDR: usize = 0x3000C;

/// Counter/comparator pair at the physical CLINT addresses.
#[derive(Debug)]
pub struct MmioMtime(());

impl MmioMtime {
    /// # Safety
    /// The caller must be executing on a machine where the timer register
    /// block is mapped at `0x30000`.
    pub const unsafe fn new() -> Self {
        Self(())
    }
}

impl MtimeBlock for MmioMtime {
    fn counter_low(&self) -> u32 {
        unsafe { read_volatile(MTIME_LOW_ADDR as *const u32) }
    }

    fn counter_high(&self) -> u32 {
        unsafe { read_volatile(MTIME_HIGH_ADDR as *const u32) }
    }

    fn set_compare_low(&self, value: u32) {
        unsafe { write_volatile(MTIMECMP_LOW_ADDR as *mut u32, value) }
    }

    fn set_compare_high(&self, value: u32) {
        unsafe { write_volatile(MTIMECMP_HIGH_ADDR as *mut u32, value) }
    }
}

/// Character output register.
#[derive(Debug)]
pub struct MmioConsole(());

impl MmioConsole {
    /// # Safety
    /// The output register must be mapped at `0x20000`.
    pub const unsafe fn new() -> Self {
        Self(())
    }
}

impl ByteOut for MmioConsole {
    fn put(&self, byte: u8) {
        unsafe { write_volatile(CHAR_OUT_ADDR as *mut u32, u32::from(byte)) }
    }
}

/// Machine stop register; writing `1` halts the machine.
#[derive(Debug)]
pub struct MmioHalt(());

impl MmioHalt {
    /// # Safety
    /// The stop register must be mapped at `0x20008`.
    pub const unsafe fn new() -> Self {
        Self(())
    }
}

impl HaltLine for MmioHalt {
    fn stop(&self) {
        unsafe { write_volatile(SIM_STOP_ADDR as *mut u32, 1) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_pairs_are_word_adjacent() {
        assert_eq!(MTIME_HIGH_ADDR, MTIME_LOW_ADDR + 4);
        assert_eq!(MTIMECMP_LOW_ADDR, MTIME_LOW_ADDR + 8);
        assert_eq!(MTIMECMP_HIGH_ADDR, MTIMECMP_LOW_ADDR + 4);
        assert_eq!(SIM_STOP_ADDR, CHAR_OUT_ADDR + 8);
    }
}
