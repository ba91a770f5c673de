// ClintSim - Timer Interrupt Bring-up Harness
// Copyright (C) 2026 The ClintSim Authors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::hal::{GlobalIrq, InterruptControl, IrqSource};
use std::sync::atomic::{AtomicU32, Ordering};

/// CPU interrupt-enable state: one atomic word for the global gate
/// (mstatus analogue) and one for the per-source enables (mie analogue).
#[derive(Debug, Default)]
pub struct SimIrqState {
    status: AtomicU32,
    enable: AtomicU32,
}

impl SimIrqState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn globally_enabled(&self) -> bool {
        self.status.load(Ordering::SeqCst) & GlobalIrq::MIE.bits() != 0
    }

    pub fn timer_enabled(&self) -> bool {
        self.enable.load(Ordering::SeqCst) & IrqSource::TIMER.bits() != 0
    }

    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "status": self.status.load(Ordering::SeqCst),
            "enable": self.enable.load(Ordering::SeqCst),
        })
    }
}

impl InterruptControl for SimIrqState {
    fn enable_all(&self) {
        self.status
            .fetch_or(GlobalIrq::all().bits(), Ordering::SeqCst);
    }

    fn enable_timer(&self) {
        self.enable
            .fetch_or(IrqSource::TIMER.bits(), Ordering::SeqCst);
    }

    fn disable_timer(&self) {
        self.enable
            .fetch_and(!IrqSource::TIMER.bits(), Ordering::SeqCst);
    }

    fn disable_all(&self) {
        self.status
            .fetch_and(!GlobalIrq::all().bits(), Ordering::SeqCst);
        self.enable
            .fetch_and(!IrqSource::all().bits(), Ordering::SeqCst);
    }

    fn wait_for_interrupt(&self) {
        // Simulated time only advances through machine steps, so there is
        // nothing to sleep on here.
        std::hint::spin_loop();
    }
}
