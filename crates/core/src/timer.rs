// ClintSim - Timer Interrupt Bring-up Harness
// Copyright (C) 2026 The ClintSim Authors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::console::Console;
use crate::hal::InterruptControl;
use crate::mtime::MachineTimer;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

const STATE_IDLE: u8 = 0;
const STATE_ARMED: u8 = 1;
const STATE_FIRED: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Armed,
    Fired,
}

/// One-shot machine timer service.
///
/// State moves `Idle -> Armed -> Fired`; re-arming while `Armed` simply
/// moves the deadline. All methods take `&self` because `on_timer_fired`
/// runs in interrupt context while the main path polls `fired`.
#[derive(Debug)]
pub struct TimerService {
    timer: MachineTimer,
    irq: Arc<dyn InterruptControl>,
    console: Console,
    state: AtomicU8,
    fired: AtomicBool,
}

impl TimerService {
    pub fn new(timer: MachineTimer, irq: Arc<dyn InterruptControl>, console: Console) -> Self {
        Self {
            timer,
            irq,
            console,
            state: AtomicU8::new(STATE_IDLE),
            fired: AtomicBool::new(false),
        }
    }

    /// Arm the timer `ticks` ahead of the current counter value and
    /// enable the timer interrupt source. The deadline wraps in the
    /// 64-bit space, an effectively infinite horizon. Re-arming lowers
    /// the completion flag and replaces the deadline.
    pub fn arm_one_shot(&self, ticks: u32) {
        let deadline = self.timer.read_counter().wrapping_add(u64::from(ticks));
        self.timer.write_comparator(deadline);
        self.fired.store(false, Ordering::SeqCst);
        self.state.store(STATE_ARMED, Ordering::SeqCst);
        self.irq.enable_timer();
        tracing::debug!(ticks, deadline, "timer armed");
    }

    /// Interrupt-context handler. Disables the timer source so a spurious
    /// re-assertion of the hardware condition cannot re-enter, then raises
    /// the completion flag for the polling main path. Must not block.
    pub fn on_timer_fired(&self) {
        self.irq.disable_timer();
        self.state.store(STATE_FIRED, Ordering::SeqCst);
        self.fired.store(true, Ordering::SeqCst);
        tracing::info!("machine timer fired");
        self.console.puts("\nTimer interrupt fired\n");
    }

    pub fn fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> TimerState {
        match self.state.load(Ordering::SeqCst) {
            STATE_ARMED => TimerState::Armed,
            STATE_FIRED => TimerState::Fired,
            _ => TimerState::Idle,
        }
    }
}
