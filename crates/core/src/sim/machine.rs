// ClintSim - Timer Interrupt Bring-up Harness
// Copyright (C) 2026 The ClintSim Authors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::bringup::{Board, Bringup};
use crate::console::Console;
use crate::dispatch::{Dispatcher, MCAUSE_MACHINE_TIMER};
use crate::mtime::MachineTimer;
use crate::sim::{SimClint, SimHostIo, SimIrqState};
use crate::timer::TimerService;
use crate::HaltLine;
use clintsim_config::ScenarioConfig;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Size of the modeled uninitialized-data region.
const SCRATCH_BYTES: usize = 1024;

/// Load-time fill pattern; `mem_init` must clear it.
const SCRATCH_FILL: u8 = 0x55;

/// Complete simulated target: timer block, CPU enable state, host I/O,
/// and the guest-side timer service wired to the dispatcher.
///
/// One `step` is one counter tick. When the timer condition is asserted
/// and both the source and global enables allow it, the step delivers the
/// machine-timer cause to the dispatcher; an unhandled cause prints the
/// fatal diagnostic and latches the halt line.
#[derive(Debug)]
pub struct SimMachine {
    clint: Arc<SimClint>,
    cpu: Arc<SimIrqState>,
    hostio: Arc<SimHostIo>,
    console: Console,
    timer: Arc<TimerService>,
    dispatcher: Dispatcher,
    scratch: Mutex<Vec<u8>>,
    total_steps: AtomicU64,
}

impl SimMachine {
    pub fn new(echo_stdout: bool) -> Self {
        Self::with_counter(0, echo_stdout)
    }

    pub fn with_counter(counter_start: u64, echo_stdout: bool) -> Self {
        let clint = Arc::new(SimClint::with_counter(counter_start));
        let cpu = Arc::new(SimIrqState::new());
        let hostio = Arc::new(SimHostIo::new(echo_stdout));
        let console = Console::new(hostio.clone());
        let timer = Arc::new(TimerService::new(
            MachineTimer::new(clint.clone()),
            cpu.clone(),
            console.clone(),
        ));
        let dispatcher = Dispatcher::new(timer.clone());

        Self {
            clint,
            cpu,
            hostio,
            console,
            timer,
            dispatcher,
            scratch: Mutex::new(vec![SCRATCH_FILL; SCRATCH_BYTES]),
            total_steps: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &ScenarioConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self::with_counter(config.counter_start, config.echo_console))
    }

    pub fn clint(&self) -> &SimClint {
        &self.clint
    }

    pub fn cpu(&self) -> &SimIrqState {
        &self.cpu
    }

    pub fn hostio(&self) -> &SimHostIo {
        &self.hostio
    }

    pub fn timer(&self) -> &TimerService {
        &self.timer
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps.load(Ordering::SeqCst)
    }

    /// Bring-up sequence bound to this machine's devices.
    pub fn bringup(&self) -> Bringup {
        Bringup::new(self.cpu.clone(), self.timer.clone(), self.console.clone())
    }

    /// Advance simulated time by one tick and deliver the timer interrupt
    /// if its condition is asserted and the enables permit it.
    pub fn step(&self) {
        if self.hostio.halted() {
            return;
        }

        self.clint.advance(1);
        self.total_steps.fetch_add(1, Ordering::SeqCst);

        if self.clint.irq_asserted() && self.cpu.timer_enabled() && self.cpu.globally_enabled() {
            self.deliver(MCAUSE_MACHINE_TIMER);
        }
    }

    /// Inject a raw trap cause, as the trap entry mechanism would. An
    /// unhandled cause is fatal: diagnostic, then halt.
    pub fn deliver(&self, raw_cause: u32) {
        if let Err(err) = self.dispatcher.dispatch(raw_cause) {
            tracing::error!(cause = raw_cause, %err, "fatal trap");
            self.console.puts("Illegal Exception : Stopping\n");
            self.hostio.stop();
        }
    }

    pub fn scratch_zeroed(&self) -> bool {
        self.scratch
            .lock()
            .map(|scratch| scratch.iter().all(|&b| b == 0))
            .unwrap_or(false)
    }

    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "clint": self.clint.snapshot(),
            "cpu": self.cpu.snapshot(),
            "hostio": self.hostio.snapshot(),
            "total_steps": self.total_steps(),
        })
    }
}

impl Default for SimMachine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Board for SimMachine {
    fn mem_init(&self) {
        if let Ok(mut scratch) = self.scratch.lock() {
            scratch.fill(0);
        }
    }

    fn idle(&self) {
        self.step();
    }

    fn stopped(&self) -> bool {
        self.hostio.halted()
    }

    fn stop(&self) {
        self.hostio.stop();
    }
}
