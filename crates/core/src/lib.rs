// ClintSim - Timer Interrupt Bring-up Harness
// Copyright (C) 2026 The ClintSim Authors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

pub mod bringup;
pub mod console;
pub mod dispatch;
pub mod hal;
pub mod mmio;
pub mod mtime;
pub mod sim;
pub mod timer;

pub use bringup::{Board, Bringup, BringupOptions, BringupReport, Verdict};
pub use console::{ByteOut, Console};
pub use dispatch::{Dispatcher, TrapCause};
pub use hal::InterruptControl;
pub use mtime::{MachineTimer, MtimeBlock};
pub use timer::{TimerService, TimerState};

#[derive(Debug, thiserror::Error)]
pub enum TrapError {
    #[error("unhandled trap cause {0:#010x}")]
    UnhandledCause(u32),
}

pub type TrapResult = Result<(), TrapError>;

/// Machine halt line. Writing to it is the only termination path; the
/// underlying register is write-only, so there is no read-back here.
pub trait HaltLine: std::fmt::Debug + Send + Sync {
    fn stop(&self);
}
