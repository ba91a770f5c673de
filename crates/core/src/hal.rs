// ClintSim - Timer Interrupt Bring-up Harness
// Copyright (C) 2026 The ClintSim Authors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

bitflags::bitflags! {
    /// Global interrupt gate bits (mstatus analogue).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GlobalIrq: u32 {
        const MIE = 1 << 3;
        const MPIE = 1 << 7;
    }
}

bitflags::bitflags! {
    /// Per-source interrupt enable bits (mie analogue).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IrqSource: u32 {
        const SOFTWARE = 1 << 3;
        const TIMER = 1 << 7;
        const EXTERNAL = 1 << 11;
    }
}

/// CPU-level interrupt enable controls.
///
/// Each operation is a fire-and-forget control-register mutation; the
/// hardware always accepts the write, so nothing here can fail.
pub trait InterruptControl: std::fmt::Debug + Send + Sync {
    /// Open the global interrupt gate so enabled sources can be taken.
    fn enable_all(&self);

    /// Enable only the timer source, leaving other sources untouched.
    fn enable_timer(&self);

    /// Disable only the timer source, leaving other sources untouched.
    fn disable_timer(&self);

    /// Close the global gate and clear the software, timer and external
    /// source enables. The external bit is never set by `enable_all`, but
    /// clearing it here guarantees a fully quiesced baseline at startup.
    fn disable_all(&self);

    /// Suspend the core until any enabled interrupt arrives. Not used by
    /// the steady-state bring-up path, which polls instead.
    fn wait_for_interrupt(&self);
}
