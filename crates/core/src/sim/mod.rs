// ClintSim - Timer Interrupt Bring-up Harness
// Copyright (C) 2026 The ClintSim Authors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Software model of the target platform. Each device mirrors the
//! register-level behavior of its hardware counterpart so the bring-up
//! logic runs unmodified against it.

pub mod clint;
pub mod cpu;
pub mod hostio;
pub mod machine;

pub use clint::SimClint;
pub use cpu::SimIrqState;
pub use hostio::SimHostIo;
pub use machine::SimMachine;
