// ClintSim - Timer Interrupt Bring-up Harness
// Copyright (C) 2026 The ClintSim Authors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::console::ByteOut;
use crate::HaltLine;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Host interface block: the character-out register at `0x20000` and the
/// stop register at `0x20008`. Output is captured for assertions and
/// optionally echoed to stdout.
#[derive(Debug)]
pub struct SimHostIo {
    sink: Mutex<Vec<u8>>,
    echo_stdout: bool,
    stopped: AtomicBool,
}

impl SimHostIo {
    pub fn new(echo_stdout: bool) -> Self {
        Self {
            sink: Mutex::new(Vec::new()),
            echo_stdout,
            stopped: AtomicBool::new(false),
        }
    }

    pub fn halted(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn transcript(&self) -> String {
        self.sink
            .lock()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }

    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "halted": self.halted(),
            "transcript": self.transcript(),
        })
    }
}

impl Default for SimHostIo {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ByteOut for SimHostIo {
    fn put(&self, byte: u8) {
        if let Ok(mut sink) = self.sink.lock() {
            sink.push(byte);
        }

        if self.echo_stdout {
            #[allow(unused_must_use)]
            {
                print!("{}", byte as char);
                io::stdout().flush();
            }
        }
    }
}

impl HaltLine for SimHostIo {
    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}
