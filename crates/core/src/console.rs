// ClintSim - Timer Interrupt Bring-up Harness
// Copyright (C) 2026 The ClintSim Authors
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use std::fmt;
use std::sync::atomic::{fence, Ordering};
use std::sync::Arc;

/// Single-byte output channel, one character register write per call.
pub trait ByteOut: fmt::Debug + Send + Sync {
    fn put(&self, byte: u8);
}

/// Character-at-a-time console over the platform output register.
#[derive(Debug, Clone)]
pub struct Console {
    out: Arc<dyn ByteOut>,
}

impl Console {
    pub fn new(out: Arc<dyn ByteOut>) -> Self {
        Self { out }
    }

    pub fn put_byte(&self, byte: u8) {
        self.out.put(byte);
        // Order each character write against the I/O device before the
        // next one is issued.
        fence(Ordering::SeqCst);
    }

    pub fn puts(&self, text: &str) {
        for byte in text.bytes() {
            self.put_byte(byte);
        }
    }
}

impl fmt::Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.puts(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ByteOut, Console};
    use std::fmt::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    struct CaptureOut {
        bytes: Mutex<Vec<u8>>,
    }

    impl ByteOut for CaptureOut {
        fn put(&self, byte: u8) {
            self.bytes.lock().unwrap().push(byte);
        }
    }

    #[test]
    fn puts_emits_bytes_in_order() {
        let out = Arc::new(CaptureOut::default());
        let console = Console::new(out.clone());

        console.puts("Hello world\n");

        assert_eq!(out.bytes.lock().unwrap().as_slice(), b"Hello world\n");
    }

    #[test]
    fn formatted_output_goes_through_the_byte_channel() {
        let out = Arc::new(CaptureOut::default());
        let mut console = Console::new(out.clone());

        write!(console, "ticks={}", 1000).unwrap();

        assert_eq!(out.bytes.lock().unwrap().as_slice(), b"ticks=1000");
    }
}
