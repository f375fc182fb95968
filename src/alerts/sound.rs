//! Terminal bell sound channel.
//!
//! The output handle is acquired lazily on the first pulse (or an
//! explicit `ensure_ready`) and kept for the channel's lifetime. If it
//! cannot be acquired the channel stays silent.

use crate::core::channels::SoundChannel;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_PULSE_GAP_MS: u64 = 160;

type Output = Arc<Mutex<Box<dyn Write + Send>>>;
type Acquire = Box<dyn FnMut() -> io::Result<Box<dyn Write + Send>>>;

pub struct TerminalBell {
    output: Option<Output>,
    unavailable: bool,
    gap: Duration,
    acquire: Acquire,
}

impl TerminalBell {
    pub fn new(gap_ms: u64) -> Self {
        Self::with_output(gap_ms, open_terminal)
    }

    /// Bell writing to whatever `acquire` returns on first use.
    pub fn with_output<F>(gap_ms: u64, acquire: F) -> Self
    where
        F: FnMut() -> io::Result<Box<dyn Write + Send>> + 'static,
    {
        Self {
            output: None,
            unavailable: false,
            gap: Duration::from_millis(gap_ms),
            acquire: Box::new(acquire),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.output.is_some()
    }
}

impl Default for TerminalBell {
    fn default() -> Self {
        Self::new(DEFAULT_PULSE_GAP_MS)
    }
}

/// Prefer the controlling terminal so the bell rings even when stdout
/// is redirected.
fn open_terminal() -> io::Result<Box<dyn Write + Send>> {
    if cfg!(unix)
        && let Ok(tty) = OpenOptions::new().write(true).open("/dev/tty")
    {
        return Ok(Box::new(tty));
    }
    Ok(Box::new(io::stderr()))
}

impl SoundChannel for TerminalBell {
    fn ensure_ready(&mut self) {
        if self.output.is_some() || self.unavailable {
            return;
        }
        match (self.acquire)() {
            Ok(out) => self.output = Some(Arc::new(Mutex::new(out))),
            Err(e) => {
                debug!(error = %e, "sound output unavailable");
                self.unavailable = true;
            }
        }
    }

    fn pulses(&mut self, count: u32) {
        self.ensure_ready();
        let Some(output) = self.output.clone() else {
            return;
        };
        let gap = self.gap;

        thread::spawn(move || {
            for i in 0..count {
                if let Ok(mut out) = output.lock() {
                    let _ = out.write_all(b"\x07");
                    let _ = out.flush();
                }
                if i + 1 < count {
                    thread::sleep(gap);
                }
            }
        });
    }
}
