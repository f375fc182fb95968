//! Clock source: current time plus a fixed-cadence tick loop.
//!
//! Alerts may fire up to one cadence period late. Nothing is delivered
//! while the process is suspended.

use crate::utils::time::now_ms;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::Duration;
use tracing::error;

/// Default polling cadence.
pub const DEFAULT_TICK_MS: u64 = 250;
const MIN_TICK_MS: u64 = 10;

pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        now_ms()
    }
}

/// Settable clock for tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn at(now: i64) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.set(now);
    }

    pub fn advance(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

/// Drives a callback at a fixed cadence on the calling thread.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    max_ticks: Option<u64>,
}

impl Ticker {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms.max(MIN_TICK_MS)),
            max_ticks: None,
        }
    }

    /// Stop after `n` ticks instead of running until the process exits.
    pub fn limit(mut self, n: Option<u64>) -> Self {
        self.max_ticks = n;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run `tick` with the tick number (starting at 1) until the limit is
    /// reached. A panicking tick is logged and the loop keeps going.
    /// Returns the number of ticks run.
    pub fn run<F>(&self, mut tick: F) -> u64
    where
        F: FnMut(u64),
    {
        let mut n = 0;
        loop {
            n += 1;
            if panic::catch_unwind(AssertUnwindSafe(|| tick(n))).is_err() {
                error!(tick = n, "tick panicked; loop continues");
            }

            if self.max_ticks.is_some_and(|max| n >= max) {
                return n;
            }
            thread::sleep(self.interval);
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_MS)
    }
}
