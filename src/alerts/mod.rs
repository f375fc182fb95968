//! Concrete alert channels for a desktop terminal session.

pub mod link;
pub mod notify;
pub mod sound;

use crate::core::channels::{LinkChannel, NotificationChannel, SoundChannel};
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

/// Launch `program` without waiting for it. The child is reaped on a
/// background thread. Returns false when it could not be started.
pub(crate) fn spawn_detached(program: &str, args: &[&str]) -> bool {
    let spawned = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    match spawned {
        Ok(mut child) => {
            thread::spawn(move || {
                let _ = child.wait();
            });
            true
        }
        Err(e) => {
            debug!(program, error = %e, "failed to launch helper");
            false
        }
    }
}

/// Channel that drops every alert. Used for `--mute` and test runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct Muted;

impl SoundChannel for Muted {
    fn ensure_ready(&mut self) {}

    fn pulses(&mut self, count: u32) {
        debug!(count, "sound muted");
    }
}

impl NotificationChannel for Muted {
    fn notify(&mut self, title: &str, _body: &str) {
        debug!(title, "notification muted");
    }
}

impl LinkChannel for Muted {
    fn open(&mut self, url: &str) {
        debug!(url, "link opening muted");
    }
}
