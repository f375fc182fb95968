//! System notification channel.
//!
//! Permission is a runtime grant (`watch --notify`), never persisted.
//! Without it, or without a notifier on the host, alerts are dropped.

use super::spawn_detached;
use crate::core::channels::NotificationChannel;
use tracing::debug;

const APP_NAME: &str = "rcountdown";

type Launcher = Box<dyn FnMut(&str, &[&str]) -> bool>;

pub struct DesktopNotifier {
    granted: bool,
    launch: Launcher,
}

impl DesktopNotifier {
    pub fn new(granted: bool) -> Self {
        Self::with_launcher(granted, spawn_detached)
    }

    /// Notifier that hands the helper command to `launch` instead of
    /// spawning it.
    pub fn with_launcher<F>(granted: bool, launch: F) -> Self
    where
        F: FnMut(&str, &[&str]) -> bool + 'static,
    {
        Self {
            granted,
            launch: Box::new(launch),
        }
    }

    pub fn grant(&mut self) {
        self.granted = true;
    }

    pub fn is_granted(&self) -> bool {
        self.granted
    }
}

/// Escape a value for an AppleScript string literal.
fn applescript_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

impl NotificationChannel for DesktopNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        if !self.granted {
            debug!(title, "notification permission not granted");
            return;
        }

        let sent = if cfg!(target_os = "macos") {
            let script = format!(
                "display notification {} with title {}",
                applescript_quote(body),
                applescript_quote(title)
            );
            (self.launch)("osascript", &["-e", &script])
        } else if cfg!(unix) {
            (self.launch)("notify-send", &["--app-name", APP_NAME, title, body])
        } else {
            false
        };

        if !sent {
            debug!(title, "system notification not delivered");
        }
    }
}
