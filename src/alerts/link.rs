//! Link-open channel: hands the URL to the platform opener.
//!
//! Delivery is advisory; a missing opener or a blocked launch is ignored.

use super::spawn_detached;
use crate::core::channels::LinkChannel;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl LinkChannel for SystemOpener {
    fn open(&mut self, url: &str) {
        let launched = if cfg!(target_os = "macos") {
            spawn_detached("open", &[url])
        } else if cfg!(windows) {
            spawn_detached("cmd", &["/C", "start", "", url])
        } else {
            spawn_detached("xdg-open", &[url])
        };

        if !launched {
            debug!(url, "link could not be opened");
        }
    }
}
