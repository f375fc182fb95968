/// ANSI color helper utilities for terminal output.
use crate::models::target::Target;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const REVERSE: &str = "\x1b[7m";

/// Countdown color:
/// started → green
/// inside the lead window → amber
/// otherwise → reset
pub fn color_for_countdown(target: &Target, now: i64) -> &'static str {
    if target.has_started(now) {
        GREEN
    } else if target.in_prep_window(now) {
        YELLOW
    } else {
        RESET
    }
}

/// Returns GREY for empty text so blank profile fields stay readable.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}

pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}
