//! Side-effect sinks invoked by the scheduler.
//!
//! Implementations swallow their own failures: a blocked sound device or
//! a denied notification must never stop the tick loop.

pub trait SoundChannel {
    /// Idempotently acquire the output device.
    fn ensure_ready(&mut self);
    /// Emit `count` short pulses without blocking the caller.
    fn pulses(&mut self, count: u32);
}

pub trait NotificationChannel {
    fn notify(&mut self, title: &str, body: &str);
}

pub trait LinkChannel {
    /// Open `url` in a new, detached context.
    fn open(&mut self, url: &str);
}

/// The three alert modalities owned by a scheduler.
pub struct AlertChannels {
    pub sound: Box<dyn SoundChannel>,
    pub notifier: Box<dyn NotificationChannel>,
    pub opener: Box<dyn LinkChannel>,
}

impl AlertChannels {
    pub fn new(
        sound: Box<dyn SoundChannel>,
        notifier: Box<dyn NotificationChannel>,
        opener: Box<dyn LinkChannel>,
    ) -> Self {
        Self {
            sound,
            notifier,
            opener,
        }
    }
}
