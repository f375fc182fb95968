//! Countdown scheduler: the per-tick phase state machine.
//!
//! Each target moves IDLE → PRE_ALERTED → STARTED and never back. The
//! guards are "flag currently false", so every alert group fires at most
//! once per target no matter how often a tick re-evaluates it.
//!
//! Both guards are checked independently. A target first observed less
//! than 2s after its start therefore fires its pre-alert and its
//! start-alert in the same tick.

use crate::core::channels::AlertChannels;
use crate::core::registry::Registry;
use crate::core::store::KvStore;
use crate::models::target::{Target, Transition};
use crate::utils::time::fmt_delta;
use tracing::{debug, info};

pub const PRE_ALERT_PULSES: u32 = 2;
pub const START_PULSES: u32 = 3;
pub const PRE_ALERT_HIGHLIGHT_MS: i64 = 1200;
pub const START_HIGHLIGHT_MS: i64 = 1500;

/// Notification title for pre-alerts.
pub const PRE_ALERT_TITLE: &str = "Starting soon";

/// Transient visual marker for the most recently alerted target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub id: String,
    pub until: i64,
}

/// One fired transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub url: String,
    pub transition: Transition,
    /// `start - now` at the moment of firing.
    pub delta: i64,
    /// Start-alert only: the link was handed to the opener.
    pub opened_link: bool,
}

/// Alerts fired during one tick, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub now: i64,
    pub alerts: Vec<Alert>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn count(&self, transition: Transition) -> usize {
        self.alerts
            .iter()
            .filter(|a| a.transition == transition)
            .count()
    }
}

pub struct Scheduler {
    channels: AlertChannels,
    highlight: Option<Highlight>,
}

impl Scheduler {
    pub fn new(channels: AlertChannels) -> Self {
        Self {
            channels,
            highlight: None,
        }
    }

    /// Re-read the registry, evaluate every target against `now`, fire
    /// what is due and record the flags through the registry.
    ///
    /// An alert fires only if its flag was still unset in the store, so a
    /// target removed or already marked through another handle stays quiet.
    pub fn tick<S: KvStore>(&mut self, registry: &mut Registry<S>, now: i64) -> TickReport {
        let mut report = TickReport {
            now,
            alerts: Vec::new(),
        };

        registry.reload();
        for target in registry.list() {
            if target.pre_alert_due(now) && registry.mark_phase(&target.id, Transition::PreAlert) {
                report.alerts.push(self.fire_pre_alert(&target, now));
            }

            if target.start_due(now) && registry.mark_phase(&target.id, Transition::Start) {
                report.alerts.push(self.fire_start(&target, now));
            }
        }

        if !report.is_empty() {
            debug!(now, fired = report.alerts.len(), "tick fired alerts");
        }
        report
    }

    /// Id of the highlighted target, if its highlight has not expired.
    pub fn highlighted(&self, now: i64) -> Option<&str> {
        self.highlight
            .as_ref()
            .filter(|h| now < h.until)
            .map(|h| h.id.as_str())
    }

    fn fire_pre_alert(&mut self, target: &Target, now: i64) -> Alert {
        let delta = target.delta(now);
        info!(id = %target.id, title = %target.title, delta, "pre-alert");

        self.set_highlight(&target.id, now + PRE_ALERT_HIGHLIGHT_MS);
        let body = format!("{} · starts in {}", target.title, fmt_delta(delta));
        self.channels.notifier.notify(PRE_ALERT_TITLE, &body);
        self.channels.sound.pulses(PRE_ALERT_PULSES);

        Alert {
            id: target.id.clone(),
            title: target.title.clone(),
            url: target.url.clone(),
            transition: Transition::PreAlert,
            delta,
            opened_link: false,
        }
    }

    fn fire_start(&mut self, target: &Target, now: i64) -> Alert {
        let delta = target.delta(now);
        info!(id = %target.id, title = %target.title, delta, "start-alert");

        self.set_highlight(&target.id, now + START_HIGHLIGHT_MS);
        self.channels.sound.pulses(START_PULSES);
        if target.auto_open {
            self.channels.opener.open(&target.url);
        }

        Alert {
            id: target.id.clone(),
            title: target.title.clone(),
            url: target.url.clone(),
            transition: Transition::Start,
            delta,
            opened_link: target.auto_open,
        }
    }

    fn set_highlight(&mut self, id: &str, until: i64) {
        self.highlight = Some(Highlight {
            id: id.to_string(),
            until,
        });
    }
}
