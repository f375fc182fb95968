use crate::utils::time::fmt_delta;
use serde::{Deserialize, Deserializer, Serialize};

/// Pre-alerts observed later than this past their ideal firing point are dropped.
pub const PRE_ALERT_LATE_BOUND_MS: i64 = -2000;

fn default_true() -> bool {
    true
}

/// Lead seconds as stored: any JSON number or null. Fractions are
/// truncated; negative, null and non-finite values become 0.
fn lenient_seconds<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
    let raw = Option::<f64>::deserialize(de)?;
    Ok(raw
        .filter(|s| s.is_finite() && *s > 0.0)
        .map_or(0, |s| s.min(f64::from(u32::MAX)) as u32))
}

/// A single scheduled reminder.
///
/// Field names on disk follow the stored JSON layout (`prepSec`,
/// `autoOpen`) so records written by earlier versions keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub id: String,
    pub title: String,
    pub url: String,
    /// Start instant, milliseconds since the Unix epoch.
    pub start: i64,
    #[serde(rename = "prepSec", default, deserialize_with = "lenient_seconds")]
    pub prep_lead_seconds: u32,
    #[serde(default = "default_true")]
    pub auto_open: bool,
    #[serde(default)]
    pub warned: bool,
    #[serde(default)]
    pub opened: bool,
}

/// Position of a target in its one-way lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    PreAlerted,
    Started,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::PreAlerted => "pre-alerted",
            Phase::Started => "started",
        }
    }
}

/// The two flag-setting transitions the scheduler can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    PreAlert,
    Start,
}

impl Transition {
    /// Operation name used in the audit log.
    pub fn operation(&self) -> &'static str {
        match self {
            Transition::PreAlert => "pre_alert",
            Transition::Start => "start",
        }
    }
}

impl Target {
    pub fn phase(&self) -> Phase {
        if self.opened {
            Phase::Started
        } else if self.warned {
            Phase::PreAlerted
        } else {
            Phase::Idle
        }
    }

    /// Milliseconds until start; negative once start has passed.
    pub fn delta(&self, now: i64) -> i64 {
        self.start - now
    }

    pub fn lead_ms(&self) -> i64 {
        i64::from(self.prep_lead_seconds) * 1000
    }

    /// Pre-alert guard: not yet warned and inside the lead window,
    /// at most 2s past the ideal firing point.
    pub fn pre_alert_due(&self, now: i64) -> bool {
        let delta = self.delta(now);
        !self.warned && delta <= self.lead_ms() && delta > PRE_ALERT_LATE_BOUND_MS
    }

    /// Start guard: not yet opened and start reached, however long ago.
    pub fn start_due(&self, now: i64) -> bool {
        !self.opened && self.delta(now) <= 0
    }

    /// Display-only: counting down inside the lead window.
    pub fn in_prep_window(&self, now: i64) -> bool {
        let delta = self.delta(now);
        delta > 0 && delta <= self.lead_ms()
    }

    pub fn has_started(&self, now: i64) -> bool {
        self.delta(now) <= 0
    }

    /// Countdown text shown next to the target.
    pub fn countdown(&self, now: i64) -> String {
        if self.has_started(now) {
            "started".to_string()
        } else {
            fmt_delta(self.delta(now))
        }
    }

    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }
}

/// Raw user input for a new target, validated by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDraft {
    pub title: String,
    pub url: String,
    /// Start as typed by the user; see `utils::time::parse_start`.
    pub start: String,
    pub prep_lead_seconds: u32,
    pub auto_open: bool,
}

impl TargetDraft {
    pub fn new(title: &str, url: &str, start: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            start: start.to_string(),
            prep_lead_seconds: 10,
            auto_open: true,
        }
    }

    pub fn lead(mut self, seconds: u32) -> Self {
        self.prep_lead_seconds = seconds;
        self
    }

    pub fn auto_open(mut self, auto_open: bool) -> Self {
        self.auto_open = auto_open;
        self
    }
}
