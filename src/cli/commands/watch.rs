use crate::alerts::Muted;
use crate::alerts::link::SystemOpener;
use crate::alerts::notify::DesktopNotifier;
use crate::alerts::sound::TerminalBell;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::channels::{AlertChannels, SoundChannel};
use crate::core::clock::{Clock, SystemClock, Ticker};
use crate::core::registry::Registry;
use crate::core::scheduler::{Scheduler, TickReport};
use crate::core::store::KvStore;
use crate::db::kv::SqliteStore;
use crate::errors::AppResult;
use crate::models::target::{Target, Transition};
use crate::ui::messages::{info, pre_alert, started, warning};
use crate::utils::colors::{REVERSE, RESET, color_for_countdown};
use crate::utils::time::fmt_delta;
use tracing::debug;

use super::open_registry;

fn build_channels(cli: &Cli, cfg: &Config, notify: bool, mute: bool) -> AlertChannels {
    if cli.test {
        return AlertChannels::new(Box::new(Muted), Box::new(Muted), Box::new(Muted));
    }

    let sound: Box<dyn SoundChannel> = if mute {
        Box::new(Muted)
    } else {
        let mut bell = TerminalBell::new(cfg.sound_pulse_gap_ms);
        bell.ensure_ready();
        if !bell.is_ready() {
            warning("Sound output unavailable; alerts will be silent.");
        }
        Box::new(bell)
    };

    let mut notifier = DesktopNotifier::new(cfg.notifications);
    if notify {
        notifier.grant();
    }
    debug!(granted = notifier.is_granted(), "notification permission");

    AlertChannels::new(sound, Box::new(notifier), Box::new(SystemOpener))
}

fn target_row(t: &Target, now: i64, highlighted: bool) -> String {
    let (on, off) = if highlighted { (REVERSE, RESET) } else { ("", "") };
    format!(
        "   {on} {} {off} {}{}{RESET}",
        t.title,
        color_for_countdown(t, now),
        t.countdown(now)
    )
}

/// The target row the live view last showed highlighted.
#[derive(Debug, Default)]
struct HighlightRow {
    shown: Option<String>,
}

impl HighlightRow {
    /// Row to print after a tick: the highlighted target when a highlight
    /// appears or moves to another target, the plain row once it expires,
    /// otherwise nothing.
    fn update<S: KvStore>(
        &mut self,
        scheduler: &Scheduler,
        registry: &Registry<S>,
        now: i64,
    ) -> Option<String> {
        let current = scheduler.highlighted(now);
        if current == self.shown.as_deref() {
            return None;
        }

        let previous = std::mem::replace(&mut self.shown, current.map(str::to_string));
        match current {
            Some(id) => registry.get(id).map(|t| target_row(t, now, true)),
            None => previous
                .as_deref()
                .and_then(|id| registry.get(id))
                .map(|t| target_row(t, now, false)),
        }
    }
}

/// Print fired alerts and record them in the internal log.
fn render(report: &TickReport, registry: &Registry<SqliteStore>) {
    for alert in &report.alerts {
        let short: String = alert.id.chars().take(8).collect();
        match alert.transition {
            Transition::PreAlert => {
                pre_alert(format!(
                    "{} [{}] starts in {}",
                    alert.title,
                    short,
                    fmt_delta(alert.delta)
                ));
            }
            Transition::Start => {
                let opening = if alert.opened_link {
                    format!(" · opening {}", alert.url)
                } else {
                    String::new()
                };
                started(format!("{} [{}] has started{}", alert.title, short, opening));
            }
        }

        registry.store().audit(
            alert.transition.operation(),
            &alert.id,
            &format!("'{}' fired at delta {} ms", alert.title, alert.delta),
        );
    }
}

/// Run the tick loop against the wall clock.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch {
        notify,
        mute,
        ticks,
        interval,
    } = &cli.command
    {
        let mut registry = open_registry(cfg)?;
        let mut scheduler = Scheduler::new(build_channels(cli, cfg, *notify, *mute));
        let ticker = Ticker::new(interval.unwrap_or(cfg.tick_interval_ms)).limit(*ticks);
        let clock = SystemClock;
        let mut highlight = HighlightRow::default();

        info(format!(
            "Watching {} target(s) every {} ms. Press Ctrl+C to stop.",
            registry.len(),
            ticker.interval().as_millis()
        ));

        let ran = ticker.run(|_| {
            let now = clock.now_ms();
            let report = scheduler.tick(&mut registry, now);
            render(&report, &registry);
            if let Some(row) = highlight.update(&scheduler, &registry, now) {
                println!("{row}");
            }
        });

        info(format!("Stopped after {} tick(s).", ran));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use crate::models::target::TargetDraft;
    use chrono::{TimeZone, Utc};

    const T0: i64 = 1_767_225_600_000;

    fn muted_scheduler() -> Scheduler {
        Scheduler::new(AlertChannels::new(
            Box::new(Muted),
            Box::new(Muted),
            Box::new(Muted),
        ))
    }

    #[test]
    fn test_highlight_row_appears_and_clears() {
        let start = Utc.timestamp_millis_opt(T0 + 5000).unwrap().to_rfc3339();
        let mut registry = Registry::load(MemoryStore::new());
        registry
            .add(&TargetDraft::new("Glow", "https://example.com", &start).lead(10))
            .unwrap();
        let mut scheduler = muted_scheduler();
        let mut row = HighlightRow::default();

        assert_eq!(row.update(&scheduler, &registry, T0), None);

        scheduler.tick(&mut registry, T0);
        let lit = row.update(&scheduler, &registry, T0).unwrap();
        assert!(lit.contains(REVERSE));
        assert!(lit.contains("Glow"));
        assert!(lit.contains("00:00:05"));

        assert_eq!(row.update(&scheduler, &registry, T0 + 250), None);

        // pre-alert highlight lasts 1200 ms
        let cleared = row.update(&scheduler, &registry, T0 + 1200).unwrap();
        assert!(!cleared.contains(REVERSE));
        assert!(cleared.contains("Glow"));
        assert_eq!(row.update(&scheduler, &registry, T0 + 1450), None);

        scheduler.tick(&mut registry, T0 + 5000);
        let lit = row.update(&scheduler, &registry, T0 + 5000).unwrap();
        assert!(lit.contains(REVERSE));
        assert!(lit.contains("started"));
        assert!(row.update(&scheduler, &registry, T0 + 6500).is_some());
    }
}
