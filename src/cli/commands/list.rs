use crate::config::Config;
use crate::core::clock::{Clock, SystemClock};
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::colors::{color_for_countdown, paint};
use crate::utils::formatting::{truncate, yes_no};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_start;

use super::open_registry;

const TITLE_MAX: usize = 32;
const URL_MAX: usize = 48;

/// List targets ordered by start time with their live countdown.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let registry = open_registry(cfg)?;
    let now = SystemClock.now_ms();
    let targets = registry.list();

    if targets.is_empty() {
        info("No targets yet. Add one with `rcountdown add <TITLE> <URL> <START>`.");
        return Ok(());
    }

    let mut table = Table::new(
        ["ID", "TITLE", "START", "COUNTDOWN", "LEAD", "AUTO", "PHASE", "URL"]
            .into_iter()
            .map(Column::new)
            .collect(),
    );

    for t in &targets {
        table.add_row(vec![
            t.short_id().to_string(),
            truncate(&t.title, TITLE_MAX),
            format_start(t.start),
            paint(color_for_countdown(t, now), &t.countdown(now)),
            format!("{}s", t.prep_lead_seconds),
            yes_no(t.auto_open).to_string(),
            t.phase().label().to_string(),
            truncate(&t.url, URL_MAX),
        ]);
    }

    print!("{}", table.render());
    Ok(())
}
