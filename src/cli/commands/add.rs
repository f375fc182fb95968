use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::target::TargetDraft;
use crate::ui::messages::{info, success, warning};
use crate::utils::time::format_start;

use super::open_registry;

/// `--auto-open` / `--no-auto-open` when given, else the configured default.
fn resolve_auto_open(on: bool, off: bool, default: bool) -> bool {
    match (on, off) {
        (true, _) => true,
        (_, true) => false,
        _ => default,
    }
}

/// Add a countdown target.
///
/// Invalid input leaves the registry untouched; the input is echoed back
/// so it can be corrected and re-run.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        title,
        url,
        start,
        lead,
        auto_open,
        no_auto_open,
    } = cmd
    {
        let draft = TargetDraft {
            title: title.clone(),
            url: url.clone(),
            start: start.clone(),
            prep_lead_seconds: lead.unwrap_or(cfg.default_prep_seconds),
            auto_open: resolve_auto_open(*auto_open, *no_auto_open, cfg.default_auto_open),
        };

        let mut registry = open_registry(cfg)?;

        let Some(id) = registry.add(&draft) else {
            warning("Target not added: title, url and a valid start time are required.");
            info(format!(
                "Input kept: title='{}' url='{}' start='{}'",
                title, url, start
            ));
            return Ok(());
        };

        if let Some(t) = registry.get(&id) {
            let start_str = format_start(t.start);
            registry.store().audit(
                "add",
                t.short_id(),
                &format!("'{}' at {} (lead {}s)", t.title, start_str, t.prep_lead_seconds),
            );
            success(format!(
                "Added target {} '{}' starting {}",
                t.short_id(),
                t.title,
                start_str
            ));
        }
    }

    Ok(())
}
