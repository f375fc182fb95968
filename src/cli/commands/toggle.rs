use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

use super::open_registry;

/// Flip auto-open. Has no effect on a link already opened (or skipped)
/// at start time.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Toggle { id } = cmd {
        let mut registry = open_registry(cfg)?;
        let full_id = registry.resolve(id)?;

        let now_on = registry
            .toggle_auto_open(&full_id)
            .ok_or_else(|| AppError::UnknownTarget(id.clone()))?;

        let state = if now_on { "on" } else { "off" };
        let title = registry
            .get(&full_id)
            .map(|t| t.title.clone())
            .unwrap_or_default();

        registry
            .store()
            .audit("toggle", &full_id, &format!("auto-open {}", state));
        success(format!("Auto-open for '{}' is now {}.", title, state));
    }

    Ok(())
}
