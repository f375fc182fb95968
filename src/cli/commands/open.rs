use crate::alerts::link::SystemOpener;
use crate::cli::parser::Cli;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::channels::LinkChannel;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;

use super::open_registry;

/// Open a target's link right away. Flags are left untouched.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Open { id } = &cli.command {
        let registry = open_registry(cfg)?;
        let full_id = registry.resolve(id)?;
        let target = registry
            .get(&full_id)
            .ok_or_else(|| AppError::UnknownTarget(id.clone()))?;

        info(format!("Opening {}", target.url));
        if !cli.test {
            SystemOpener.open(&target.url);
        }

        registry.store().audit("open", &full_id, &target.url);
    }

    Ok(())
}
