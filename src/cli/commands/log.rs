use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

use super::open_registry;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let mut registry = open_registry(cfg)?;
        LogLogic::print_log(registry.store_mut().pool_mut())?;
    }

    Ok(())
}
