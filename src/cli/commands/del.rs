use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

use super::open_registry;

/// Delete a target. Unknown ids are reported but are not an error.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id } = cmd {
        let mut registry = open_registry(cfg)?;

        let full_id = match registry.resolve(id) {
            Ok(full) => full,
            Err(AppError::UnknownTarget(_)) => {
                warning(format!("No target matches '{}'; nothing deleted.", id));
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let title = registry
            .get(&full_id)
            .map(|t| t.title.clone())
            .unwrap_or_default();

        if registry.remove(&full_id) {
            registry
                .store()
                .audit("del", &full_id, &format!("Deleted '{}'", title));
            success(format!("Deleted target '{}'.", title));
        }
    }

    Ok(())
}
