pub mod add;
pub mod checklist;
pub mod config;
pub mod del;
pub mod init;
pub mod list;
pub mod log;
pub mod open;
pub mod profile;
pub mod toggle;
pub mod watch;

use crate::config::Config;
use crate::core::registry::Registry;
use crate::db::kv::SqliteStore;
use crate::errors::AppResult;
use std::fs;
use std::path::Path;

/// Open the configured database (migrating it if needed) and load the
/// registry from it.
pub fn open_registry(cfg: &Config) -> AppResult<Registry<SqliteStore>> {
    if let Some(parent) = Path::new(&cfg.database).parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let store = SqliteStore::open(&cfg.database)?;
    Ok(Registry::load(store))
}
