use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::kv::SqliteStore;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and configuration file (skipped in test mode)
///  - the SQLite database with all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_str = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rCountdown…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", db_str);

    let store = SqliteStore::open(&db_str)?;
    store.audit(
        "init",
        "Database initialized",
        &format!("Database initialized at {}", db_str),
    );

    println!("🎉 rCountdown initialization completed!");
    Ok(())
}
