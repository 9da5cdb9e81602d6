use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::{audit, open_store, ready_database};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database and its schema
///  - the migration of records left in the previous storage layout
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;

    let cfg = Config {
        database: db_path.to_string_lossy().to_string(),
        ..Config::load()
    };

    info("Initializing bishop…");
    if !cli.test {
        info(format!("Config file : {}", Config::config_file().display()));
    }
    info(format!("Database    : {}", cfg.database));

    let store = open_store(&cfg)?;
    let db = ready_database(&store);

    audit(
        &store,
        "init",
        "",
        &format!("Database initialized at {} ({})", cfg.database, db.state().as_str()),
    );

    success(format!("Database initialized at {}", cfg.database));
    Ok(())
}
