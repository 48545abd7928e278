//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `mine_core` linkage and database bootstrap outside the app.
//! - Print the stored items through the same view model the app uses.
//!
//! Usage: `mine_cli [DB_PATH]`. Without an argument the path comes from
//! `MINE_DB_PATH` or falls back to the temp directory.

use mine_core::{
    init_logging_with, CoreConfig, DatabaseConfig, DbHandle, ItemIndexViewModel, LoadOutcome,
    SqliteItemStore,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("mine_core ping={}", mine_core::ping());
    println!("mine_core version={}", mine_core::core_version());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CoreConfig::from_env()?;
    if let Some(path) = std::env::args().nth(1) {
        config.database = DatabaseConfig::new(path);
    }
    if let Some(logging) = &config.logging {
        init_logging_with(logging)?;
    }

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let db = DbHandle::open(&config.database)?;
    let view_model = ItemIndexViewModel::new(SqliteItemStore::new(db));

    println!("db_path={}", config.database.path.display());
    match runtime.block_on(view_model.load_items()) {
        LoadOutcome::Loaded(count) => println!("items={count}"),
        LoadOutcome::Skipped | LoadOutcome::Failed => return Err("item load failed".into()),
    }
    for item in view_model.data_set().snapshot() {
        println!("{}\t{}\t{}\t{}", item.id, item.text, item.description, item.value);
    }
    Ok(())
}
