mod cli;
pub mod commands;
mod db;
pub mod error;
pub mod models;
pub mod orthostatic;
pub mod reports;
pub mod settings;
pub mod store;
pub mod transfer;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use db::Database;
use orthostatic::OrthostaticController;
use settings::SettingsStore;
use store::RecordStore;

/// Everything a command needs: the record store, user settings and the
/// in-progress orthostatic test.
pub struct AppState {
    pub(crate) store: RecordStore,
    pub(crate) settings: SettingsStore,
    pub(crate) orthostatic: OrthostaticController,
    data_dir: PathBuf,
}

impl AppState {
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let database = Database::new(data_dir.join("pots-tracker.sqlite3"))?;
        let store = RecordStore::new(database);
        let settings = SettingsStore::new(data_dir.join("settings.json"))?;
        let orthostatic = OrthostaticController::new(store.clone());

        info!("Opened tracker data in {}", data_dir.display());

        Ok(Self {
            store,
            settings,
            orthostatic,
            data_dir,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Data directory when none is given on the command line.
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("POTS_TRACKER_DATA_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => PathBuf::from(home).join(".pots-tracker"),
        _ => PathBuf::from(".pots-tracker"),
    }
}

pub fn run() -> Result<()> {
    // Warnings by default; RUST_LOG overrides.
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(cli::run())
}
