// Entry point for the cinder dashboard.
// Loads configuration, sets up file logging, and runs the TUI until quit.

mod api;
mod app;
mod config;
mod dashboard;
mod error;
mod state;
mod store;
mod ui;

use std::fs::{self, OpenOptions};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::api::BackendClient;
use crate::app::App;
use crate::config::{Cli, Config};
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::store::FileStore;

/// Log to a file; the terminal belongs to the TUI.
fn setup_logging(config: &Config) -> Result<()> {
    if let Some(dir) = config.log_file.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let default_level = if config.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cinder={default_level}")));

    tracing_subscriber::fmt()
        .with_writer(file)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();

    tracing::info!("cinder v{} starting", env!("CARGO_PKG_VERSION"));
    Ok(())
}

fn run(config: Config) -> Result<()> {
    let client = BackendClient::new(&config)?;
    let login_url = client.login_url()?.to_string();
    tracing::info!(backend = %client.base_url(), "using backend");

    let store = FileStore::open_or_empty(&config.store_path);
    let mut app = App::new(Dashboard::new(store), Arc::new(client), login_url);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result?;

    tracing::info!("cinder exiting");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = setup_logging(&config) {
        eprintln!("Error: failed to open log file {:?}: {}", config.log_file, e);
        return ExitCode::FAILURE;
    }

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "cinder failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
