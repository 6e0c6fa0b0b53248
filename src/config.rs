// Command line and environment configuration.
// Parses CLI flags and resolves them into validated runtime settings.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reqwest::Url;

use crate::error::{CinderError, Result};
use crate::store;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Parser)]
#[command(name = "cinder", version, about = "Dashboard for CI workflow runs and their carbon cost")]
pub struct Cli {
    /// Backend origin serving the auth and workflow endpoints.
    #[arg(long, env = "CINDER_BACKEND_URL", default_value = "http://localhost:3000")]
    pub backend_url: String,

    /// Session cookie (`name=value`) obtained from the browser login.
    #[arg(long, env = "CINDER_SESSION_COOKIE", hide_env_values = true)]
    pub session_cookie: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "CINDER_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Where to keep the remembered owner/repository.
    #[arg(long, env = "CINDER_STORE_PATH")]
    pub store_path: Option<PathBuf>,

    /// Log file path.
    #[arg(long, env = "CINDER_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: Url,
    pub session_cookie: Option<String>,
    pub request_timeout: Duration,
    pub store_path: PathBuf,
    pub log_file: PathBuf,
    pub verbose: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let backend_url = Url::parse(&cli.backend_url)
            .map_err(|e| CinderError::Config(format!("backend URL {:?}: {}", cli.backend_url, e)))?;
        if backend_url.cannot_be_a_base() {
            return Err(CinderError::Config(format!(
                "backend URL {:?} cannot be used as an origin",
                cli.backend_url
            )));
        }

        if cli.timeout_secs == 0 {
            return Err(CinderError::Config(
                "timeout must be at least one second".to_string(),
            ));
        }

        let session_cookie = cli
            .session_cookie
            .map(|cookie| cookie.trim().to_string())
            .filter(|cookie| !cookie.is_empty());

        let store_path = match cli.store_path {
            Some(path) => path,
            None => store::store_path().ok_or_else(|| {
                CinderError::Config("no data directory; pass --store-path".to_string())
            })?,
        };
        let log_file = match cli.log_file {
            Some(path) => path,
            None => store::log_path().ok_or_else(|| {
                CinderError::Config("no data directory; pass --log-file".to_string())
            })?,
        };

        Ok(Self {
            backend_url,
            session_cookie,
            request_timeout: Duration::from_secs(cli.timeout_secs),
            store_path,
            log_file,
            verbose: cli.verbose,
        })
    }
}
