// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::db;
use crate::gateway::Gateway;
use crate::session::{AuthSession, SqliteCredentialStore};
use crate::transport::HttpTransport;
use crate::utils::http_client;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Fintrack", "fintrack"));

pub const DEFAULT_API: &str = "http://127.0.0.1:8000";
pub const DEFAULT_CURRENCY: &str = "₹";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub currency: String,
    pub data_dir: PathBuf,
    pub timeout: Option<Duration>,
    pub verbosity: u8,
}

pub fn default_data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}

impl Config {
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let api_base = m
            .get_one::<String>("api")
            .cloned()
            .unwrap_or_else(|| DEFAULT_API.to_string());
        let currency = m
            .get_one::<String>("currency")
            .cloned()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let data_dir = match m.get_one::<PathBuf>("data-dir") {
            Some(p) => p.clone(),
            None => default_data_dir()?,
        };
        let timeout = m.get_one::<u64>("timeout").map(|s| Duration::from_secs(*s));
        let verbosity = m.get_count("verbose");
        Ok(Self {
            api_base,
            currency,
            data_dir,
            timeout,
            verbosity,
        })
    }

    pub fn log_filter(&self) -> EnvFilter {
        let level = match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }

    pub fn init_logging(&self) {
        // try_init: a second call (e.g. from tests) keeps the first subscriber
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.log_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Wire the HTTP client, the persisted credential and the controller.
    pub fn build_app(&self) -> Result<App<HttpTransport>> {
        let conn = db::open_or_init(&self.data_dir)?;
        let store = SqliteCredentialStore::new(conn)?;
        let transport = HttpTransport::new(http_client(self.timeout)?, &self.api_base);
        let gateway = Gateway::new(transport, AuthSession::new(Box::new(store)));
        Ok(App::new(gateway, &self.currency))
    }
}
