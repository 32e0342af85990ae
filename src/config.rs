//! Runtime configuration.
//!
//! Sources, highest precedence first:
//! - `--file` on the command line (applied by the binary)
//! - `ROOMBOOK_FILE` / `ROOMBOOK_ERROR_DELAY_MS` environment variables
//! - `<config dir>/roombook/config.json`
//! - built-in defaults

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "roombook";
const CONFIG_FILE: &str = "config.json";
const BOOKINGS_FILE: &str = "bookings.csv";

const FILE_ENV: &str = "ROOMBOOK_FILE";
const ERROR_DELAY_ENV: &str = "ROOMBOOK_ERROR_DELAY_MS";

const DEFAULT_ERROR_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location of the bookings file. `None` means the platform data directory.
    pub bookings_file: Option<PathBuf>,
    /// Pause after reporting a recoverable error, in milliseconds.
    pub error_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bookings_file: None,
            error_delay_ms: DEFAULT_ERROR_DELAY_MS,
        }
    }
}

impl Config {
    /// Loads the config file and applies environment overrides.
    /// A missing or unreadable config file falls back to defaults.
    pub fn load() -> Self {
        let config = match config_path().and_then(|path| Self::from_file(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    /// Reads `path`, returning defaults if it does not exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    /// Applies overrides from `lookup`, normally the process environment.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(file) = lookup(FILE_ENV).filter(|v| !v.is_empty()) {
            self.bookings_file = Some(PathBuf::from(file));
        }
        if let Some(raw) = lookup(ERROR_DELAY_ENV) {
            match raw.parse() {
                Ok(ms) => self.error_delay_ms = ms,
                Err(_) => tracing::warn!("Ignoring {}={:?}: not a number", ERROR_DELAY_ENV, raw),
            }
        }
        self
    }

    /// The bookings file to use, falling back to the platform data directory.
    pub fn bookings_path(&self) -> Result<PathBuf> {
        match &self.bookings_file {
            Some(path) => Ok(path.clone()),
            None => default_bookings_path(),
        }
    }

    pub fn error_delay(&self) -> Duration {
        Duration::from_millis(self.error_delay_ms)
    }
}

fn config_path() -> Result<PathBuf> {
    let mut path =
        dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}

fn default_bookings_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().join(BOOKINGS_FILE))
}
