//! Configuration and saved context.
//!
//! Handles:
//! - Backend base URL (flag / `BOOTH_API_BASE_URL` / config file)
//! - Request timeout
//! - Saved default selection (date, booth, round)

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use booth_domain::{BoothType, ReservationDate, Round};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Overrides the platform config directory.
pub const CONFIG_DIR_ENV: &str = "BOOTH_CONFIG_DIR";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Get the config directory path.
fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "booth-reservations", "booth")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL. There is no default: a missing URL is a
    /// configuration error on the first network call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Saved default selection.
    #[serde(default)]
    pub context: SavedContext,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            context: SavedContext::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return default.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_dir()?.join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<()> {
        let dir = config_dir()?;
        fs::create_dir_all(&dir)?;
        self.save_to(&dir.join(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).with_context(|| format!("Failed to write config to {:?}", path))
    }

    /// Resolve the base URL, preferring an explicit override. Blank values
    /// count as unset.
    pub fn api_url<'a>(&'a self, override_url: Option<&'a str>) -> Option<&'a str> {
        override_url
            .or(self.api_url.as_deref())
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Saved default selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<ReservationDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub booth: Option<BoothType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<Round>,
}
