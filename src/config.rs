use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{DEFAULT_BACKEND_URL, DEFAULT_LOG_FILE, DEFAULT_PROBE_TIMEOUT_SECS};
use crate::error::EstimatorError;

const CONFIG_DIR: &str = ".bhp";
const CONFIG_FILE: &str = "config.yaml";

/// Client settings, read from `~/.bhp/config.yaml` when present
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend_url: String,
    pub probe_timeout_secs: u64,
    /// No bound unless set; the transport decides when to give up
    pub estimate_timeout_secs: Option<u64>,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: String::from(DEFAULT_BACKEND_URL),
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            estimate_timeout_secs: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: String::from("info"),
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    /// Load from an explicit path (must exist) or the default path (may be absent)
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        match explicit {
            Some(path) => Self::load_file(path),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load_file(&path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    fn load_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// Apply a backend address coming from the environment or the command line
    pub fn with_backend_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.backend_url = url;
        }
        self
    }

    /// Reject settings the client cannot work with
    pub fn validate(&self) -> Result<(), EstimatorError> {
        let url = reqwest::Url::parse(&self.backend_url)
            .map_err(|e| EstimatorError::Config(format!("invalid backend_url '{}': {}", self.backend_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(EstimatorError::Config(format!(
                "backend_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.probe_timeout_secs == 0 {
            return Err(EstimatorError::Config("probe_timeout_secs must be positive".into()));
        }
        Ok(())
    }

    /// Backend address without a trailing slash
    pub fn base_url(&self) -> &str {
        self.backend_url.trim_end_matches('/')
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn estimate_timeout(&self) -> Option<Duration> {
        self.estimate_timeout_secs.map(Duration::from_secs)
    }
}
