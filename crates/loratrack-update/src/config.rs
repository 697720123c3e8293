//! Updater configuration
//!
//! Loads configuration from the following sources (low to high precedence):
//! 1. Built-in defaults
//! 2. `<config dir>/loratrack/update.yaml`
//! 3. Environment variables (`LORATRACK_*` prefix)

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, UpdateError};
use crate::{REPO_NAME, REPO_OWNER, VERSION};

/// Release listing page size
pub const RELEASES_PER_PAGE: u32 = 20;

/// Release host and network settings for the updater
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateConfig {
    /// Repository owner
    #[serde(default = "default_repo_owner")]
    pub repo_owner: String,

    /// Repository name, also the binary name
    #[serde(default = "default_repo_name")]
    pub repo_name: String,

    /// Base URL of the release listing API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Base URL releases are downloaded from
    #[serde(default = "default_download_url")]
    pub download_url: String,

    /// Number of releases fetched per listing
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for listing requests in seconds
    #[serde(default = "default_check_timeout")]
    pub check_timeout_secs: u64,

    /// Timeout for archive and manifest downloads in seconds
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            repo_owner: default_repo_owner(),
            repo_name: default_repo_name(),
            api_url: default_api_url(),
            download_url: default_download_url(),
            per_page: default_per_page(),
            user_agent: default_user_agent(),
            check_timeout_secs: default_check_timeout(),
            download_timeout_secs: default_download_timeout(),
        }
    }
}

fn default_repo_owner() -> String {
    REPO_OWNER.to_string()
}
fn default_repo_name() -> String {
    REPO_NAME.to_string()
}
fn default_api_url() -> String {
    "https://api.github.com/repos".to_string()
}
fn default_download_url() -> String {
    "https://github.com".to_string()
}
fn default_per_page() -> u32 {
    RELEASES_PER_PAGE
}
fn default_user_agent() -> String {
    format!(
        "loratrack-updater/{} ({}; {})",
        VERSION,
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
fn default_check_timeout() -> u64 {
    30
}
fn default_download_timeout() -> u64 {
    300 // 5 minutes
}

impl UpdateConfig {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default().apply_env_overrides(),
        }
    }

    /// Load configuration from a specific file (missing file means defaults)
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            debug!("Loading update config from {:?}", path);
            let content = fs::read_to_string(path)?;
            serde_yaml_ng::from_str(&content).map_err(|e| {
                UpdateError::invalid_config(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            Self::default()
        };

        config.apply_env_overrides()
    }

    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("loratrack").join("update.yaml"))
    }

    /// Apply `LORATRACK_*` environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self> {
        if let Ok(val) = env::var("LORATRACK_REPO_OWNER") {
            self.repo_owner = val;
        }

        if let Ok(val) = env::var("LORATRACK_REPO_NAME") {
            self.repo_name = val;
        }

        if let Ok(val) = env::var("LORATRACK_API_URL") {
            self.api_url = val;
        }

        if let Ok(val) = env::var("LORATRACK_DOWNLOAD_URL") {
            self.download_url = val;
        }

        if let Ok(val) = env::var("LORATRACK_CHECK_TIMEOUT_SECS") {
            self.check_timeout_secs = val.parse().map_err(|_| {
                UpdateError::invalid_config("LORATRACK_CHECK_TIMEOUT_SECS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("LORATRACK_DOWNLOAD_TIMEOUT_SECS") {
            self.download_timeout_secs = val.parse().map_err(|_| {
                UpdateError::invalid_config(
                    "LORATRACK_DOWNLOAD_TIMEOUT_SECS must be a valid number",
                )
            })?;
        }

        Ok(self)
    }

    /// Release listing URL
    pub fn releases_url(&self) -> String {
        format!(
            "{}/{}/{}/releases?per_page={}",
            self.api_url.trim_end_matches('/'),
            self.repo_owner,
            self.repo_name,
            self.per_page
        )
    }

    /// Base URL holding the artifacts of `tag`, with a trailing slash
    pub fn download_base(&self, tag: &str) -> String {
        format!(
            "{}/{}/{}/releases/download/{}/",
            self.download_url.trim_end_matches('/'),
            self.repo_owner,
            self.repo_name,
            tag
        )
    }

    /// Per-request timeout for listing calls
    pub fn check_timeout(&self) -> Duration {
        Duration::from_secs(self.check_timeout_secs)
    }

    /// Per-request timeout for downloads
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}
