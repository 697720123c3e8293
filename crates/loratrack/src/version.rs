//! Build and release identity of the running binary
//!
//! Ties the compiled version to the release it would be published as:
//! the canonical tag, the artifact for this host, and the repository
//! that `loratrack upgrade` pulls from.

use loratrack_update::version::normalize_version;
use loratrack_update::{Platform, UpdateConfig};
use serde::{Deserialize, Serialize};

/// Version information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Crate version as compiled
    pub version: String,

    /// Git commit SHA (short)
    pub commit: Option<String>,

    /// RFC 3339 build timestamp
    pub built_at: Option<String>,

    /// Rust target triple
    pub target: Option<String>,

    /// Host in release naming (`linux-amd64`, ...)
    pub platform: String,

    /// `<owner>/<repo>` that upgrades are fetched from
    pub release_repo: String,

    /// Release archive matching this build, when the version is semver
    pub artifact: Option<String>,
}

impl VersionInfo {
    /// Version info for this build against `config`'s release repository
    pub fn for_config(config: &UpdateConfig) -> Self {
        let version = env!("CARGO_PKG_VERSION").to_string();
        let platform = Platform::current();
        let artifact = platform
            .artifacts(&config.repo_name, &normalize_version(&version))
            .ok()
            .map(|a| a.archive_name);

        Self {
            version,
            commit: option_env!("GIT_SHA").map(String::from),
            built_at: option_env!("BUILD_TIMESTAMP").map(String::from),
            target: option_env!("TARGET").map(String::from),
            platform: platform.to_string(),
            release_repo: format!("{}/{}", config.repo_owner, config.repo_name),
            artifact,
        }
    }

    /// Canonical release tag of this build, empty for non-semver builds
    pub fn release_tag(&self) -> String {
        normalize_version(&self.version)
    }
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "loratrack {}", self.version)?;
        if let Some(commit) = &self.commit {
            write!(f, " ({})", commit)?;
        }
        write!(f, " {}", self.platform)
    }
}
