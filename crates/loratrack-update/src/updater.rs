//! Update orchestration
//!
//! The pipeline for an update is:
//! 1. Resolve the newest admissible release
//! 2. Resolve platform artifact names
//! 3. Download archive and checksum manifest into a fresh working directory
//! 4. Verify the archive digest
//! 5. Extract the binary
//! 6. Replace the current executable
//!
//! The working directory is removed on every exit path, including deadline
//! expiry. The downloaded binary is never executed.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};

use crate::checksum::verify_archive;
use crate::config::UpdateConfig;
use crate::deadline::Deadline;
use crate::download::Fetcher;
use crate::error::{Result, UpdateError};
use crate::extract::extract_binary;
use crate::platform::Platform;
use crate::releases::{LatestRelease, Release, ReleaseIndex};
use crate::replace::Replacer;
use crate::version::{is_update, normalize_version};

/// Outcome of an update check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCheck {
    /// Canonical tag of the newest admissible release
    pub latest_tag: String,

    /// Whether that release is flagged as a prerelease
    pub prerelease: bool,

    /// Whether it is newer than the running version
    pub has_update: bool,
}

/// Self-updater for the LoRaTrack binaries
pub struct Updater {
    /// Release host and network settings
    config: UpdateConfig,

    /// Release listing client
    index: ReleaseIndex,

    /// Artifact downloader
    fetcher: Fetcher,

    /// Target platform for artifact names
    platform: Platform,

    /// Executable to replace; resolved from the process when unset
    executable: Option<PathBuf>,
}

impl Updater {
    /// Create an updater from configuration
    pub fn new(config: UpdateConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()?;

        let index = ReleaseIndex::new(
            client.clone(),
            config.releases_url(),
            config.user_agent.clone(),
            config.check_timeout(),
        );
        let fetcher = Fetcher::with_client(client, config.download_timeout());

        debug!(
            "Updater initialized: repo={}/{}, listing={}",
            config.repo_owner,
            config.repo_name,
            index.releases_url()
        );

        Ok(Self {
            config,
            index,
            fetcher,
            platform: Platform::current(),
            executable: None,
        })
    }

    /// Create an updater from the default configuration sources
    pub fn from_env() -> Result<Self> {
        Self::new(UpdateConfig::load()?)
    }

    /// Replace this path instead of the running executable
    pub fn with_executable_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Resolve artifacts for another platform
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Enable or disable download progress bars
    pub fn with_progress(mut self, show: bool) -> Self {
        self.fetcher = self.fetcher.with_progress(show);
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &UpdateConfig {
        &self.config
    }

    /// Get the target platform
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Get reference to the release index
    pub fn release_index(&self) -> &ReleaseIndex {
        &self.index
    }

    /// Path of the executable that an update would replace
    pub fn executable_path(&self) -> Result<PathBuf> {
        match &self.executable {
            Some(path) => Ok(path.clone()),
            None => std::env::current_exe().map_err(UpdateError::ExecutableNotFound),
        }
    }

    /// Newest admissible release
    pub async fn latest_release(
        &self,
        deadline: Deadline,
        include_prerelease: bool,
    ) -> Result<LatestRelease> {
        self.index.latest(deadline, include_prerelease).await
    }

    /// Admissible releases on the listing page, newest first
    pub async fn list_releases(
        &self,
        deadline: Deadline,
        include_prerelease: bool,
    ) -> Result<Vec<Release>> {
        self.index.list(deadline, include_prerelease).await
    }

    /// Check whether a release newer than `current_version` exists
    pub async fn check_for_update(
        &self,
        deadline: Deadline,
        current_version: &str,
        include_prerelease: bool,
    ) -> Result<UpdateCheck> {
        let latest = self.latest_release(deadline, include_prerelease).await?;
        let has_update = is_update(&latest.tag, current_version);

        if has_update {
            info!("Update available: {} -> {}", current_version, latest.tag);
        } else {
            debug!("Already on latest version: {}", current_version);
        }

        Ok(UpdateCheck {
            latest_tag: latest.tag,
            prerelease: latest.prerelease,
            has_update,
        })
    }

    /// Update the executable to the newest admissible release
    ///
    /// Returns the installed tag. Fails with
    /// [`UpdateError::AlreadyUpToDate`] when nothing newer exists, and with
    /// [`UpdateError::PendingReplace`] or
    /// [`UpdateError::ManualReplaceRequired`] when a `.new` file was left
    /// beside the executable instead of an in-place swap.
    pub async fn update_to_latest(
        &self,
        deadline: Deadline,
        current_version: &str,
        include_prerelease: bool,
    ) -> Result<String> {
        deadline
            .run(self.run_update(deadline, current_version, include_prerelease))
            .await
    }

    async fn run_update(
        &self,
        deadline: Deadline,
        current_version: &str,
        include_prerelease: bool,
    ) -> Result<String> {
        info!("Starting self-update from {}", current_version);

        let latest = self.latest_release(deadline, include_prerelease).await?;
        if !is_update(&latest.tag, current_version) {
            info!("Already at version {}", latest.tag);
            return Err(UpdateError::AlreadyUpToDate {
                current: display_version(current_version),
                latest: latest.tag,
            });
        }

        let executable = self.executable_path()?;
        self.install(deadline, &latest.tag, &executable).await?;

        info!("Updated {} -> {}", current_version, latest.tag);
        Ok(latest.tag)
    }

    /// Download, verify, extract and install `tag` over `executable`
    async fn install(&self, deadline: Deadline, tag: &str, executable: &Path) -> Result<PathBuf> {
        let artifacts = self.platform.artifacts(&self.config.repo_name, tag)?;
        let base = self.config.download_base(tag);
        debug!(
            "Resolved artifacts for {}: {} / {}",
            self.platform, artifacts.archive_name, artifacts.manifest_name
        );

        let work_dir = tempfile::Builder::new()
            .prefix(&format!("{}-update-", self.config.repo_name))
            .tempdir()?;

        let archive_path = work_dir.path().join(&artifacts.archive_name);
        let manifest_path = work_dir.path().join(&artifacts.manifest_name);

        info!("Downloading {}", artifacts.archive_name);
        self.fetcher
            .fetch_to_file(
                deadline,
                &format!("{}{}", base, artifacts.archive_name),
                &archive_path,
            )
            .await?;
        self.fetcher
            .fetch_to_file(
                deadline,
                &format!("{}{}", base, artifacts.manifest_name),
                &manifest_path,
            )
            .await?;

        verify_archive(&archive_path, &manifest_path, &artifacts.archive_name)?;

        let extracted = work_dir.path().join(&artifacts.binary_name);
        extract_binary(
            &archive_path,
            artifacts.format,
            &artifacts.binary_name,
            &extracted,
        )?;

        let replacer = Replacer::new(executable, artifacts.binary_name.clone())?
            .pending_only(self.platform.is_windows());
        let result = replacer.replace(&extracted);

        close_work_dir(work_dir);
        result
    }
}

/// Remove the working directory, logging rather than failing on error
fn close_work_dir(work_dir: TempDir) {
    let path = work_dir.path().to_path_buf();
    if let Err(e) = work_dir.close() {
        debug!("Failed to remove working directory {:?}: {}", path, e);
    }
}

fn display_version(current: &str) -> String {
    let canonical = normalize_version(current);
    if canonical.is_empty() {
        current.to_string()
    } else {
        canonical
    }
}
