//! Helpers for updater testing
//!
//! Provide a fake installed binary and updaters wired to a mock server.

use loratrack_update::{Platform, ReleaseArtifacts, UpdateConfig, Updater};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::MockServer;

use super::archives::*;
use super::constants::*;
use super::mock_server::*;

/// Configuration pointing at the mock server
pub fn test_config(server: &MockServer) -> UpdateConfig {
    UpdateConfig {
        repo_owner: TEST_OWNER.to_string(),
        repo_name: TEST_REPO.to_string(),
        api_url: format!("{}/api", server.uri()),
        download_url: format!("{}/download", server.uri()),
        check_timeout_secs: 5,
        download_timeout_secs: 10,
        ..Default::default()
    }
}

/// Linux amd64, independent of the host running the tests
pub fn linux_platform() -> Platform {
    Platform::from_rust("linux", "x86_64")
}

/// Windows amd64, independent of the host running the tests
pub fn windows_platform() -> Platform {
    Platform::from_rust("windows", "x86_64")
}

/// A temporary install directory holding a fake binary
pub struct FakeInstall {
    pub dir: TempDir,
    pub exe: PathBuf,
}

impl FakeInstall {
    /// Install `content` as `<dir>/<binary_name>`
    pub fn new(binary_name: &str, content: &[u8]) -> Self {
        let dir = TempDir::new().unwrap();
        let exe = dir.path().join(binary_name);
        fs::write(&exe, content).unwrap();
        Self { dir, exe }
    }

    /// Current content of the installed binary
    pub fn content(&self) -> Vec<u8> {
        fs::read(&self.exe).unwrap()
    }

    /// Sorted file names in the install directory
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Path of a sibling file in the install directory
    pub fn sibling(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Updater for `platform` replacing `exe`, talking to `server`
pub fn test_updater(server: &MockServer, platform: Platform, exe: &Path) -> Updater {
    Updater::new(test_config(server))
        .unwrap()
        .with_platform(platform)
        .with_executable_path(exe)
}

/// Artifact names for `tag` on `platform`
pub fn artifacts_for(platform: &Platform, tag: &str) -> ReleaseArtifacts {
    platform.artifacts(TEST_REPO, tag).unwrap()
}

/// Archive wrapper directory name, `<repo>-<version>-<os>-<arch>`
pub fn wrapper_dir(platform: &Platform, tag: &str) -> String {
    format!(
        "{}-{}-{}-{}",
        TEST_REPO,
        tag.trim_start_matches('v'),
        platform.os,
        platform.arch
    )
}

/// Serve a complete release (archive + manifest) for `platform`
///
/// Returns the archive bytes so tests can tamper with digests.
pub async fn mock_release_artifacts(
    server: &MockServer,
    platform: &Platform,
    tag: &str,
    content: &[u8],
) -> Vec<u8> {
    let artifacts = artifacts_for(platform, tag);
    let wrapper = wrapper_dir(platform, tag);
    let archive = match artifacts.format {
        loratrack_update::ArchiveFormat::TarGz => {
            tar_gz_archive(&wrapper, &artifacts.binary_name, content)
        }
        loratrack_update::ArchiveFormat::Zip => {
            zip_archive(&wrapper, &artifacts.binary_name, content)
        }
    };

    mock_artifact(server, tag, &artifacts.archive_name, archive.clone()).await;
    mock_artifact(
        server,
        tag,
        &artifacts.manifest_name,
        checksum_manifest(&artifacts.archive_name, &archive).into_bytes(),
    )
    .await;

    archive
}
