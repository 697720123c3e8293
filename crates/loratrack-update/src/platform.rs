//! Platform detection and release artifact naming
//!
//! Maps the host onto the publisher's `<os>-<arch>` naming and derives the
//! archive, manifest and binary names for a release. Changes to how the
//! publisher names artifacts belong here and nowhere else.

use std::fmt;

use crate::error::{Result, UpdateError};
use crate::version::{is_canonical, tag_to_version};

/// Compression format of a release archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// Gzip-compressed tarball
    TarGz,
    /// Zip archive
    Zip,
}

impl ArchiveFormat {
    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::TarGz => "tar.gz",
            Self::Zip => "zip",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Target platform in the publisher's naming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Operating system (`darwin`, `linux`, `windows`, ...)
    pub os: String,

    /// CPU architecture (`amd64`, `arm64`, ...)
    pub arch: String,

    /// Archive format used for this OS
    pub format: ArchiveFormat,
}

impl Platform {
    /// Platform of the running host
    pub fn current() -> Self {
        Self::from_rust(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Translate Rust's `std::env::consts` names into publisher names
    pub fn from_rust(os: &str, arch: &str) -> Self {
        let os = match os {
            "macos" => "darwin",
            other => other,
        };
        let arch = match arch {
            "x86_64" => "amd64",
            "aarch64" => "arm64",
            "x86" => "386",
            "powerpc64" => "ppc64",
            "loongarch64" => "loong64",
            other => other,
        };
        let format = if os == "windows" {
            ArchiveFormat::Zip
        } else {
            ArchiveFormat::TarGz
        };

        Self {
            os: os.to_string(),
            arch: arch.to_string(),
            format,
        }
    }

    /// Whether this is a Windows platform
    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }

    /// Leaf name of the binary inside the archive
    pub fn binary_name(&self, repo: &str) -> String {
        if self.is_windows() {
            format!("{}.exe", repo)
        } else {
            repo.to_string()
        }
    }

    /// Artifact names for a release of `repo` tagged `tag`
    pub fn artifacts(&self, repo: &str, tag: &str) -> Result<ReleaseArtifacts> {
        if !is_canonical(tag) {
            return Err(UpdateError::InvalidTag {
                tag: tag.to_string(),
            });
        }
        let version = tag_to_version(tag);

        Ok(ReleaseArtifacts {
            archive_name: format!(
                "{}-{}-{}-{}.{}",
                repo,
                version,
                self.os,
                self.arch,
                self.format.extension()
            ),
            manifest_name: format!("{}-{}-checksums.txt", repo, version),
            binary_name: self.binary_name(repo),
            format: self.format,
        })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// File names making up one platform's release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseArtifacts {
    /// `<repo>-<version>-<os>-<arch>.<format>`
    pub archive_name: String,

    /// `<repo>-<version>-checksums.txt`
    pub manifest_name: String,

    /// Binary leaf name inside the archive
    pub binary_name: String,

    /// Archive format
    pub format: ArchiveFormat,
}
