//! Self-update functionality for the LoRaTrack tracker utilities
//!
//! Provides:
//! - Version normalisation and semver comparison
//! - Release lookup with draft and prerelease filtering
//! - Platform-specific artifact naming
//! - Archive download with per-request timeouts and caller deadlines
//! - SHA256 verification against the published checksum manifest
//! - Single-binary extraction from tar.gz and zip archives
//! - Same-filesystem staged replacement of the running executable
//!
//! # Example
//!
//! ```no_run
//! use loratrack_update::{Deadline, UpdateConfig, Updater, VERSION};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> loratrack_update::Result<()> {
//!     let updater = Updater::new(UpdateConfig::load()?)?;
//!     let check = updater
//!         .check_for_update(Deadline::after(Duration::from_secs(30)), VERSION, false)
//!         .await?;
//!
//!     if check.has_update {
//!         let tag = updater
//!             .update_to_latest(Deadline::after(Duration::from_secs(600)), VERSION, false)
//!             .await?;
//!         println!("Updated to {}; restart to use it", tag);
//!     }
//!     Ok(())
//! }
//! ```

pub mod checksum;
pub mod config;
pub mod deadline;
pub mod download;
pub mod error;
pub mod extract;
pub mod platform;
pub mod releases;
pub mod replace;
pub mod updater;
pub mod version;

pub use config::UpdateConfig;
pub use deadline::Deadline;
pub use download::Fetcher;
pub use error::{Result, UpdateError};
pub use platform::{ArchiveFormat, Platform, ReleaseArtifacts};
pub use releases::{LatestRelease, Release, ReleaseIndex};
pub use replace::Replacer;
pub use updater::{UpdateCheck, Updater};

/// Current version of the workspace
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Release repository owner
pub const REPO_OWNER: &str = "loratrack";

/// Release repository name, also the binary name
pub const REPO_NAME: &str = "loratrack";
