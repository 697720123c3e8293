//! Binary replacement
//!
//! The new binary is staged next to the running executable so the final
//! rename stays on one filesystem. Windows refuses to rename over a running
//! executable, so there the staged file is left as `<binary>.new`.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{Result, UpdateError};

/// Suffix of the staging file used as the rename source
const STAGING_EXT: &str = "tmp";

/// Suffix of a side-by-side binary awaiting a manual or restart swap
const PENDING_EXT: &str = "new";

/// Places an extracted binary over the current executable
#[derive(Debug, Clone)]
pub struct Replacer {
    /// Directory holding the current executable
    install_dir: PathBuf,

    /// Leaf name of the binary being replaced
    binary_name: String,

    /// Leave a `.new` file instead of renaming over the destination
    pending_only: bool,
}

impl Replacer {
    /// Replace `binary_name` in the directory of `current_exe`
    pub fn new(current_exe: &Path, binary_name: impl Into<String>) -> Result<Self> {
        let install_dir = current_exe
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or_else(|| {
                UpdateError::ExecutableNotFound(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} has no parent directory", current_exe.display()),
                ))
            })?
            .to_path_buf();

        Ok(Self {
            install_dir,
            binary_name: binary_name.into(),
            pending_only: cfg!(windows),
        })
    }

    /// Stage a `.new` file instead of swapping in place
    pub fn pending_only(mut self, pending_only: bool) -> Self {
        self.pending_only = pending_only;
        self
    }

    /// Final location of the binary
    pub fn destination(&self) -> PathBuf {
        self.install_dir.join(&self.binary_name)
    }

    /// Staging path used as the rename source
    pub fn staging_path(&self) -> PathBuf {
        self.sibling(STAGING_EXT)
    }

    /// Side-by-side path left when the swap cannot complete
    pub fn pending_path(&self) -> PathBuf {
        self.sibling(PENDING_EXT)
    }

    fn sibling(&self, ext: &str) -> PathBuf {
        self.install_dir
            .join(format!("{}.{}", self.binary_name, ext))
    }

    /// Put `new_binary` in place, returning the replaced path
    ///
    /// Fails with [`UpdateError::PendingReplace`] when only a `.new` file
    /// could be staged (Windows), and with
    /// [`UpdateError::ManualReplaceRequired`] when the POSIX rename failed
    /// and a `.new` file was left for the user.
    pub fn replace(&self, new_binary: &Path) -> Result<PathBuf> {
        let destination = self.destination();
        let staging = self.staging_path();

        make_executable(new_binary)?;

        debug!("Staging {:?} -> {:?}", new_binary, staging);
        if let Err(e) = fs::copy(new_binary, &staging) {
            discard(&staging);
            return Err(e.into());
        }

        if self.pending_only {
            let pending = self.pending_path();
            if let Err(e) = fs::rename(&staging, &pending) {
                discard(&staging);
                return Err(e.into());
            }
            info!("New binary staged at {:?}", pending);
            return Err(UpdateError::PendingReplace { path: pending });
        }

        match fs::rename(&staging, &destination) {
            Ok(()) => {
                info!("Binary replaced: {:?}", destination);
                Ok(destination)
            }
            Err(e) => {
                warn!("Failed to rename {:?} over {:?}: {}", staging, destination, e);
                discard(&staging);

                let pending = self.pending_path();
                fs::copy(new_binary, &pending)?;

                Err(UpdateError::ManualReplaceRequired {
                    path: pending,
                    reason: e.to_string(),
                })
            }
        }
    }
}

/// Remove a staging file, logging rather than failing
fn discard(staging: &Path) {
    if let Err(e) = fs::remove_file(staging) {
        debug!("Could not remove staging file {:?}: {}", staging, e);
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
