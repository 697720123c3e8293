//! Single-file extraction from release archives
//!
//! Entries are matched by leaf name only, since the publisher wraps each
//! binary in a release-named directory. Everything else in the archive is
//! discarded and entry permissions are not preserved.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io;
use std::path::Path;
use tar::Archive;
use tracing::debug;

use crate::error::{Result, UpdateError};
use crate::platform::ArchiveFormat;

/// Extract the entry named `binary_name` from `archive` into `dest`
pub fn extract_binary(
    archive: &Path,
    format: ArchiveFormat,
    binary_name: &str,
    dest: &Path,
) -> Result<u64> {
    debug!("Extracting {} from {:?} ({})", binary_name, archive, format);

    match format {
        ArchiveFormat::TarGz => extract_from_tarball(archive, binary_name, dest),
        ArchiveFormat::Zip => extract_from_zip(archive, binary_name, dest),
    }
}

/// Final path component of an archive entry name
fn leaf_name(entry_name: &str) -> &str {
    entry_name
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(entry_name)
}

fn extract_from_tarball(archive_path: &Path, binary_name: &str, dest: &Path) -> Result<u64> {
    let file = File::open(archive_path)?;
    let mut archive = Archive::new(GzDecoder::new(file));

    for entry in archive.entries()? {
        let mut entry = entry?;

        if !entry.header().entry_type().is_file() {
            continue;
        }

        let path = entry.path()?.into_owned();
        let matches = path
            .to_str()
            .map(|name| leaf_name(name) == binary_name)
            .unwrap_or(false);
        if !matches {
            continue;
        }

        debug!("Found binary in tarball: {:?}", path);
        let mut out = File::create(dest)?;
        let written = io::copy(&mut entry, &mut out)?;
        return Ok(written);
    }

    Err(UpdateError::entry_not_found(binary_name))
}

fn extract_from_zip(archive_path: &Path, binary_name: &str, dest: &Path) -> Result<u64> {
    let file = File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        if entry.is_dir() || leaf_name(entry.name()) != binary_name {
            continue;
        }

        debug!("Found binary in zip: {}", entry.name());
        let mut out = File::create(dest)?;
        let written = io::copy(&mut entry, &mut out)?;
        return Ok(written);
    }

    Err(UpdateError::entry_not_found(binary_name))
}
