//! SHA-256 verification against a published checksum manifest
//!
//! Manifests carry one `<hex digest>  <file name>` line per artifact.
//! Unrelated lines are tolerated.

use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, UpdateError};

/// Read buffer size for hashing (1MB)
const HASH_CHUNK_SIZE: usize = 1024 * 1024;

/// Find the digest recorded for `file_name` in manifest text
pub fn find_digest(manifest: &str, file_name: &str) -> Option<String> {
    manifest
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() >= 2 && line.ends_with(file_name) {
                Some(fields[0].to_string())
            } else {
                None
            }
        })
}

/// Calculate the SHA256 checksum of a file as lowercase hex
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; HASH_CHUNK_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Verify `archive` against the manifest entry for `file_name`
///
/// A missing entry and a digest mismatch are reported as distinct errors.
pub fn verify_archive(archive: &Path, manifest: &Path, file_name: &str) -> Result<()> {
    let content = fs::read_to_string(manifest)?;
    let expected =
        find_digest(&content, file_name).ok_or_else(|| UpdateError::checksum_not_found(file_name))?;

    debug!("Calculating SHA256 checksum of {:?}", archive);
    let actual = sha256_file(archive)?;

    if !actual.eq_ignore_ascii_case(&expected) {
        return Err(UpdateError::ChecksumMismatch {
            file: file_name.to_string(),
            expected,
            actual,
        });
    }

    info!("Checksum verified for {}", file_name);
    Ok(())
}
