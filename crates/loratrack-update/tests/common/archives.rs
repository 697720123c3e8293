//! In-memory release archive builders
//!
//! Archives mirror the publisher layout: the binary sits inside a
//! `<repo>-<version>-<os>-<arch>/` wrapping directory.

use flate2::write::GzEncoder;
use flate2::Compression;
use sha2::{Digest, Sha256};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

/// Gzip-compressed tarball holding `binary_name` under `wrapper/`
pub fn tar_gz_archive(wrapper: &str, binary_name: &str, content: &[u8]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));

    let mut dir = tar::Header::new_gnu();
    dir.set_entry_type(tar::EntryType::Directory);
    dir.set_size(0);
    dir.set_mode(0o755);
    builder
        .append_data(&mut dir, format!("{}/", wrapper), std::io::empty())
        .unwrap();

    let mut readme = tar::Header::new_gnu();
    readme.set_size(6);
    readme.set_mode(0o644);
    builder
        .append_data(&mut readme, format!("{}/README", wrapper), &b"readme"[..])
        .unwrap();

    let mut file = tar::Header::new_gnu();
    file.set_size(content.len() as u64);
    file.set_mode(0o755);
    builder
        .append_data(&mut file, format!("{}/{}", wrapper, binary_name), content)
        .unwrap();

    builder.into_inner().unwrap().finish().unwrap()
}

/// Zip archive holding `binary_name` under `wrapper/`
pub fn zip_archive(wrapper: &str, binary_name: &str, content: &[u8]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    writer
        .add_directory(format!("{}/", wrapper), options)
        .unwrap();
    writer
        .start_file(format!("{}/README", wrapper), options)
        .unwrap();
    writer.write_all(b"readme").unwrap();
    writer
        .start_file(format!("{}/{}", wrapper, binary_name), options)
        .unwrap();
    writer.write_all(content).unwrap();

    writer.finish().unwrap().into_inner()
}

/// Lowercase hex SHA256 of `data`
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Checksum manifest with an entry for `file_name` plus unrelated lines
pub fn checksum_manifest(file_name: &str, data: &[u8]) -> String {
    manifest_with_digest(file_name, &sha256_hex(data))
}

/// Checksum manifest recording an arbitrary digest for `file_name`
pub fn manifest_with_digest(file_name: &str, digest: &str) -> String {
    format!(
        "{}  decoder-other-darwin-arm64.tar.gz\n\n{}  {}\n",
        "ab".repeat(32),
        digest,
        file_name
    )
}
