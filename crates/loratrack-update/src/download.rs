//! HTTP fetcher streaming release artifacts to disk
//!
//! Downloads are single-shot: a non-2xx status or transport failure is
//! returned as-is and the caller decides whether to try again.

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::CONTENT_LENGTH;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::deadline::Deadline;
use crate::error::{Result, UpdateError};

/// Streams remote files to local paths
#[derive(Debug, Clone)]
pub struct Fetcher {
    /// HTTP client
    client: reqwest::Client,

    /// Per-request timeout for downloads
    timeout: Duration,

    /// Enable progress bars
    show_progress: bool,
}

impl Fetcher {
    /// Create a fetcher with its own HTTP client
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self::with_client(client, timeout))
    }

    /// Create a fetcher sharing an existing HTTP client
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            show_progress: false,
        }
    }

    /// Enable or disable progress bars
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Download `url` into a new file at `dest`, returning the byte count
    pub async fn fetch_to_file(&self, deadline: Deadline, url: &str, dest: &Path) -> Result<u64> {
        deadline.run(self.fetch(deadline, url, dest)).await
    }

    async fn fetch(&self, deadline: Deadline, url: &str, dest: &Path) -> Result<u64> {
        debug!("Downloading {} -> {:?}", url, dest);

        let response = self
            .client
            .get(url)
            .timeout(deadline.clamp(self.timeout))
            .send()
            .await
            .map_err(|e| deadline.request_error(e))?;

        if !response.status().is_success() {
            return Err(UpdateError::http_status(url, response.status()));
        }

        let total_size = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|ct| ct.to_str().ok())
            .and_then(|ct| ct.parse::<u64>().ok());

        let progress = self.progress_bar(url, total_size);

        let mut file = File::create(dest)?;
        let mut downloaded = 0u64;
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk: bytes::Bytes = chunk_result.map_err(|e| deadline.request_error(e))?;
            file.write_all(&chunk)?;

            downloaded += chunk.len() as u64;

            if let Some(pb) = &progress {
                pb.set_position(downloaded);
            }
        }
        file.flush()?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        info!("Downloaded {} ({})", file_name(url), human_readable_size(downloaded));
        Ok(downloaded)
    }

    fn progress_bar(&self, url: &str, total_size: Option<u64>) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = match total_size {
            Some(total) => ProgressBar::new(total),
            None => ProgressBar::new_spinner(),
        };
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message(format!("Downloading {}", file_name(url)));
        Some(pb)
    }
}

/// Last path segment of a URL
fn file_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Convert bytes to human-readable size
fn human_readable_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}
