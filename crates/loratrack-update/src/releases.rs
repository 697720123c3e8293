//! Release index client
//!
//! Reads one page of the release host's newest-first listing and picks
//! the first admissible release. The host's ordering is authoritative;
//! releases are never re-sorted here.

use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::deadline::Deadline;
use crate::error::{Result, UpdateError};
use crate::version::{is_canonical, normalize_tag};

/// Accept header for the release listing API
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Release descriptor as returned by the listing; unknown fields are ignored
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release tag (e.g., "v1.2.3")
    pub tag_name: String,

    /// Whether this is a prerelease
    #[serde(default)]
    pub prerelease: bool,

    /// Whether this is a draft
    #[serde(default)]
    pub draft: bool,

    /// Published date
    #[serde(default)]
    pub published_at: Option<String>,
}

/// The release chosen from the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRelease {
    /// Canonical tag
    pub tag: String,

    /// Whether the host flagged it as a prerelease
    pub prerelease: bool,
}

/// Canonical tag of `release` if it passes the admission filter
pub fn admissible_tag(release: &Release, include_prerelease: bool) -> Option<String> {
    if release.draft {
        return None;
    }
    if release.prerelease && !include_prerelease {
        return None;
    }

    let tag = normalize_tag(&release.tag_name);
    if !is_canonical(&tag) {
        return None;
    }
    // Publishers sometimes forget the prerelease flag on release candidates
    if !include_prerelease && tag.to_ascii_lowercase().contains("-rc") {
        return None;
    }

    Some(tag)
}

/// First admissible release in listing order
pub fn select_latest(releases: &[Release], include_prerelease: bool) -> Option<LatestRelease> {
    releases.iter().find_map(|release| {
        admissible_tag(release, include_prerelease).map(|tag| LatestRelease {
            tag,
            prerelease: release.prerelease,
        })
    })
}

/// Client for the release listing API
#[derive(Debug, Clone)]
pub struct ReleaseIndex {
    /// HTTP client
    client: reqwest::Client,

    /// Full listing URL including the page size
    releases_url: String,

    /// User agent sent with listing requests
    user_agent: String,

    /// Per-request timeout
    timeout: Duration,
}

impl ReleaseIndex {
    /// Create a release index over a shared HTTP client
    pub fn new(
        client: reqwest::Client,
        releases_url: impl Into<String>,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            releases_url: releases_url.into(),
            user_agent: user_agent.into(),
            timeout,
        }
    }

    /// Listing URL
    pub fn releases_url(&self) -> &str {
        &self.releases_url
    }

    /// Newest admissible release
    pub async fn latest(&self, deadline: Deadline, include_prerelease: bool) -> Result<LatestRelease> {
        let releases = self.fetch(deadline).await?;

        let latest =
            select_latest(&releases, include_prerelease).ok_or(UpdateError::NoSuitableRelease)?;

        info!(
            "Latest release: {}{}",
            latest.tag,
            if latest.prerelease { " (prerelease)" } else { "" }
        );
        Ok(latest)
    }

    /// Every admissible release on the listing page, newest first
    pub async fn list(&self, deadline: Deadline, include_prerelease: bool) -> Result<Vec<Release>> {
        let releases = self.fetch(deadline).await?;

        Ok(releases
            .into_iter()
            .filter_map(|mut release| {
                let tag = admissible_tag(&release, include_prerelease)?;
                release.tag_name = tag;
                Some(release)
            })
            .collect())
    }

    /// Fetch and decode the raw listing
    pub async fn fetch(&self, deadline: Deadline) -> Result<Vec<Release>> {
        deadline.run(self.fetch_listing(deadline)).await
    }

    async fn fetch_listing(&self, deadline: Deadline) -> Result<Vec<Release>> {
        debug!("Fetching releases from: {}", self.releases_url);

        let response = self
            .client
            .get(&self.releases_url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, GITHUB_JSON)
            .timeout(deadline.clamp(self.timeout))
            .send()
            .await
            .map_err(|e| deadline.request_error(e))?;

        if !response.status().is_success() {
            return Err(UpdateError::http_status(
                &self.releases_url,
                response.status(),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| deadline.request_error(e))?;
        let releases: Vec<Release> = serde_json::from_slice(&body)?;
        debug!("Listing returned {} releases", releases.len());

        Ok(releases)
    }
}
