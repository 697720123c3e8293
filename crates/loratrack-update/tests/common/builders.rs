//! Builder patterns for release listing responses

use serde_json::{json, Value};

/// Builder for one release object as the listing API returns it
#[derive(Debug, Clone)]
pub struct ReleaseBuilder {
    tag_name: String,
    prerelease: bool,
    draft: bool,
}

impl ReleaseBuilder {
    /// Create a stable, published release
    pub fn new(tag: &str) -> Self {
        Self {
            tag_name: tag.to_string(),
            prerelease: false,
            draft: false,
        }
    }

    /// Mark as prerelease
    pub fn prerelease(mut self) -> Self {
        self.prerelease = true;
        self
    }

    /// Mark as draft
    pub fn draft(mut self) -> Self {
        self.draft = true;
        self
    }

    /// Build the JSON object, including fields the updater ignores
    pub fn build(self) -> Value {
        json!({
            "id": 1,
            "tag_name": self.tag_name,
            "name": format!("Release {}", self.tag_name),
            "prerelease": self.prerelease,
            "draft": self.draft,
            "published_at": "2026-01-15T10:00:00Z",
            "assets": [],
            "body": "Changelog",
        })
    }
}

/// Stable release JSON
pub fn stable(tag: &str) -> Value {
    ReleaseBuilder::new(tag).build()
}

/// Prerelease JSON
pub fn prerelease(tag: &str) -> Value {
    ReleaseBuilder::new(tag).prerelease().build()
}

/// Draft release JSON
pub fn draft(tag: &str) -> Value {
    ReleaseBuilder::new(tag).draft().build()
}

/// Listing body from release objects, newest first
pub fn listing(releases: Vec<Value>) -> Value {
    Value::Array(releases)
}
