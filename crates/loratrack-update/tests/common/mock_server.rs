//! Mock server helpers for release host testing
//!
//! Listing lives under `/api/<owner>/<repo>/releases` and artifacts under
//! `/download/<owner>/<repo>/releases/download/<tag>/`.

use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::constants::*;

/// Path of the release listing
pub fn listing_path() -> String {
    format!("/api/{}/{}/releases", TEST_OWNER, TEST_REPO)
}

/// Path of a release artifact
pub fn artifact_path(tag: &str, file_name: &str) -> String {
    format!(
        "/download/{}/{}/releases/download/{}/{}",
        TEST_OWNER, TEST_REPO, tag, file_name
    )
}

/// Serve the release listing
pub async fn mock_listing(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .and(query_param("per_page", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serve the release listing with a fixed status
pub async fn mock_listing_status(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Serve an artifact body
pub async fn mock_artifact(server: &MockServer, tag: &str, file_name: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(artifact_path(tag, file_name)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(server)
        .await;
}

/// Serve an artifact with a fixed status
pub async fn mock_artifact_status(server: &MockServer, tag: &str, file_name: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(artifact_path(tag, file_name)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Fail the test if any artifact download is attempted
pub async fn forbid_downloads(server: &MockServer) {
    Mock::given(method("GET"))
        .and(wiremock::matchers::path_regex(r"^/download/.*"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

/// Serve an artifact body after `delay`
pub async fn mock_artifact_delayed(
    server: &MockServer,
    tag: &str,
    file_name: &str,
    body: Vec<u8>,
    delay: std::time::Duration,
) {
    Mock::given(method("GET"))
        .and(path(artifact_path(tag, file_name)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body).set_delay(delay))
        .mount(server)
        .await;
}
