//! Caller-supplied deadlines for update operations

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

use crate::error::{Result, UpdateError};

/// Overall time limit for a public operation
///
/// Futures run under a deadline are dropped when it expires, which aborts
/// any in-flight request and drops the working directory they own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// No overall limit; only per-request timeouts apply
    pub fn none() -> Self {
        Self(None)
    }

    /// Expire `duration` from now
    pub fn after(duration: Duration) -> Self {
        Self(Some(Instant::now() + duration))
    }

    /// Expire at a fixed instant
    pub fn at(instant: Instant) -> Self {
        Self(Some(instant))
    }

    /// Time left before expiry (`None` when unbounded)
    pub fn remaining(&self) -> Option<Duration> {
        self.0
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// Whether the deadline has already passed
    pub fn is_expired(&self) -> bool {
        self.remaining().is_some_and(|left| left.is_zero())
    }

    /// Clamp a per-request timeout to the time left
    pub fn clamp(&self, timeout: Duration) -> Duration {
        match self.remaining() {
            Some(left) => timeout.min(left),
            None => timeout,
        }
    }

    /// Classify a request error, attributing timeouts to an expired deadline
    ///
    /// Per-request timeouts are clamped to the time left, so the request
    /// timer can fire on the same tick as the deadline itself.
    pub fn request_error(&self, err: reqwest::Error) -> UpdateError {
        if err.is_timeout() && self.is_expired() {
            UpdateError::DeadlineExceeded
        } else {
            UpdateError::Network(err)
        }
    }

    /// Drive `fut` to completion unless the deadline passes first
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.0 {
            Some(at) => tokio::time::timeout_at(at, fut)
                .await
                .map_err(|_| UpdateError::DeadlineExceeded)?,
            None => fut.await,
        }
    }
}
