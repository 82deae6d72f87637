//! The `FactProvider` trait and its retry policy.
//!
//! A provider wraps an unreliable external source that yields one candidate
//! fact per call. Backends only implement a single attempt
//! ([`FactProvider::fetch_once`]); the bounded retry loop in
//! [`FactProvider::fetch`] is shared by every backend.

use std::{future::Future, time::Duration};

use thiserror::Error;

use crate::{Error, Result};

// ─── Transient failures ──────────────────────────────────────────────────────

/// Why a single fetch attempt produced no candidate.
///
/// Every variant is transient: it is logged and retried, and never crosses the
/// provider boundary.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error("attempt timed out after {0:?}")]
  Timeout(Duration),

  #[error("transport error: {0}")]
  Transport(String),

  #[error("unexpected status {0}")]
  Status(u16),

  #[error("malformed payload: {0}")]
  Malformed(String),

  #[error("payload has no `fact` field")]
  MissingFact,
}

// ─── Retry policy ────────────────────────────────────────────────────────────

/// Per-call latency tolerance for [`FactProvider::fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  /// Upper bound on a single attempt.
  pub timeout: Duration,
  /// Number of attempts; always at least one.
  pub retries: u32,
  /// Fixed pause between a failed attempt and the next one.
  pub delay:   Duration,
}

impl RetryPolicy {
  pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
  pub const DEFAULT_RETRIES: u32 = 3;
  pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

  /// Build a policy, rejecting values that would make `fetch` meaningless.
  pub fn new(timeout: Duration, retries: u32, delay: Duration) -> Result<Self> {
    if retries == 0 {
      return Err(Error::Config("retries must be at least 1".into()));
    }
    if timeout.is_zero() {
      return Err(Error::Config("request timeout must be non-zero".into()));
    }
    Ok(Self { timeout, retries, delay })
  }
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      timeout: Self::DEFAULT_TIMEOUT,
      retries: Self::DEFAULT_RETRIES,
      delay:   Self::DEFAULT_DELAY,
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an external source of candidate facts.
pub trait FactProvider: Send + Sync {
  /// Perform exactly one request and return the raw candidate, untrimmed and
  /// unvalidated.
  fn fetch_once(
    &self,
  ) -> impl Future<Output = Result<String, FetchError>> + Send + '_;

  /// Fetch one candidate, retrying transient failures.
  ///
  /// Makes up to `policy.retries` sequential attempts, each bounded by
  /// `policy.timeout`. A failed or blank attempt is logged and followed by a
  /// pause of `policy.delay`. Returns `None` once every attempt has failed;
  /// ordinary network failures never surface as errors.
  fn fetch(
    &self,
    policy: RetryPolicy,
  ) -> impl Future<Output = Option<String>> + Send + '_ {
    async move {
      for attempt in 1..=policy.retries {
        let outcome = tokio::time::timeout(policy.timeout, self.fetch_once())
          .await
          .unwrap_or(Err(FetchError::Timeout(policy.timeout)));

        match outcome {
          Ok(candidate) if !candidate.trim().is_empty() => return Some(candidate),
          Ok(_) => tracing::warn!(attempt, "empty fact received"),
          Err(e) => tracing::warn!(attempt, error = %e, "fact fetch attempt failed"),
        }

        if attempt < policy.retries {
          tokio::time::sleep(policy.delay).await;
        }
      }

      tracing::error!(retries = policy.retries, "failed to fetch fact after all retries");
      None
    }
  }
}
