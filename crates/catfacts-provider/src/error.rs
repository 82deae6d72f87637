//! Error type for `catfacts-provider`.
//!
//! These are construction-time failures only; per-attempt failures are
//! reported as [`catfacts_core::provider::FetchError`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid source url {url:?}: {reason}")]
  InvalidUrl { url: String, reason: String },

  #[error("failed to build HTTP client: {0}")]
  Client(#[from] reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
