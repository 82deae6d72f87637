//! Error types for `catfacts-core`.

use thiserror::Error;

use crate::fact::{MAX_FACT_LEN, MIN_FACT_LEN};

/// A candidate fact whose trimmed length falls outside the accepted bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
  "fact length must be between {} and {} characters, got {length}",
  MIN_FACT_LEN,
  MAX_FACT_LEN
)]
pub struct ValidationError {
  /// Length of the trimmed input, in characters.
  pub length: usize,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("duplicate fact: {0:?}")]
  Duplicate(String),

  #[error("no facts available")]
  NotFound,

  #[error("invalid configuration: {0}")]
  Config(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend-specific error.
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
