//! Error type for `catfacts-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  /// A stored row violates the fact invariants; the file was written by
  /// something other than this store.
  #[error("corrupt row {id}: {reason}")]
  CorruptRow { id: i64, reason: String },
}

impl From<Error> for catfacts_core::Error {
  fn from(e: Error) -> Self { catfacts_core::Error::store(e) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
