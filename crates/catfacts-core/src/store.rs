//! The `FactStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `catfacts-store-sqlite`).
//! The import controller and the HTTP API depend on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::{
  Result,
  fact::{Fact, FactId},
};

/// Abstraction over a durable, content-unique fact store.
///
/// Facts are append-only: there is no update or delete. Every method returns
/// owned data; nothing hands out references into storage.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait FactStore: Send + Sync {
  /// Validate and persist `text`, returning the freshly assigned id.
  ///
  /// The input is trimmed and re-validated by the store:
  /// - [`Error::Validation`](crate::Error::Validation) if the trimmed length
  ///   is out of bounds;
  /// - [`Error::Duplicate`](crate::Error::Duplicate) if identical text is
  ///   already stored.
  ///
  /// In both cases storage is left unchanged. On success the row is committed
  /// before the future resolves. The uniqueness check and the write are
  /// atomic: two concurrent inserts of the same text never both succeed.
  fn insert<'a>(
    &'a self,
    text: &'a str,
  ) -> impl Future<Output = Result<FactId>> + Send + 'a;

  /// All facts in ascending id order. Empty when the store is empty.
  fn list(&self) -> impl Future<Output = Result<Vec<Fact>>> + Send + '_;

  /// One fact chosen uniformly at random, or
  /// [`Error::NotFound`](crate::Error::NotFound) when the store is empty.
  fn random(&self) -> impl Future<Output = Result<Fact>> + Send + '_;

  /// Number of stored facts.
  fn count(&self) -> impl Future<Output = Result<u64>> + Send + '_;
}
