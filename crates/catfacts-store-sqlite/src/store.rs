//! [`SqliteStore`] — the SQLite implementation of [`FactStore`].

use std::path::Path;

use catfacts_core::{
  fact::{Fact, FactId, FactText},
  store::FactStore,
};
use chrono::Utc;
use rusqlite::{ErrorCode, OptionalExtension as _};

use crate::{
  Result,
  encode::{RawFact, encode_date},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A fact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All clones
/// share one background connection, so statements are serialised.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened fact store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert `text` inside its own transaction.
  ///
  /// Returns `None` when the `UNIQUE` constraint rejects the row; the
  /// transaction is rolled back and nothing is written.
  async fn insert_unique(&self, text: &FactText) -> Result<Option<i64>> {
    let fact = text.as_str().to_owned();
    let created_at = encode_date(Utc::now().date_naive());

    let id = self
      .conn
      .call(move |conn| {
        // Dropping `tx` on any early return rolls it back.
        let tx = conn.transaction()?;
        match tx.execute(
          "INSERT INTO facts (fact, created_at) VALUES (?1, ?2)",
          rusqlite::params![fact, created_at],
        ) {
          Ok(_) => {}
          Err(e) if is_unique_violation(&e) => {
            tx.rollback()?;
            return Ok(None);
          }
          Err(e) => return Err(e.into()),
        }
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(Some(id))
      })
      .await?;

    Ok(id)
  }

  async fn all_facts(&self) -> Result<Vec<Fact>> {
    let raws: Vec<RawFact> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {} FROM facts ORDER BY id ASC", RawFact::COLUMNS))?;
        let rows = stmt
          .query_map([], RawFact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFact::into_fact).collect()
  }

  async fn random_fact(&self) -> Result<Option<Fact>> {
    let raw: Option<RawFact> = self
      .conn
      .call(|conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {} FROM facts ORDER BY RANDOM() LIMIT 1", RawFact::COLUMNS),
            [],
            RawFact::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawFact::into_fact).transpose()
  }

  async fn row_count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM facts", [], |r| r.get(0))?))
      .await?;
    // COUNT(*) is never negative.
    Ok(n.unsigned_abs())
  }
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(err, _)
      if err.code == ErrorCode::ConstraintViolation
        && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── FactStore impl ──────────────────────────────────────────────────────────

impl FactStore for SqliteStore {
  async fn insert(&self, text: &str) -> catfacts_core::Result<FactId> {
    let text = FactText::parse(text)?;
    match self.insert_unique(&text).await? {
      Some(id) => Ok(FactId(id)),
      None => Err(catfacts_core::Error::Duplicate(text.into_inner())),
    }
  }

  async fn list(&self) -> catfacts_core::Result<Vec<Fact>> { Ok(self.all_facts().await?) }

  async fn random(&self) -> catfacts_core::Result<Fact> {
    self.random_fact().await?.ok_or(catfacts_core::Error::NotFound)
  }

  async fn count(&self) -> catfacts_core::Result<u64> { Ok(self.row_count().await?) }
}
