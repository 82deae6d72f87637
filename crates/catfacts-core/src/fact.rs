//! Fact types — the single record kind held by the store.
//!
//! A fact is a short piece of text. It is created once by a validated insert
//! and never updated or deleted afterwards.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Shortest accepted fact, in characters, after trimming.
pub const MIN_FACT_LEN: usize = 5;
/// Longest accepted fact, in characters, after trimming.
pub const MAX_FACT_LEN: usize = 500;

// ─── FactId ──────────────────────────────────────────────────────────────────

/// Store-assigned identifier. Monotonically increasing in insertion order.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FactId(pub i64);

impl fmt::Display for FactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(&self.0, f) }
}

// ─── FactText ────────────────────────────────────────────────────────────────

/// Normalised fact content: trimmed and within
/// [`MIN_FACT_LEN`]`..=`[`MAX_FACT_LEN`] characters.
///
/// The only way to build one from arbitrary input is [`FactText::parse`], so
/// a `FactText` in hand is always safe to persist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FactText(String);

impl FactText {
  /// Trim `raw` and check its length. Length counts Unicode scalar values,
  /// not bytes.
  pub fn parse(raw: &str) -> Result<Self, ValidationError> {
    let trimmed = raw.trim();
    let length = trimmed.chars().count();
    if !(MIN_FACT_LEN..=MAX_FACT_LEN).contains(&length) {
      return Err(ValidationError { length });
    }
    Ok(Self(trimmed.to_owned()))
  }

  pub fn as_str(&self) -> &str { &self.0 }

  pub fn into_inner(self) -> String { self.0 }
}

impl<'de> Deserialize<'de> for FactText {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    let raw = String::deserialize(deserializer)?;
    Self::parse(&raw).map_err(serde::de::Error::custom)
  }
}

impl AsRef<str> for FactText {
  fn as_ref(&self) -> &str { &self.0 }
}

impl fmt::Display for FactText {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

// ─── Fact ────────────────────────────────────────────────────────────────────

/// A persisted fact. Callers always receive owned snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
  pub id:         FactId,
  #[serde(rename = "fact")]
  pub text:       FactText,
  /// Date of insertion (UTC); never changes after creation.
  pub created_at: NaiveDate,
}
