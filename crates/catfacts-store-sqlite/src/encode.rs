//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as ISO 8601 calendar dates (`YYYY-MM-DD`).

use catfacts_core::fact::{Fact, FactId, FactText};
use chrono::NaiveDate;

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// Column values of one `facts` row, before validation.
pub struct RawFact {
  pub id:         i64,
  pub fact:       String,
  pub created_at: String,
}

impl RawFact {
  pub const COLUMNS: &'static str = "id, fact, created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { id: row.get(0)?, fact: row.get(1)?, created_at: row.get(2)? })
  }

  pub fn into_fact(self) -> Result<Fact> {
    let text = FactText::parse(&self.fact)
      .map_err(|e| Error::CorruptRow { id: self.id, reason: e.to_string() })?;
    Ok(Fact { id: FactId(self.id), text, created_at: decode_date(&self.created_at)? })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn date_roundtrip() {
    let d = NaiveDate::from_ymd_opt(2025, 2, 9).unwrap();
    assert_eq!(encode_date(d), "2025-02-09");
    assert_eq!(decode_date("2025-02-09").unwrap(), d);
  }

  #[test]
  fn decode_date_rejects_timestamps() {
    assert!(matches!(decode_date("2025-02-09T10:00:00Z"), Err(Error::DateParse(_))));
  }

  #[test]
  fn invalid_stored_text_is_reported_as_corrupt() {
    let raw = RawFact { id: 3, fact: "meow".into(), created_at: "2025-02-09".into() };
    assert!(matches!(raw.into_fact(), Err(Error::CorruptRow { id: 3, .. })));
  }
}
