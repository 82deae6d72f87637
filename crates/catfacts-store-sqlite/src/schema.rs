//! SQL schema for the catfacts SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Facts are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS facts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    fact        TEXT    NOT NULL UNIQUE,         -- trimmed, 5..=500 chars
    created_at  TEXT    NOT NULL DEFAULT (date('now'))  -- YYYY-MM-DD, UTC
);

PRAGMA user_version = 1;
";
