//! SQL schema for the roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` pragma.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `country_id` is not a foreign key: orphaned references are
/// tolerated and surface as a missing display name at read time. The `tin`
/// column is filled by the store on insert when the caller supplies none.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS persons (
    person_id           TEXT PRIMARY KEY,
    name                TEXT,
    email               TEXT,
    birth_date          TEXT,            -- ISO 8601 calendar date
    gender              TEXT,
    country_id          TEXT NOT NULL,
    address             TEXT,
    receives_newsletter INTEGER NOT NULL DEFAULT 0,
    tin                 TEXT NOT NULL UNIQUE,
    created_at          TEXT NOT NULL    -- ISO 8601 UTC
);

CREATE TABLE IF NOT EXISTS countries (
    country_id TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS persons_name_idx   ON persons(name);
CREATE INDEX IF NOT EXISTS countries_name_idx ON countries(name);

PRAGMA user_version = 1;
";
