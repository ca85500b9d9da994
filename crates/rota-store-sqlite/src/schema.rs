//! SQL schema for the rota SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per (day, name); the composite primary key enforces the
-- uniqueness invariant in the engine.
CREATE TABLE IF NOT EXISTS assignments (
    day  INTEGER NOT NULL,   -- proleptic-Gregorian ordinal, day 1 = 0001-01-01
    name TEXT    NOT NULL,
    PRIMARY KEY (day, name)
);

-- Advisory list of known assignee names; independent of assignments.
CREATE TABLE IF NOT EXISTS roster (
    name TEXT PRIMARY KEY
);

PRAGMA user_version = 1;
";
