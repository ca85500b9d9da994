//! Error type for `rota-store-sqlite`.

use thiserror::Error;

use rota_core::Day;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// An `insert` hit an existing `(day, name)` row.
  #[error("assignment already exists: day {day}, name {name:?}")]
  DuplicateAssignment { day: Day, name: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
