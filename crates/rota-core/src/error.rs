//! Error types for `rota-core`.
//!
//! Three families, matching how callers must react:
//! - invalid input (`InvalidDay`, `InvalidYear`, `EmptyName`) — reject, never
//!   retried, nothing was mutated;
//! - `Stale` — the caller's view of a day no longer matches the committed
//!   state; carries the authoritative current value so the caller can
//!   re-render and resubmit;
//! - `Store` — the backend failed; fatal for the current call.

use thiserror::Error;

use crate::day::Day;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid day ordinal: {0}")]
  InvalidDay(i64),

  #[error("invalid year: {0}")]
  InvalidYear(i32),

  #[error("assignment name must not be empty")]
  EmptyName,

  /// The caller's expected state for `day` did not match the committed
  /// state. No mutation was performed; `current` is authoritative.
  #[error("stale view of day {day}: current state is {current:?}")]
  Stale { day: Day, current: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a backend error into the core taxonomy.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
