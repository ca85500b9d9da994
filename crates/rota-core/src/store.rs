//! The `RosterStore` trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g. `rota-store-sqlite`).
//! Higher layers (`rota-api`, the concurrency guard) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{assignment::Assignment, day::Day};

/// Abstraction over a durable assignment store.
///
/// Keys are `(day, name)` pairs; the backend enforces their uniqueness.
/// Every mutating method must be atomic with respect to concurrent readers:
/// a reader observes a day either fully before or fully after a mutation,
/// never mid-write.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RosterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Assignments — point mutation ──────────────────────────────────────

  /// Create the `(day, name)` row. Errors if the pair already exists.
  fn insert(
    &self,
    day: Day,
    name: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove every assignment on `day`. No-op if there are none.
  fn delete_day(
    &self,
    day: Day,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove the single `(day, name)` row. No-op if absent.
  fn delete_day_name(
    &self,
    day: Day,
    name: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Replace all assignments on `day` with the single `name`, as one atomic
  /// unit. A concurrent reader never observes the day empty between the
  /// delete and the insert.
  fn replace_day(
    &self,
    day: Day,
    name: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// All names assigned on `day`, sorted lexicographically. Empty if none.
  fn names_for_day(
    &self,
    day: Day,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// All assignments with `start <= day <= end`, ascending by day, names
  /// sorted within a day.
  fn scan_range(
    &self,
    start: Day,
    end: Day,
  ) -> impl Future<Output = Result<Vec<Assignment>, Self::Error>> + Send + '_;

  /// Like [`scan_range`](Self::scan_range), restricted to one name. The
  /// filter runs in the backend so a sparse query does not materialise a
  /// whole year of rows.
  fn scan_range_name(
    &self,
    start: Day,
    end: Day,
    name: String,
  ) -> impl Future<Output = Result<Vec<Assignment>, Self::Error>> + Send + '_;

  // ── Roster ────────────────────────────────────────────────────────────

  /// All known roster names, sorted lexicographically.
  ///
  /// The roster is advisory: assignments may reference names that were
  /// never added to it.
  fn list_roster(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Add a name to the roster. Idempotent.
  fn add_roster_name(
    &self,
    name: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
