//! [`SqliteStore`] — the SQLite implementation of [`RosterStore`].

use std::path::Path;

use rota_core::{Assignment, Day, store::RosterStore};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A rota assignment store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All
/// statements run serially on the connection's worker thread, so a single
/// statement (or transaction) is always atomic from a reader's perspective.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
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
}

/// Whether `err` is SQLite reporting a violated uniqueness constraint.
fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  type Error = Error;

  // ── Assignments — point mutation ──────────────────────────────────────────

  async fn insert(&self, day: Day, name: String) -> Result<()> {
    let ord = day.ordinal();
    let name_param = name.clone();

    let outcome = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO assignments (day, name) VALUES (?1, ?2)",
          rusqlite::params![ord, name_param],
        )?;
        Ok(())
      })
      .await;

    match outcome {
      Err(e) if is_unique_violation(&e) => {
        Err(Error::DuplicateAssignment { day, name })
      }
      other => Ok(other?),
    }
  }

  async fn delete_day(&self, day: Day) -> Result<()> {
    let ord = day.ordinal();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM assignments WHERE day = ?1",
          rusqlite::params![ord],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_day_name(&self, day: Day, name: String) -> Result<()> {
    let ord = day.ordinal();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM assignments WHERE day = ?1 AND name = ?2",
          rusqlite::params![ord, name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn replace_day(&self, day: Day, name: String) -> Result<()> {
    let ord = day.ordinal();
    // One transaction: no reader observes the day empty between the delete
    // and the insert.
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM assignments WHERE day = ?1",
          rusqlite::params![ord],
        )?;
        tx.execute(
          "INSERT INTO assignments (day, name) VALUES (?1, ?2)",
          rusqlite::params![ord, name],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn names_for_day(&self, day: Day) -> Result<Vec<String>> {
    let ord = day.ordinal();
    let names = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT name FROM assignments WHERE day = ?1 ORDER BY name",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![ord], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(names)
  }

  async fn scan_range(&self, start: Day, end: Day) -> Result<Vec<Assignment>> {
    let (lo, hi) = (start.ordinal(), end.ordinal());
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT day, name FROM assignments
           WHERE day >= ?1 AND day <= ?2
           ORDER BY day, name",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![lo, hi], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows_into_assignments(rows)
  }

  async fn scan_range_name(
    &self,
    start: Day,
    end: Day,
    name: String,
  ) -> Result<Vec<Assignment>> {
    let (lo, hi) = (start.ordinal(), end.ordinal());
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT day, name FROM assignments
           WHERE day >= ?1 AND day <= ?2 AND name = ?3
           ORDER BY day, name",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![lo, hi, name], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows_into_assignments(rows)
  }

  // ── Roster ────────────────────────────────────────────────────────────────

  async fn list_roster(&self) -> Result<Vec<String>> {
    let names = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT name FROM roster ORDER BY name")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(names)
  }

  async fn add_roster_name(&self, name: String) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO roster (name) VALUES (?1)",
          rusqlite::params![name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Convert raw `(ordinal, name)` rows into [`Assignment`]s.
///
/// An unparseable ordinal can only mean the file was written by something
/// else; surface it as a database-level error rather than panicking.
fn rows_into_assignments(rows: Vec<(i64, String)>) -> Result<Vec<Assignment>> {
  rows
    .into_iter()
    .map(|(ord, name)| {
      let day = Day::from_ordinal(ord).map_err(|e| {
        tokio_rusqlite::Error::Other(Box::new(e))
      })?;
      Ok(Assignment { day, name })
    })
    .collect()
}
