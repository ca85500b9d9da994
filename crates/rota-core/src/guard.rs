//! Optimistic concurrency control for per-day edits.
//!
//! Clients render a day from a snapshot and later submit an edit together
//! with the canonical string they last saw. [`ConcurrencyGuard::apply`]
//! re-reads the committed state, rejects the edit if the snapshot is stale
//! (reporting the authoritative value back), and otherwise applies the
//! mutation and returns the fresh canonical string so the client's cache is
//! resynchronised even on success.
//!
//! The compare-apply-reread sequence is check-then-act, so it is serialized
//! per day with an async lock; edits to different days proceed concurrently.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex as StdMutex},
};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex as AsyncMutex;

use crate::{
  assignment::canonical_string,
  day::Day,
  error::{Error, Result},
  store::RosterStore,
};

// ─── Edit operations ─────────────────────────────────────────────────────────

/// A single client-submitted edit against one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum EditOp {
  /// Add `name` to the day. Idempotent: appending a name that is already
  /// present succeeds without touching the store.
  Append { name: String },
  /// Replace everything on the day with the single `name`.
  Replace { name: String },
  /// Remove one name, or every assignment on the day when `name` is absent.
  Delete {
    #[serde(default)]
    name: Option<String>,
  },
}

impl EditOp {
  fn validate(&self) -> Result<()> {
    match self {
      EditOp::Append { name } | EditOp::Replace { name }
        if name.is_empty() =>
      {
        Err(Error::EmptyName)
      }
      EditOp::Delete { name: Some(name) } if name.is_empty() => {
        Err(Error::EmptyName)
      }
      _ => Ok(()),
    }
  }
}

// ─── Guard ───────────────────────────────────────────────────────────────────

/// Serialises edits per day and detects stale client snapshots.
pub struct ConcurrencyGuard<S> {
  store:     Arc<S>,
  day_locks: StdMutex<HashMap<Day, Arc<AsyncMutex<()>>>>,
}

impl<S: RosterStore> ConcurrencyGuard<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      day_locks: StdMutex::new(HashMap::new()),
    }
  }

  /// The underlying store, for read paths that need no guard.
  pub fn store(&self) -> &Arc<S> { &self.store }

  /// Lock handle for `day`. Entries are never evicted; the table is bounded
  /// by the number of distinct days edited over the process lifetime.
  fn lock_for(&self, day: Day) -> Arc<AsyncMutex<()>> {
    let mut locks = self
      .day_locks
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner());
    locks.entry(day).or_default().clone()
  }

  /// Apply `op` to `day`, provided `expected_current` still matches the
  /// committed canonical string.
  ///
  /// On success returns the post-mutation canonical string. On a stale
  /// snapshot returns [`Error::Stale`] carrying the authoritative current
  /// value; nothing is mutated and no automatic retry happens — resolving
  /// the conflict is the caller's decision.
  pub async fn apply(
    &self,
    day: Day,
    expected_current: &str,
    op: EditOp,
  ) -> Result<String> {
    op.validate()?;

    let lock = self.lock_for(day);
    let _serialized = lock.lock().await;

    let names = self
      .store
      .names_for_day(day)
      .await
      .map_err(Error::store)?;
    let current = canonical_string(&names);

    if current != expected_current {
      return Err(Error::Stale { day, current });
    }

    match op {
      EditOp::Append { name } => {
        // Already-present append is a success, not a conflict: the
        // canonical state the client expects already includes the name.
        if !names.contains(&name) {
          self.store.insert(day, name).await.map_err(Error::store)?;
        }
      }
      EditOp::Replace { name } => {
        self
          .store
          .replace_day(day, name)
          .await
          .map_err(Error::store)?;
      }
      EditOp::Delete { name: Some(name) } => {
        self
          .store
          .delete_day_name(day, name)
          .await
          .map_err(Error::store)?;
      }
      EditOp::Delete { name: None } => {
        self.store.delete_day(day).await.map_err(Error::store)?;
      }
    }

    let after = self
      .store
      .names_for_day(day)
      .await
      .map_err(Error::store)?;
    Ok(canonical_string(&after))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn append_wire_form() {
    let op: EditOp =
      serde_json::from_str(r#"{"op":"append","name":"Smith"}"#).unwrap();
    assert_eq!(op, EditOp::Append { name: "Smith".to_string() });
  }

  #[test]
  fn delete_without_name_means_whole_day() {
    let op: EditOp = serde_json::from_str(r#"{"op":"delete"}"#).unwrap();
    assert_eq!(op, EditOp::Delete { name: None });
  }

  #[test]
  fn unknown_op_is_rejected() {
    assert!(
      serde_json::from_str::<EditOp>(r#"{"op":"merge","name":"x"}"#).is_err()
    );
  }

  #[test]
  fn empty_name_fails_validation() {
    assert!(matches!(
      EditOp::Append { name: String::new() }.validate(),
      Err(Error::EmptyName)
    ));
    assert!(matches!(
      EditOp::Delete { name: Some(String::new()) }.validate(),
      Err(Error::EmptyName)
    ));
    assert!(EditOp::Delete { name: None }.validate().is_ok());
  }
}
