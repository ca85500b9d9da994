//! Assignment rows and the derived per-day read model.
//!
//! An [`Assignment`] is the atomic durable fact `(day, name)`. A [`DayView`]
//! is assembled on read and never stored; its canonical string is both the
//! display value and the optimistic-concurrency comparison token.

use serde::Serialize;

use crate::day::Day;

/// Display sentinel and comparison token for a day with no assignments.
pub const NO_ASSIGNMENTS: &str = "no assignments";

/// One durable calendar fact: `name` is on duty on `day`.
///
/// At most one row exists per `(day, name)`; the storage backend enforces
/// this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
  pub day:  Day,
  pub name: String,
}

/// The derived read model for a single day.
///
/// `names` is lexicographically sorted; backends return names in that order
/// and the aggregator preserves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
  pub day:   Day,
  pub names: Vec<String>,
}

impl DayView {
  /// The canonical string for this day: sorted names joined with `", "`, or
  /// [`NO_ASSIGNMENTS`] when empty.
  pub fn canonical(&self) -> String { canonical_string(&self.names) }
}

/// Join an already-sorted name list into the canonical comparison string.
pub fn canonical_string(names: &[String]) -> String {
  if names.is_empty() {
    NO_ASSIGNMENTS.to_string()
  } else {
    names.join(", ")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_day_uses_sentinel() {
    assert_eq!(canonical_string(&[]), "no assignments");
  }

  #[test]
  fn single_name_is_bare() {
    assert_eq!(canonical_string(&["Smith".to_string()]), "Smith");
  }

  #[test]
  fn names_join_with_comma_space() {
    let names = vec!["Jones".to_string(), "Smith".to_string()];
    assert_eq!(canonical_string(&names), "Jones, Smith");
  }
}
