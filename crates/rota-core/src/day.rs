//! `Day` — the calendar-date key of the store.
//!
//! Days are stored and compared as proleptic-Gregorian ordinals (day 1 =
//! 0001-01-01), so keys are numeric, sortable, and locale-independent.
//! chrono's `num_days_from_ce` uses the same epoch, which keeps the ordinal
//! stable across the storage and display layers.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{Error, Result};

/// A calendar day, keyed by its proleptic-Gregorian ordinal.
///
/// Construction always validates: an ordinal that does not name a real
/// calendar date is rejected as [`Error::InvalidDay`] and never becomes a
/// `Day`. Deliberately not `Deserialize` — wire input arrives as a raw
/// ordinal and must pass through [`Day::from_ordinal`].
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
)]
#[serde(transparent)]
pub struct Day(i32);

impl Day {
  /// Build a `Day` from a raw day-count ordinal.
  pub fn from_ordinal(ordinal: i64) -> Result<Self> {
    let narrow =
      i32::try_from(ordinal).map_err(|_| Error::InvalidDay(ordinal))?;
    if narrow < 1 || NaiveDate::from_num_days_from_ce_opt(narrow).is_none() {
      return Err(Error::InvalidDay(ordinal));
    }
    Ok(Day(narrow))
  }

  /// Build a `Day` from a calendar date. Infallible: every `NaiveDate` has
  /// an ordinal.
  pub fn from_date(date: NaiveDate) -> Self { Day(date.num_days_from_ce()) }

  /// The raw ordinal, as stored in the database.
  pub fn ordinal(self) -> i32 { self.0 }

  /// The calendar date this day names.
  pub fn date(self) -> NaiveDate {
    let date = NaiveDate::from_num_days_from_ce_opt(self.0);
    // `from_ordinal` admits exactly the ordinals this conversion accepts,
    // so the fallback is unreachable.
    debug_assert!(date.is_some(), "Day holds invalid ordinal {}", self.0);
    date.unwrap_or(NaiveDate::MIN)
  }

  /// The day `offset` days after this one.
  pub fn offset(self, offset: i32) -> Result<Self> {
    Self::from_ordinal(i64::from(self.0) + i64::from(offset))
  }

  /// Iterate every day in `start ..= end`, ascending. Empty if reversed.
  pub fn range_inclusive(
    start: Day,
    end: Day,
  ) -> impl Iterator<Item = Day> {
    (start.0..=end.0).map(Day)
  }
}

impl std::fmt::Display for Day {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ordinal_matches_python_toordinal() {
    // Python: date(2023, 1, 1).toordinal() == 738521
    let day = Day::from_ordinal(738521).unwrap();
    assert_eq!(day.date(), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    assert_eq!(Day::from_date(day.date()), day);
  }

  #[test]
  fn zero_and_negative_ordinals_rejected() {
    assert!(matches!(Day::from_ordinal(0), Err(Error::InvalidDay(0))));
    assert!(matches!(Day::from_ordinal(-7), Err(Error::InvalidDay(-7))));
  }

  #[test]
  fn out_of_range_ordinal_rejected() {
    assert!(Day::from_ordinal(i64::MAX).is_err());
  }

  #[test]
  fn range_inclusive_yields_every_day() {
    let start = Day::from_ordinal(10).unwrap();
    let end = Day::from_ordinal(13).unwrap();
    let days: Vec<_> = Day::range_inclusive(start, end).collect();
    assert_eq!(days.len(), 4);
    assert_eq!(days[0], start);
    assert_eq!(days[3], end);
  }

  #[test]
  fn reversed_range_is_empty() {
    let start = Day::from_ordinal(13).unwrap();
    let end = Day::from_ordinal(10).unwrap();
    assert_eq!(Day::range_inclusive(start, end).count(), 0);
  }
}
