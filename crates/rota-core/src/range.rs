//! Read-side range aggregation: one [`DayView`] per day for the calendar
//! grid, or a sparse per-name view.
//!
//! Unfiltered mode materialises every day of the requested range, including
//! days with no assignments, so the grid renders a full year. Filtered mode
//! answers "when is this person scheduled" and returns only matching days.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
  assignment::DayView,
  day::Day,
  error::{Error, Result},
  store::RosterStore,
};

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Optional name filter for a range query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFilter {
  All,
  Name(String),
}

impl NameFilter {
  /// Parse a client-supplied filter value.
  ///
  /// `None`, the empty string, `"*"`, and `"all"` all mean unfiltered.
  pub fn parse(raw: Option<&str>) -> Self {
    match raw {
      None | Some("" | "*" | "all") => NameFilter::All,
      Some(name) => NameFilter::Name(name.to_string()),
    }
  }
}

// ─── Year window ─────────────────────────────────────────────────────────────

/// The inclusive day range for `year`'s calendar view: Jan 1 through
/// Jan 1 + 365 days.
///
/// Always 366 days, leap year or not; in a non-leap year the window spills
/// into the next year's Jan 1. This mirrors the range the form has always
/// requested and is kept as a contract.
pub fn year_range(year: i32) -> Result<(Day, Day)> {
  let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
    .ok_or(Error::InvalidYear(year))?;
  let start = Day::from_date(jan1);
  let end = start.offset(365)?;
  Ok((start, end))
}

// ─── Aggregation ─────────────────────────────────────────────────────────────

/// Build the day-by-day view for `start ..= end`.
///
/// Ascending by day in both modes. With [`NameFilter::All`] every day of the
/// range is present, empty days included; with [`NameFilter::Name`] only
/// days carrying a matching assignment appear.
pub async fn range_view<S: RosterStore>(
  store: &S,
  start: Day,
  end: Day,
  filter: &NameFilter,
) -> Result<Vec<DayView>> {
  match filter {
    NameFilter::All => {
      let rows = store
        .scan_range(start, end)
        .await
        .map_err(Error::store)?;

      let mut by_day: BTreeMap<Day, Vec<String>> = BTreeMap::new();
      for row in rows {
        by_day.entry(row.day).or_default().push(row.name);
      }

      Ok(
        Day::range_inclusive(start, end)
          .map(|day| DayView {
            day,
            names: by_day.remove(&day).unwrap_or_default(),
          })
          .collect(),
      )
    }

    NameFilter::Name(name) => {
      let rows = store
        .scan_range_name(start, end, name.clone())
        .await
        .map_err(Error::store)?;

      let mut by_day: BTreeMap<Day, Vec<String>> = BTreeMap::new();
      for row in rows {
        by_day.entry(row.day).or_default().push(row.name);
      }

      Ok(
        by_day
          .into_iter()
          .map(|(day, names)| DayView { day, names })
          .collect(),
      )
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wildcard_spellings_mean_all() {
    assert_eq!(NameFilter::parse(None), NameFilter::All);
    assert_eq!(NameFilter::parse(Some("")), NameFilter::All);
    assert_eq!(NameFilter::parse(Some("*")), NameFilter::All);
    assert_eq!(NameFilter::parse(Some("all")), NameFilter::All);
  }

  #[test]
  fn name_filter_passes_through() {
    assert_eq!(
      NameFilter::parse(Some("Smith")),
      NameFilter::Name("Smith".to_string())
    );
  }

  #[test]
  fn year_window_is_366_days_even_off_leap() {
    // 2023 is not a leap year; the window still spans 366 days and ends on
    // 2024-01-01.
    let (start, end) = year_range(2023).unwrap();
    assert_eq!(
      start.date(),
      NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
    );
    assert_eq!(end.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(Day::range_inclusive(start, end).count(), 366);
  }

  #[test]
  fn leap_year_window_ends_on_dec_31() {
    let (start, end) = year_range(2024).unwrap();
    assert_eq!(end.date(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    assert_eq!(Day::range_inclusive(start, end).count(), 366);
  }
}
