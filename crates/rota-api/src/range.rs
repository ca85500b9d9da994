//! Handler for `GET /range` — the calendar-grid data source.

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{Datelike, NaiveDate, Utc};
use rota_core::{
  DayView,
  range::{NameFilter, range_view, year_range},
  store::RosterStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct RangeParams {
  /// Defaults to the current year, as the original form did.
  pub year:        Option<i32>,
  /// `all`, `*`, empty, or absent mean unfiltered.
  pub filter_name: Option<String>,
}

/// One row of the calendar grid.
#[derive(Debug, Serialize)]
pub struct RangeEntry {
  /// Day-count ordinal — the stable key the edit form posts back.
  pub day:     i32,
  pub date:    NaiveDate,
  pub names:   Vec<String>,
  /// Canonical display string; also the `expected` token for `/edit`.
  pub display: String,
}

impl From<DayView> for RangeEntry {
  fn from(view: DayView) -> Self {
    let display = view.canonical();
    RangeEntry {
      day: view.day.ordinal(),
      date: view.day.date(),
      names: view.names,
      display,
    }
  }
}

/// `GET /range?year=<year>&filter_name=<name|all>`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<RangeParams>,
) -> Result<Json<Vec<RangeEntry>>, ApiError>
where
  S: RosterStore + 'static,
{
  let year = params
    .year
    .unwrap_or_else(|| Utc::now().date_naive().year());
  let filter = NameFilter::parse(params.filter_name.as_deref());

  let (start, end) = year_range(year)?;
  let views = range_view(state.store.as_ref(), start, end, &filter).await?;

  Ok(Json(views.into_iter().map(RangeEntry::from).collect()))
}
