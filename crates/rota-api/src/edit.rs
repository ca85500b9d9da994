//! Handler for `POST /edit` — the single guarded write entry point.

use axum::{Json, extract::State};
use rota_core::{Day, EditOp, store::RosterStore};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, extract::ApiJson};

#[derive(Debug, Deserialize)]
pub struct EditBody {
  /// Day-count ordinal of the day being edited.
  pub day:      i64,
  /// The canonical string the client last rendered for this day.
  pub expected: String,
  #[serde(flatten)]
  pub op:       EditOp,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
  /// Post-mutation canonical string; resynchronises the client's cache.
  pub current: String,
}

/// `POST /edit` — body:
/// `{"day":738521,"expected":"no assignments","op":"append","name":"Smith"}`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  ApiJson(body): ApiJson<EditBody>,
) -> Result<Json<EditResponse>, ApiError>
where
  S: RosterStore + 'static,
{
  let day = Day::from_ordinal(body.day)?;

  let current = state.guard.apply(day, &body.expected, body.op).await?;

  tracing::debug!(%day, %current, "edit applied");
  Ok(Json(EditResponse { current }))
}
