//! Handlers for `/roster` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/roster` | Sorted names; feeds the filter selector |
//! | `POST` | `/roster` | Body: `{"name":"Smith"}`; idempotent |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rota_core::store::RosterStore;
use serde::Deserialize;

use crate::{AppState, error::ApiError, extract::ApiJson};

/// `GET /roster`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<String>>, ApiError>
where
  S: RosterStore + 'static,
{
  let names = state
    .store
    .list_roster()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(names))
}

#[derive(Debug, Deserialize)]
pub struct AddBody {
  pub name: String,
}

/// `POST /roster` — body: `{"name":"Smith"}`
pub async fn add<S>(
  State(state): State<AppState<S>>,
  ApiJson(body): ApiJson<AddBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore + 'static,
{
  if body.name.is_empty() {
    return Err(ApiError::BadRequest(
      "roster name must not be empty".to_string(),
    ));
  }
  state
    .store
    .add_roster_name(body.name)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::CREATED)
}
