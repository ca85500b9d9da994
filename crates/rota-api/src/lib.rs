//! JSON HTTP boundary for the rota duty calendar.
//!
//! Exposes an axum [`Router`] backed by any [`rota_core::store::RosterStore`].
//! Templating and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", rota_api::router(state.clone()))
//! ```

pub mod edit;
pub mod error;
pub mod extract;
pub mod range;
pub mod roster;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use rota_core::{ConcurrencyGuard, store::RosterStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
///
/// The guard owns a second handle to the same store; read paths go straight
/// to `store`, writes go through `guard`.
pub struct AppState<S: RosterStore> {
  pub store: Arc<S>,
  pub guard: Arc<ConcurrencyGuard<S>>,
}

impl<S: RosterStore> AppState<S> {
  pub fn new(store: Arc<S>) -> Self {
    let guard = Arc::new(ConcurrencyGuard::new(store.clone()));
    Self { store, guard }
  }
}

impl<S: RosterStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), guard: self.guard.clone() }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn router<S>(state: AppState<S>) -> Router<()>
where
  S: RosterStore + 'static,
{
  Router::new()
    .route("/roster", get(roster::list::<S>).post(roster::add::<S>))
    .route("/range", get(range::handler::<S>))
    .route("/edit", post(edit::handler::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use rota_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState::new(Arc::new(store))
  }

  async fn oneshot_json(
    state: AppState<SqliteStore>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let req = builder.body(body).unwrap();
    let resp = router(state).oneshot(req).await.unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  // ── Roster ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn roster_round_trip_sorted() {
    let state = make_state().await;

    let (status, _) = oneshot_json(
      state.clone(),
      "POST",
      "/roster",
      Some(json!({"name": "Smith"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    oneshot_json(
      state.clone(),
      "POST",
      "/roster",
      Some(json!({"name": "Adams"})),
    )
    .await;

    let (status, body) =
      oneshot_json(state, "GET", "/roster", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Adams", "Smith"]));
  }

  #[tokio::test]
  async fn empty_roster_name_is_rejected() {
    let state = make_state().await;
    let (status, _) =
      oneshot_json(state, "POST", "/roster", Some(json!({"name": ""})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Edit ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn edit_conflict_reports_authoritative_value() {
    let state = make_state().await;

    let (status, body) = oneshot_json(
      state.clone(),
      "POST",
      "/edit",
      Some(json!({
        "day": 738521,
        "expected": "no assignments",
        "op": "append",
        "name": "Smith"
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current"], "Smith");

    let (status, body) = oneshot_json(
      state.clone(),
      "POST",
      "/edit",
      Some(json!({
        "day": 738521,
        "expected": "Smith",
        "op": "append",
        "name": "Jones"
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current"], "Jones, Smith");

    // Stale snapshot: 409 with the value the client must re-render.
    let (status, body) = oneshot_json(
      state,
      "POST",
      "/edit",
      Some(json!({
        "day": 738521,
        "expected": "Smith",
        "op": "delete",
        "name": "Jones"
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["current"], "Jones, Smith");
  }

  #[tokio::test]
  async fn unknown_op_returns_400_with_json_body() {
    let state = make_state().await;
    let (status, body) = oneshot_json(
      state,
      "POST",
      "/edit",
      Some(json!({
        "day": 738521,
        "expected": "no assignments",
        "op": "merge",
        "name": "Smith"
      })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "expected JSON error body: {body}");
  }

  #[tokio::test]
  async fn malformed_day_returns_400() {
    let state = make_state().await;
    let (status, _) = oneshot_json(
      state,
      "POST",
      "/edit",
      Some(json!({
        "day": -5,
        "expected": "no assignments",
        "op": "append",
        "name": "Smith"
      })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Range ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unfiltered_range_has_366_entries() {
    let state = make_state().await;

    oneshot_json(
      state.clone(),
      "POST",
      "/edit",
      Some(json!({
        "day": 738521,
        "expected": "no assignments",
        "op": "append",
        "name": "Smith"
      })),
    )
    .await;

    let (status, body) = oneshot_json(
      state,
      "GET",
      "/range?year=2023&filter_name=all",
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 366);
    assert_eq!(entries[0]["day"], 738521);
    assert_eq!(entries[0]["date"], "2023-01-01");
    assert_eq!(entries[0]["display"], "Smith");
    assert_eq!(entries[1]["display"], "no assignments");
  }

  #[tokio::test]
  async fn filtered_range_is_sparse() {
    let state = make_state().await;

    for (day, name) in [(738521, "Smith"), (738530, "Jones")] {
      oneshot_json(
        state.clone(),
        "POST",
        "/edit",
        Some(json!({
          "day": day,
          "expected": "no assignments",
          "op": "append",
          "name": name
        })),
      )
      .await;
    }

    let (status, body) = oneshot_json(
      state,
      "GET",
      "/range?year=2023&filter_name=Smith",
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["day"], 738521);
    assert_eq!(entries[0]["names"], json!(["Smith"]));
  }
}
