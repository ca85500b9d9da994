//! Request extractors that report failures through [`ApiError`].

use axum::{
  Json,
  extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body extractor whose rejection is an [`ApiError`].
///
/// axum's stock [`Json`] rejects an undeserialisable body (malformed JSON,
/// unknown `op` value, missing field) with a plain-text 422. The API
/// contract treats all of those as invalid input: 400 with a JSON error
/// body, like every other handler failure.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
  S: Send + Sync,
  T: DeserializeOwned,
{
  type Rejection = ApiError;

  async fn from_request(
    req: Request,
    state: &S,
  ) -> Result<Self, Self::Rejection> {
    match Json::<T>::from_request(req, state).await {
      Ok(Json(value)) => Ok(ApiJson(value)),
      Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
    }
  }
}
