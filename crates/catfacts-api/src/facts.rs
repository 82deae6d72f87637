//! Handlers for `/facts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/facts` | All facts, ascending id |
//! | `GET`  | `/facts/random` | One fact; 404 when the store is empty |
//! | `POST` | `/facts` | Form field `fact`; 201, 400 on bad length or a malformed form, 409 on duplicate |

use std::sync::Arc;

use axum::{
  Form, Json,
  extract::{State, rejection::FormRejection},
  http::StatusCode,
  response::IntoResponse,
};
use catfacts_core::{
  fact::{Fact, FactId},
  store::FactStore,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /facts`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Fact>>, ApiError>
where
  S: FactStore,
{
  Ok(Json(store.list().await?))
}

// ─── Random ───────────────────────────────────────────────────────────────────

/// `GET /facts/random`
pub async fn random<S>(State(store): State<Arc<S>>) -> Result<Json<Fact>, ApiError>
where
  S: FactStore,
{
  Ok(Json(store.random().await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// Form body accepted by `POST /facts`.
#[derive(Debug, Deserialize)]
pub struct CreateForm {
  /// Fact text, 5–500 characters after trimming.
  pub fact: String,
}

#[derive(Debug, Serialize)]
pub struct Created {
  pub message: &'static str,
  pub id:      FactId,
}

/// `POST /facts` — returns 201 + the new id.
///
/// A body without a `fact` field, or one that is not form-encoded, is a 400
/// with the usual JSON error body rather than axum's plain-text rejection.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  form: Result<Form<CreateForm>, FormRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FactStore,
{
  let Form(form) = form.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
  let id = store.insert(&form.fact).await?;
  tracing::info!(%id, "fact inserted");
  Ok((StatusCode::CREATED, Json(Created { message: "Fact inserted", id })))
}
