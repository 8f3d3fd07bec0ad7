//! Handlers for `/leads` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/leads` | Full collection, insertion order |
//! | `POST`  | `/leads` | Multipart form; 422 with field errors on rejection |
//! | `PATCH` | `/leads/:id` | Body: `{"status":"REACHED_OUT"}` |
//! | `POST`  | `/leads/:id/reach-out` | Shorthand for the one legal transition |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Multipart, Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use intake_core::{
  lead::Lead,
  status::LeadStatus,
  store::{LeadStore, Submission, list_leads, mark_reached_out, submit_lead},
  validate::RawSubmission,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ListResponse {
  pub leads: Vec<Lead>,
}

/// `GET /leads`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<ListResponse>, ApiError>
where
  S: LeadStore,
{
  let leads = list_leads(store.as_ref()).await?;
  Ok(Json(ListResponse { leads }))
}

// ─── Submit ──────────────────────────────────────────────────────────────────

/// `POST /leads` — `multipart/form-data` from the public intake form.
///
/// Text parts: `firstName`, `lastName`, `email`, `linkedin`, `country`,
/// `message`, plus `visas` as a JSON-encoded array of tag strings. Optional
/// `resume` file part, of which only the filename is kept.
pub async fn submit<S>(
  State(store): State<Arc<S>>,
  mut form: Multipart,
) -> Result<impl IntoResponse, ApiError>
where
  S: LeadStore,
{
  let raw = read_submission(&mut form).await?;
  match submit_lead(store.as_ref(), raw).await? {
    Submission::Accepted(lead) => Ok((StatusCode::CREATED, Json(lead))),
    Submission::Rejected(errors) => Err(ApiError::Validation(errors)),
  }
}

/// Drain the multipart stream into a [`RawSubmission`]. Unknown parts are
/// ignored.
async fn read_submission(form: &mut Multipart) -> Result<RawSubmission, ApiError> {
  let mut raw = RawSubmission::default();

  while let Some(field) = form
    .next_field()
    .await
    .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {e}")))?
  {
    let Some(name) = field.name().map(str::to_owned) else {
      continue;
    };

    if name == "resume" {
      let filename = field.file_name().map(str::to_owned);
      // The binary is discarded; only the filename travels downstream.
      let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(format!("unreadable resume part: {e}")))?;
      tracing::debug!(
        filename = filename.as_deref().unwrap_or("<unnamed>"),
        size = bytes.len(),
        "received resume attachment"
      );
      raw.resume_filename = filename;
      continue;
    }

    let text = field
      .text()
      .await
      .map_err(|e| ApiError::BadRequest(format!("unreadable field {name:?}: {e}")))?;

    match name.as_str() {
      "firstName" => raw.first_name = text,
      "lastName" => raw.last_name = text,
      "email" => raw.email = text,
      "linkedin" => raw.linkedin = text,
      "country" => raw.country = text,
      "message" => raw.message = text,
      "visas" => {
        raw.visas = serde_json::from_str(&text).map_err(|_| {
          ApiError::BadRequest("visas must be a JSON array of tag strings".to_string())
        })?;
      }
      _ => {}
    }
  }

  Ok(raw)
}

// ─── Status updates ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub status: LeadStatus,
}

/// `PATCH /leads/:id` — body: `{"status":"REACHED_OUT"}`
pub async fn update_status<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<Lead>, ApiError>
where
  S: LeadStore,
{
  let lead = store.update_status(id, body.status).await?;
  Ok(Json(lead))
}

/// `POST /leads/:id/reach-out`
pub async fn reach_out<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Lead>, ApiError>
where
  S: LeadStore,
{
  let lead = mark_reached_out(store.as_ref(), id).await?;
  Ok(Json(lead))
}
