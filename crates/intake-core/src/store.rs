//! The `LeadStore` trait and the boundary operations built on it.
//!
//! The trait is implemented by storage backends (e.g. `intake-store-json`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  lead::{Lead, ValidatedLead},
  status::LeadStatus,
  validate::{RawSubmission, ValidationErrors, validate},
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the canonical lead collection.
///
/// The store exclusively owns the persisted collection; every mutation is a
/// full read-modify-write of it, and a failed write must leave the prior
/// persisted state intact. All methods return `Send` futures so the trait can
/// be used in multi-threaded async runtimes (e.g. tokio with `axum`).
///
/// Backends fold their internal failures into
/// [`Error::Persistence`](crate::Error::Persistence); `LeadNotFound` and
/// `InvalidTransition` come back as themselves so callers can tell a missing
/// record from a state-machine violation.
pub trait LeadStore: Send + Sync {
  /// Persist a validated candidate as a whole new record.
  ///
  /// The store assigns a fresh unique id and the `submitted_at` timestamp,
  /// and sets the status to [`LeadStatus::Pending`].
  fn create(
    &self,
    candidate: ValidatedLead,
  ) -> impl Future<Output = Result<Lead>> + Send + '_;

  /// All persisted leads, in insertion order. An empty collection yields an
  /// empty vec, never an error.
  fn list(&self) -> impl Future<Output = Result<Vec<Lead>>> + Send + '_;

  /// Transition the status of the lead with `id` and persist the updated
  /// collection, returning the updated record.
  fn update_status(
    &self,
    id: Uuid,
    new_status: LeadStatus,
  ) -> impl Future<Output = Result<Lead>> + Send + '_;
}

// ─── Boundary operations ─────────────────────────────────────────────────────

/// Outcome of a submission attempt. A rejected submission never reaches the
/// store.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
  Accepted(Lead),
  Rejected(ValidationErrors),
}

/// Validate a raw submission and, if it passes, persist it.
pub async fn submit_lead<S: LeadStore>(store: &S, raw: RawSubmission) -> Result<Submission> {
  match validate(raw) {
    Ok(candidate) => Ok(Submission::Accepted(store.create(candidate).await?)),
    Err(errors) => Ok(Submission::Rejected(errors)),
  }
}

/// The full collection, for the admin surface.
pub async fn list_leads<S: LeadStore>(store: &S) -> Result<Vec<Lead>> {
  store.list().await
}

/// Mark a pending lead as reached out. Fails with
/// [`Error::LeadNotFound`](crate::Error::LeadNotFound) for an unknown id and
/// [`Error::InvalidTransition`](crate::Error::InvalidTransition) if the lead
/// already left `Pending`.
pub async fn mark_reached_out<S: LeadStore>(store: &S, id: Uuid) -> Result<Lead> {
  store.update_status(id, LeadStatus::ReachedOut).await
}
