//! Error types for `intake-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::status::LeadStatus;

#[derive(Debug, Error)]
pub enum Error {
  #[error("lead not found: {0}")]
  LeadNotFound(Uuid),

  #[error("invalid status transition: {from} -> {to}")]
  InvalidTransition { from: LeadStatus, to: LeadStatus },

  /// The backing storage could not be read or written. The source is the
  /// backend's own error; callers should not surface it to end users.
  #[error("persistence error: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
