//! Lead — the unit of record.
//!
//! A lead is created whole: the [`validate`](crate::validate) pass produces a
//! [`ValidatedLead`], and the store turns it into a [`Lead`] by assigning the
//! identifier, timestamp, and initial status. No partially-validated record
//! ever reaches persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::LeadStatus;

/// Visa-category tags presented on the intake form. Submitted tags are not
/// checked against this list server-side; it exists for form surfaces.
pub const VISA_CATEGORIES: &[&str] = &["o1", "eb1a", "eb2niw", "unknown"];

/// Countries presented on the intake form. Membership is not enforced
/// server-side; any non-empty country string is accepted.
pub const COUNTRIES: &[&str] = &[
  "Australia",
  "Brazil",
  "Canada",
  "China",
  "France",
  "Germany",
  "India",
  "Italy",
  "Japan",
  "Mexico",
  "Russia",
  "South Korea",
  "Spain",
  "United Kingdom",
  "United States",
];

/// A single immigration-assessment request, as persisted and as served to the
/// admin surface. Field names on the wire are camelCase.
///
/// `id`, `submitted_at`, and the initial `status` are assigned by the store
/// at creation and never change thereafter (`status` only via the transition
/// machine in [`crate::status`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
  pub id:              Uuid,
  pub first_name:      String,
  pub last_name:       String,
  pub email:           String,
  /// Any personal-site URL is accepted here, despite the field name.
  pub linkedin:        String,
  pub country:         String,
  pub visas:           Vec<String>,
  pub message:         String,
  /// Only the filename of an attached resume is retained; the binary belongs
  /// to the collaborating upload surface.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resume_filename: Option<String>,
  pub status:          LeadStatus,
  pub submitted_at:    DateTime<Utc>,
}

impl Lead {
  /// Assemble a stored record from a validated candidate. Status always
  /// starts at [`LeadStatus::Pending`].
  pub fn new(id: Uuid, submitted_at: DateTime<Utc>, candidate: ValidatedLead) -> Self {
    Self {
      id,
      first_name: candidate.first_name,
      last_name: candidate.last_name,
      email: candidate.email,
      linkedin: candidate.linkedin,
      country: candidate.country,
      visas: candidate.visas,
      message: candidate.message,
      resume_filename: candidate.resume_filename,
      status: LeadStatus::Pending,
      submitted_at,
    }
  }
}

/// Output of the intake validator and input to
/// [`LeadStore::create`](crate::store::LeadStore::create).
/// Carries every lead field except those the store assigns.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLead {
  pub first_name:      String,
  pub last_name:       String,
  pub email:           String,
  pub linkedin:        String,
  pub country:         String,
  pub visas:           Vec<String>,
  pub message:         String,
  pub resume_filename: Option<String>,
}
