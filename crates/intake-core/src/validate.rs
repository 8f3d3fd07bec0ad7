//! The intake validator — a pure pass from raw form fields to a
//! [`ValidatedLead`] or the full set of field errors.
//!
//! Every rule is checked independently and all violations are collected, so
//! the form surface can display them field-by-field in one round trip. No
//! rule short-circuits another and nothing here performs I/O.

use serde::{Serialize, Serializer, ser::SerializeMap};
use url::Url;

use crate::lead::ValidatedLead;

// ─── Raw input ───────────────────────────────────────────────────────────────

/// The raw field values as received from the form surface. String fields are
/// untrimmed; `visas` is the decoded tag list; `resume_filename` is the name
/// of an attached file, if any.
#[derive(Debug, Clone, Default)]
pub struct RawSubmission {
  pub first_name:      String,
  pub last_name:       String,
  pub email:           String,
  pub linkedin:        String,
  pub country:         String,
  pub visas:           Vec<String>,
  pub message:         String,
  pub resume_filename: Option<String>,
}

// ─── Field errors ────────────────────────────────────────────────────────────

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Required,
  TooShort,
  InvalidFormat,
}

/// A single rejected field: the machine-readable kind plus the message the
/// form displays inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
  pub kind:    ErrorKind,
  pub message: &'static str,
}

/// All field violations from one validation pass, in form order.
///
/// Serializes as a flat `{"fieldName": "message"}` object for inline display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
  entries: Vec<(&'static str, FieldError)>,
}

impl ValidationErrors {
  fn push(&mut self, field: &'static str, kind: ErrorKind, message: &'static str) {
    self.entries.push((field, FieldError { kind, message }));
  }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  pub fn len(&self) -> usize { self.entries.len() }

  /// Look up the error for a camelCase field name.
  pub fn get(&self, field: &str) -> Option<&FieldError> {
    self
      .entries
      .iter()
      .find(|(f, _)| *f == field)
      .map(|(_, e)| e)
  }

  /// The rejected field names, in form order.
  pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.entries.iter().map(|(f, _)| *f)
  }
}

impl Serialize for ValidationErrors {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.entries.len()))?;
    for (field, error) in &self.entries {
      map.serialize_entry(field, error.message)?;
    }
    map.end()
  }
}

// ─── Predicates ──────────────────────────────────────────────────────────────

/// `local@domain` with at least one interior dot in the domain.
fn is_valid_email(s: &str) -> bool {
  let Some((local, domain)) = s.split_once('@') else {
    return false;
  };
  !local.is_empty()
    && !domain.is_empty()
    && !domain.contains('@')
    && !s.chars().any(char::is_whitespace)
    && domain.contains('.')
    && !domain.starts_with('.')
    && !domain.ends_with('.')
}

/// A syntactically valid absolute URL with a host component.
fn is_absolute_url(s: &str) -> bool {
  Url::parse(s).is_ok_and(|url| url.has_host())
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Validate and normalize a raw submission.
///
/// Normalization: string fields are trimmed; empty visa tags are dropped and
/// duplicates removed, first occurrence winning. Rules apply to the
/// normalized values. Returns either a whole candidate record or the whole
/// error set, never both.
pub fn validate(raw: RawSubmission) -> Result<ValidatedLead, ValidationErrors> {
  let first_name = raw.first_name.trim();
  let last_name = raw.last_name.trim();
  let email = raw.email.trim();
  let linkedin = raw.linkedin.trim();
  let country = raw.country.trim();
  let message = raw.message.trim();

  let mut visas: Vec<String> = Vec::with_capacity(raw.visas.len());
  for tag in &raw.visas {
    let tag = tag.trim();
    if !tag.is_empty() && !visas.iter().any(|seen| seen == tag) {
      visas.push(tag.to_owned());
    }
  }

  let mut errors = ValidationErrors::default();

  if first_name.chars().count() < 2 {
    errors.push("firstName", ErrorKind::TooShort, "First name is required");
  }
  if last_name.chars().count() < 2 {
    errors.push("lastName", ErrorKind::TooShort, "Last name is required");
  }
  if !is_valid_email(email) {
    errors.push("email", ErrorKind::InvalidFormat, "Invalid email address");
  }
  if !is_absolute_url(linkedin) {
    errors.push("linkedin", ErrorKind::InvalidFormat, "Invalid LinkedIn URL");
  }
  if country.chars().count() < 2 {
    errors.push("country", ErrorKind::Required, "Country is required");
  }
  if visas.is_empty() {
    errors.push(
      "visas",
      ErrorKind::Required,
      "Please select at least one visa type",
    );
  }
  if message.chars().count() < 10 {
    errors.push(
      "message",
      ErrorKind::TooShort,
      "Please provide more details about your case",
    );
  }

  if !errors.is_empty() {
    return Err(errors);
  }

  Ok(ValidatedLead {
    first_name: first_name.to_owned(),
    last_name: last_name.to_owned(),
    email: email.to_owned(),
    linkedin: linkedin.to_owned(),
    country: country.to_owned(),
    visas,
    message: message.to_owned(),
    resume_filename: raw.resume_filename,
  })
}
