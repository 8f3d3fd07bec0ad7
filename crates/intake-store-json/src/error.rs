//! Error type for `intake-store-json`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// The backing file exists but does not hold a well-formed collection.
  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

/// Backend internals surface as a core `Persistence` error at the trait
/// boundary.
impl From<Error> for intake_core::Error {
  fn from(error: Error) -> Self {
    intake_core::Error::Persistence(Box::new(error))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
