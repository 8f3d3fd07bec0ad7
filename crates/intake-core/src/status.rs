//! The lead triage status machine.
//!
//! Two states, one legal edge: `Pending -> ReachedOut`. The machine is
//! enforced by [`LeadStatus::transition_to`], which every store backend calls
//! from its `update_status` implementation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The triage state of a lead. Serialized in the wire/on-disk form the admin
/// surface displays (`"PENDING"`, `"REACHED_OUT"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
  /// Initial state, assigned at creation.
  Pending,
  /// Terminal state: an admin has contacted the prospective client.
  ReachedOut,
}

impl LeadStatus {
  /// A terminal status accepts no further transition.
  pub const fn is_terminal(self) -> bool { matches!(self, Self::ReachedOut) }

  /// Whether `next` is a legal successor of `self`.
  pub const fn can_transition_to(self, next: LeadStatus) -> bool {
    matches!((self, next), (Self::Pending, Self::ReachedOut))
  }

  /// Apply a transition, returning the successor state or
  /// [`Error::InvalidTransition`].
  pub fn transition_to(self, next: LeadStatus) -> Result<LeadStatus> {
    if self.can_transition_to(next) {
      Ok(next)
    } else {
      Err(Error::InvalidTransition { from: self, to: next })
    }
  }
}

impl fmt::Display for LeadStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Pending => "PENDING",
      Self::ReachedOut => "REACHED_OUT",
    })
  }
}
