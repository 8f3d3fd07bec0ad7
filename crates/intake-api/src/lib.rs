//! JSON REST API for the lead-intake service.
//!
//! Exposes an axum [`Router`] backed by any [`intake_core::store::LeadStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", intake_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod leads;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch, post},
};
use intake_core::store::LeadStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: LeadStore + 'static,
{
  Router::new()
    .route("/leads", get(leads::list::<S>).post(leads::submit::<S>))
    .route("/leads/{id}", patch(leads::update_status::<S>))
    .route("/leads/{id}/reach-out", post(leads::reach_out::<S>))
    .with_state(store)
}

// ─── Integration tests ───────────────────────────────────────────────────────
