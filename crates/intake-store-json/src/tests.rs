//! Integration tests for `JsonStore` against per-test temp files.

use std::path::{Path, PathBuf};

use intake_core::{
  Error,
  lead::ValidatedLead,
  status::LeadStatus,
  store::LeadStore,
};
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::JsonStore;

/// A temp-file path that removes the backing file when the test finishes,
/// pass or fail.
struct TempDb(PathBuf);

impl TempDb {
  fn new() -> Self {
    Self(std::env::temp_dir().join(format!("intake-store-test-{}.json", Uuid::new_v4())))
  }

  fn path(&self) -> &Path { &self.0 }

  async fn store(&self) -> JsonStore {
    JsonStore::open(&self.0).await.expect("temp store")
  }
}

impl Drop for TempDb {
  fn drop(&mut self) {
    let _ = std::fs::remove_file(&self.0);
  }
}

fn candidate(first_name: &str) -> ValidatedLead {
  ValidatedLead {
    first_name: first_name.into(),
    last_name: "Doe".into(),
    email: format!("{}@example.com", first_name.to_lowercase()),
    linkedin: "https://linkedin.com/in/example".into(),
    country: "Canada".into(),
    visas: vec!["o1".into()],
    message: "Looking for an assessment of my case.".into(),
    resume_filename: None,
  }
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_assigns_identity_and_pending_status() {
  let db = TempDb::new();
  let s = db.store().await;

  let lead = s.create(candidate("Alice")).await.unwrap();
  assert_eq!(lead.status, LeadStatus::Pending);
  assert_eq!(lead.first_name, "Alice");
  assert_eq!(lead.email, "alice@example.com");
  assert_eq!(lead.resume_filename, None);

  let other = s.create(candidate("Bob")).await.unwrap();
  assert_ne!(lead.id, other.id);
}

#[tokio::test]
async fn create_retains_resume_filename() {
  let db = TempDb::new();
  let s = db.store().await;

  let mut input = candidate("Alice");
  input.resume_filename = Some("alice-cv.pdf".into());
  let lead = s.create(input).await.unwrap();
  assert_eq!(lead.resume_filename.as_deref(), Some("alice-cv.pdf"));

  let listed = s.list().await.unwrap();
  assert_eq!(listed[0].resume_filename.as_deref(), Some("alice-cv.pdf"));
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_empty_store_returns_no_leads() {
  let db = TempDb::new();
  let s = db.store().await;
  assert!(s.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_preserves_creation_order() {
  let db = TempDb::new();
  let s = db.store().await;
  s.create(candidate("Alice")).await.unwrap();
  s.create(candidate("Bob")).await.unwrap();
  s.create(candidate("Carol")).await.unwrap();

  let leads = s.list().await.unwrap();
  let names: Vec<_> = leads.iter().map(|l| l.first_name.as_str()).collect();
  assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
}

// ─── Status updates ──────────────────────────────────────────────────────────

#[tokio::test]
async fn update_status_transitions_pending_lead() {
  let db = TempDb::new();
  let s = db.store().await;
  let lead = s.create(candidate("Alice")).await.unwrap();

  let updated = s
    .update_status(lead.id, LeadStatus::ReachedOut)
    .await
    .unwrap();
  assert_eq!(updated.id, lead.id);
  assert_eq!(updated.status, LeadStatus::ReachedOut);

  let listed = s.list().await.unwrap();
  assert_eq!(listed[0].status, LeadStatus::ReachedOut);
}

#[tokio::test]
async fn second_reach_out_is_rejected() {
  let db = TempDb::new();
  let s = db.store().await;
  let lead = s.create(candidate("Alice")).await.unwrap();
  s.update_status(lead.id, LeadStatus::ReachedOut)
    .await
    .unwrap();

  let err = s
    .update_status(lead.id, LeadStatus::ReachedOut)
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::InvalidTransition {
      from: LeadStatus::ReachedOut,
      to:   LeadStatus::ReachedOut,
    }
  ));

  // The stored record is unchanged.
  let listed = s.list().await.unwrap();
  assert_eq!(listed[0].status, LeadStatus::ReachedOut);
}

#[tokio::test]
async fn transition_back_to_pending_is_rejected() {
  let db = TempDb::new();
  let s = db.store().await;
  let lead = s.create(candidate("Alice")).await.unwrap();

  let err = s
    .update_status(lead.id, LeadStatus::Pending)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::InvalidTransition { .. }));
  assert_eq!(s.list().await.unwrap()[0].status, LeadStatus::Pending);
}

#[tokio::test]
async fn update_unknown_id_fails_and_leaves_collection_unchanged() {
  let db = TempDb::new();
  let s = db.store().await;
  s.create(candidate("Alice")).await.unwrap();
  let before = s.list().await.unwrap();

  let missing = Uuid::new_v4();
  let err = s
    .update_status(missing, LeadStatus::ReachedOut)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::LeadNotFound(id) if id == missing));

  assert_eq!(s.list().await.unwrap(), before);
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_creates_on_clones_are_all_persisted() {
  let db = TempDb::new();
  let s = db.store().await;

  let mut tasks = JoinSet::new();
  for i in 0..8 {
    let s = s.clone();
    tasks.spawn(async move { s.create(candidate(&format!("Clone{i}"))).await });
  }
  while let Some(result) = tasks.join_next().await {
    result.unwrap().unwrap();
  }

  let leads = s.list().await.unwrap();
  assert_eq!(leads.len(), 8);
  let mut ids: Vec<_> = leads.iter().map(|l| l.id).collect();
  ids.sort();
  ids.dedup();
  assert_eq!(ids.len(), 8);
}

#[tokio::test]
async fn separately_opened_handles_share_one_writer_lock() {
  let db = TempDb::new();
  let a = db.store().await;
  let b = JsonStore::open(db.path()).await.unwrap();

  let mut tasks = JoinSet::new();
  for i in 0..8 {
    let a = a.clone();
    tasks.spawn(async move { a.create(candidate(&format!("First{i}"))).await });
    let b = b.clone();
    tasks.spawn(async move { b.create(candidate(&format!("Second{i}"))).await });
  }
  while let Some(result) = tasks.join_next().await {
    result.unwrap().unwrap();
  }

  assert_eq!(a.list().await.unwrap().len(), 16);
  assert_eq!(b.list().await.unwrap().len(), 16);
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_reads_back_identical_records() {
  let db = TempDb::new();

  let s = db.store().await;
  let mut input = candidate("Alice");
  input.resume_filename = Some("alice-cv.pdf".into());
  s.create(input).await.unwrap();
  s.create(candidate("Bob")).await.unwrap();
  let before = s.list().await.unwrap();
  drop(s);

  let reopened = db.store().await;
  assert_eq!(reopened.list().await.unwrap(), before);
}

#[tokio::test]
async fn corrupt_file_surfaces_persistence_error() {
  let db = TempDb::new();
  let s = db.store().await;
  tokio::fs::write(db.path(), b"not json at all").await.unwrap();

  let err = s.list().await.unwrap_err();
  assert!(matches!(err, Error::Persistence(_)));
}

#[tokio::test]
async fn open_preserves_an_existing_collection() {
  let db = TempDb::new();
  let s = db.store().await;
  s.create(candidate("Alice")).await.unwrap();
  drop(s);

  // A second open must not re-seed the file.
  let reopened = db.store().await;
  assert_eq!(reopened.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn no_temp_files_left_beside_the_store() {
  let db = TempDb::new();
  let s = db.store().await;
  let lead = s.create(candidate("Alice")).await.unwrap();
  s.create(candidate("Bob")).await.unwrap();
  s.update_status(lead.id, LeadStatus::ReachedOut)
    .await
    .unwrap();

  let stem = db
    .path()
    .file_stem()
    .unwrap()
    .to_string_lossy()
    .into_owned();
  let mut entries = tokio::fs::read_dir(db.path().parent().unwrap())
    .await
    .unwrap();
  while let Some(entry) = entries.next_entry().await.unwrap() {
    let name = entry.file_name().to_string_lossy().into_owned();
    assert!(
      !(name.starts_with(&stem) && name.ends_with(".tmp")),
      "orphan temp file: {name}"
    );
  }
}
