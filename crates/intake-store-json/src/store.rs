//! [`JsonStore`] — the JSON-file implementation of [`LeadStore`].

use std::{
  collections::HashMap,
  path::{Path, PathBuf},
  sync::{Arc, Mutex as StdMutex, OnceLock, PoisonError},
};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::Mutex};
use uuid::Uuid;

use intake_core::{
  lead::{Lead, ValidatedLead},
  status::LeadStatus,
  store::LeadStore,
};

use crate::Result;

// ─── On-disk shape ───────────────────────────────────────────────────────────

/// The whole backing file: `{"leads": [ ... ]}`, insertion order preserved.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Collection {
  leads: Vec<Lead>,
}

// ─── Write locking ───────────────────────────────────────────────────────────

/// One write lock per canonical store path, shared by every handle opened on
/// that path within the process. Entries are never removed.
fn lock_for(path: &Path) -> Arc<Mutex<()>> {
  static LOCKS: OnceLock<StdMutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();
  LOCKS
    .get_or_init(StdMutex::default)
    .lock()
    .unwrap_or_else(PoisonError::into_inner)
    .entry(path.to_path_buf())
    .or_default()
    .clone()
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A lead store backed by a single JSON file.
///
/// Cloning is cheap — clones share the handle state. Mutations are serialized
/// through a per-path lock shared by every handle opened on the same file
/// within this process, so concurrent `create`/`update_status` calls cannot
/// lose each other's writes. Coordination across processes is out of scope; a
/// deployment with multiple writer processes needs a real transactional store
/// behind [`LeadStore`].
#[derive(Clone)]
pub struct JsonStore {
  inner: Arc<Inner>,
}

struct Inner {
  path:       PathBuf,
  write_lock: Arc<Mutex<()>>,
}

impl JsonStore {
  /// Open a store at `path`, seeding the file with an empty collection if it
  /// does not exist yet.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if !fs::try_exists(path).await? {
      write_collection(path, &Collection::default()).await?;
    }

    // Canonicalize so handles opened via different spellings of one path end
    // up behind the same lock.
    let path = fs::canonicalize(path).await?;
    let write_lock = lock_for(&path);

    Ok(Self {
      inner: Arc::new(Inner { path, write_lock }),
    })
  }

  async fn read(&self) -> Result<Collection> {
    let bytes = fs::read(&self.inner.path).await?;
    Ok(serde_json::from_slice(&bytes)?)
  }

  async fn write(&self, collection: &Collection) -> Result<()> {
    write_collection(&self.inner.path, collection).await
  }
}

/// Replace the backing file atomically: write a uniquely-named sibling temp
/// file, then rename over the original. A failure part-way leaves the prior
/// file untouched for subsequent readers, and no orphan temp file behind.
async fn write_collection(path: &Path, collection: &Collection) -> Result<()> {
  let bytes = serde_json::to_vec_pretty(collection)?;
  let temp = path.with_extension(format!("{}.tmp", Uuid::new_v4()));
  fs::write(&temp, &bytes).await?;
  if let Err(error) = fs::rename(&temp, path).await {
    let _ = fs::remove_file(&temp).await;
    return Err(error.into());
  }
  Ok(())
}

// ─── LeadStore impl ──────────────────────────────────────────────────────────

impl LeadStore for JsonStore {
  async fn create(&self, candidate: ValidatedLead) -> intake_core::Result<Lead> {
    let _guard = self.inner.write_lock.lock().await;

    let mut collection = self.read().await?;
    let lead = Lead::new(Uuid::new_v4(), Utc::now(), candidate);
    collection.leads.push(lead.clone());
    self.write(&collection).await?;

    Ok(lead)
  }

  async fn list(&self) -> intake_core::Result<Vec<Lead>> {
    Ok(self.read().await?.leads)
  }

  async fn update_status(
    &self,
    id: Uuid,
    new_status: LeadStatus,
  ) -> intake_core::Result<Lead> {
    let _guard = self.inner.write_lock.lock().await;

    let mut collection = self.read().await?;
    let lead = collection
      .leads
      .iter_mut()
      .find(|lead| lead.id == id)
      .ok_or(intake_core::Error::LeadNotFound(id))?;

    lead.status = lead.status.transition_to(new_status)?;
    let updated = lead.clone();
    self.write(&collection).await?;

    Ok(updated)
  }
}
