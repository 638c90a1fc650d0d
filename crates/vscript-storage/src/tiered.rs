//! Local-first store with a remote copy.
//!
//! The local copy is authoritative for durability: a save only fails if the
//! local write fails. A remote failure is reported as
//! [`SaveOutcome::LocalOnly`] so the caller can show that cloud sync is
//! pending.

use tracing::{debug, warn};
use vscript_models::Scene;

use crate::draft::DraftKey;
use crate::error::StorageResult;
use crate::store::{DraftStore, SaveOutcome};

/// Combines a local and a remote [`DraftStore`].
pub struct TieredDraftStore<L, R> {
    local: L,
    remote: R,
}

impl<L: DraftStore, R: DraftStore> TieredDraftStore<L, R> {
    pub fn new(local: L, remote: R) -> Self {
        Self { local, remote }
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Save locally, then remotely.
    pub async fn save(&self, key: &DraftKey, scenes: &[Scene]) -> StorageResult<SaveOutcome> {
        self.local.save(key, scenes).await?;

        match self.remote.save(key, scenes).await {
            Ok(()) => {
                debug!(key = %key, "Draft synced to remote store");
                Ok(SaveOutcome::Synced)
            }
            Err(e) => {
                warn!(
                    key = %key,
                    error = %e,
                    retryable = e.is_retryable(),
                    "Remote draft save failed, kept local copy"
                );
                Ok(SaveOutcome::LocalOnly {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Load from the remote store, falling back to the local copy.
    pub async fn load(&self, key: &DraftKey) -> StorageResult<Option<Vec<Scene>>> {
        match self.remote.load(key).await {
            Ok(Some(scenes)) => return Ok(Some(scenes)),
            Ok(None) => debug!(key = %key, "No remote draft, trying local"),
            Err(e) => warn!(key = %key, error = %e, "Remote draft load failed, trying local"),
        }
        self.local.load(key).await
    }

    /// Delete both copies. The first error is returned after both attempts.
    pub async fn delete(&self, key: &DraftKey) -> StorageResult<()> {
        let local = self.local.delete(key).await;
        let remote = self.remote.delete(key).await;
        local.and(remote)
    }
}
