//! Draft store abstraction.

use async_trait::async_trait;
use vscript_models::Scene;

use crate::draft::DraftKey;
use crate::error::StorageResult;

/// Persists whole timelines keyed by [`DraftKey`].
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Overwrite the stored draft with `scenes`.
    async fn save(&self, key: &DraftKey, scenes: &[Scene]) -> StorageResult<()>;

    /// Load the stored draft, or `None` if nothing was saved.
    async fn load(&self, key: &DraftKey) -> StorageResult<Option<Vec<Scene>>>;

    /// Remove the stored draft. Removing a missing draft is not an error.
    async fn delete(&self, key: &DraftKey) -> StorageResult<()>;

    /// Check if a draft is stored.
    async fn exists(&self, key: &DraftKey) -> StorageResult<bool> {
        Ok(self.load(key).await?.is_some())
    }
}

/// Where a tiered save ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Saved locally and remotely.
    Synced,
    /// Saved locally; the remote write failed.
    LocalOnly { reason: String },
}

impl SaveOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, SaveOutcome::Synced)
    }
}
