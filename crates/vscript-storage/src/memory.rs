//! In-memory draft store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use vscript_models::Scene;

use crate::draft::{decode_draft, encode_draft, DraftKey};
use crate::error::StorageResult;
use crate::store::DraftStore;

/// Draft store that keeps encoded drafts in memory.
///
/// Drafts go through the same encoding as on disk, so a save followed by a
/// load behaves exactly like the file store.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    drafts: RwLock<HashMap<DraftKey, Vec<u8>>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored drafts.
    pub async fn len(&self) -> usize {
        self.drafts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.drafts.read().await.is_empty()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn save(&self, key: &DraftKey, scenes: &[Scene]) -> StorageResult<()> {
        let bytes = encode_draft(scenes, false)?;
        self.drafts.write().await.insert(key.clone(), bytes);
        Ok(())
    }

    async fn load(&self, key: &DraftKey) -> StorageResult<Option<Vec<Scene>>> {
        let drafts = self.drafts.read().await;
        match drafts.get(key) {
            Some(bytes) => Ok(Some(decode_draft(bytes)?.scenes)),
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &DraftKey) -> StorageResult<()> {
        self.drafts.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &DraftKey) -> StorageResult<bool> {
        Ok(self.drafts.read().await.contains_key(key))
    }
}
