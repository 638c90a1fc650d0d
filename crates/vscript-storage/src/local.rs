//! Filesystem draft store.
//!
//! One file per draft under the configured directory. Writes go to a
//! temporary file that is renamed into place.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};
use vscript_models::Scene;

use crate::config::StorageConfig;
use crate::draft::{decode_draft, encode_draft, DraftKey};
use crate::error::{StorageError, StorageResult};
use crate::store::DraftStore;

/// Draft store backed by local files.
#[derive(Debug, Clone)]
pub struct LocalDraftStore {
    config: StorageConfig,
}

impl LocalDraftStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Create a store from environment variables.
    pub fn from_env() -> Self {
        Self::new(StorageConfig::from_env())
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Path the draft is written to with the current settings.
    pub fn path_for(&self, key: &DraftKey) -> PathBuf {
        self.config.dir.join(key.file_name(self.config.compress))
    }

    /// Both possible paths, preferred first.
    fn candidate_paths(&self, key: &DraftKey) -> [PathBuf; 2] {
        let other = self.config.dir.join(key.file_name(!self.config.compress));
        [self.path_for(key), other]
    }
}

#[async_trait]
impl DraftStore for LocalDraftStore {
    async fn save(&self, key: &DraftKey, scenes: &[Scene]) -> StorageResult<()> {
        let bytes = encode_draft(scenes, self.config.compress)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");

        fs::create_dir_all(&self.config.dir).await.map_err(|e| {
            StorageError::write_failed(format!("{}: {}", self.config.dir.display(), e))
        })?;
        fs::write(&tmp, &bytes)
            .await
            .map_err(|e| StorageError::write_failed(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| StorageError::write_failed(format!("{}: {}", path.display(), e)))?;

        // Drop a copy left behind by the other compression setting
        let [_, stale] = self.candidate_paths(key);
        if let Err(e) = fs::remove_file(&stale).await {
            if e.kind() != ErrorKind::NotFound {
                debug!(path = %stale.display(), error = %e, "Failed to remove stale draft copy");
            }
        }

        info!(
            key = %key,
            scenes = scenes.len(),
            bytes = bytes.len(),
            "Saved draft locally"
        );
        Ok(())
    }

    async fn load(&self, key: &DraftKey) -> StorageResult<Option<Vec<Scene>>> {
        for path in self.candidate_paths(key) {
            match fs::read(&path).await {
                Ok(bytes) => {
                    let envelope = decode_draft(&bytes)?;
                    debug!(
                        key = %key,
                        scenes = envelope.scene_count,
                        saved_at = %envelope.saved_at,
                        "Loaded draft from disk"
                    );
                    return Ok(Some(envelope.scenes));
                }
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(StorageError::read_failed(format!("{}: {}", path.display(), e)));
                }
            }
        }

        debug!(key = %key, "No local draft");
        Ok(None)
    }

    async fn delete(&self, key: &DraftKey) -> StorageResult<()> {
        for path in self.candidate_paths(key) {
            match fs::remove_file(&path).await {
                Ok(()) => debug!(key = %key, path = %path.display(), "Deleted draft"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(StorageError::delete_failed(format!("{}: {}", path.display(), e)));
                }
            }
        }
        Ok(())
    }

    async fn exists(&self, key: &DraftKey) -> StorageResult<bool> {
        for path in self.candidate_paths(key) {
            if fs::try_exists(&path).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
