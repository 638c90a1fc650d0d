//! Draft keys, the persisted envelope and its byte encoding.
//!
//! A draft is the whole timeline of one project, stored as a single JSON
//! document, optionally gzip-compressed.

use std::io::{Read, Write};

use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;
use vscript_models::{sum_timeline, Scene};

use crate::error::{StorageError, StorageResult};

/// Current envelope format version.
pub const DRAFT_VERSION: u32 = 1;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Identifies one stored draft.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DraftKey {
    pub user_id: String,
    /// Project draft; `None` is the user's default draft
    pub draft_id: Option<String>,
}

impl DraftKey {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            draft_id: None,
        }
    }

    pub fn with_draft(mut self, draft_id: impl Into<String>) -> Self {
        self.draft_id = Some(draft_id.into());
        self
    }

    /// Logical key, e.g. `user123/drafts/default`.
    pub fn storage_key(&self) -> String {
        format!(
            "{}/drafts/{}",
            self.user_id,
            self.draft_id.as_deref().unwrap_or("default")
        )
    }

    /// Stable file name derived from a SHA-256 of the logical key.
    pub fn file_name(&self, compressed: bool) -> String {
        let digest = Sha256::digest(self.storage_key().as_bytes());
        let ext = if compressed { "json.gz" } else { "json" };
        format!("{:x}.{}", digest, ext)
    }
}

impl std::fmt::Display for DraftKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.storage_key())
    }
}

/// Persisted shape of a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftEnvelope {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub scene_count: usize,
    /// Sum of the scene durations in seconds
    pub total_seconds: u64,
    pub scenes: Vec<Scene>,
}

impl DraftEnvelope {
    pub fn new(scenes: &[Scene]) -> Self {
        Self {
            version: DRAFT_VERSION,
            saved_at: Utc::now(),
            scene_count: scenes.len(),
            total_seconds: sum_timeline(scenes),
            scenes: scenes.to_vec(),
        }
    }
}

/// Either the envelope or a bare scene array written by older clients.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDraft {
    Envelope(DraftEnvelope),
    Bare(Vec<Scene>),
}

/// Compress serialized draft bytes with gzip.
pub fn compress_draft(data: &[u8]) -> StorageResult<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| StorageError::Serialization(format!("Failed to gzip draft: {}", e)))?;

    encoder
        .finish()
        .map_err(|e| StorageError::Serialization(format!("Failed to finish gzip encoding: {}", e)))
}

/// Decompress gzip draft bytes.
pub fn decompress_draft(data: &[u8]) -> StorageResult<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| StorageError::Serialization(format!("Failed to gunzip draft: {}", e)))?;
    Ok(out)
}

/// Serialize scenes into stored bytes.
pub fn encode_draft(scenes: &[Scene], compress: bool) -> StorageResult<Vec<u8>> {
    let json = serde_json::to_vec(&DraftEnvelope::new(scenes))?;
    if compress {
        compress_draft(&json)
    } else {
        Ok(json)
    }
}

/// Parse stored bytes, compressed or not, back into an envelope.
pub fn decode_draft(data: &[u8]) -> StorageResult<DraftEnvelope> {
    let json = if data.starts_with(&GZIP_MAGIC) {
        decompress_draft(data)?
    } else {
        data.to_vec()
    };

    match serde_json::from_slice::<StoredDraft>(&json)? {
        StoredDraft::Envelope(envelope) => Ok(envelope),
        StoredDraft::Bare(scenes) => {
            debug!(scenes = scenes.len(), "Loaded bare scene array draft");
            Ok(DraftEnvelope {
                version: 0,
                saved_at: DateTime::<Utc>::default(),
                scene_count: scenes.len(),
                total_seconds: sum_timeline(&scenes),
                scenes,
            })
        }
    }
}
