//! Draft persistence for scene timelines.
//!
//! This crate provides:
//! - The [`DraftStore`] trait used by editors to save and restore timelines
//! - A gzip-compressed file store and an in-memory store
//! - A local-first tiered store that reports when only the local copy succeeded
//! - Environment-driven configuration

pub mod config;
pub mod draft;
pub mod error;
pub mod local;
pub mod memory;
pub mod store;
pub mod tiered;

pub use config::StorageConfig;
pub use draft::{
    compress_draft, decode_draft, decompress_draft, encode_draft, DraftEnvelope, DraftKey,
    DRAFT_VERSION,
};
pub use error::{StorageError, StorageResult};
pub use local::LocalDraftStore;
pub use memory::MemoryDraftStore;
pub use store::{DraftStore, SaveOutcome};
pub use tiered::TieredDraftStore;
