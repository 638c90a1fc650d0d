//! Scene timeline consistency engine.
//!
//! Every operation takes the current scene list (or one scene) by reference
//! and returns a new value. Structural edits with an out-of-range index or
//! unknown ID are logged no-ops, so a timeline held by the caller is never
//! left half-edited.
//!
//! - [`timeline`]: insert, delete, reorder, split and field updates
//! - [`keywords`]: highlighted keywords and their bound media
//! - [`effects`]: per-scene clips, logos, music and transition
//! - [`settings`]: effective settings with project fallback
//! - [`bulk`]: one change applied to every scene
//! - [`merge`]: async results merged by scene ID
//! - [`services`]: media search and narration variation backends
//! - [`validate`]: invariant checks

pub mod bulk;
pub mod effects;
pub mod error;
pub mod keywords;
pub mod merge;
pub mod patch;
pub mod services;
pub mod settings;
pub mod timeline;
pub mod validate;

pub use bulk::{apply_to_all, BulkChange};
pub use effects::{
    add_clip, add_logo, add_music_track, remove_clip, remove_logo, remove_music_track,
    set_transition, update_clip, update_logo, update_music_track, ClipPatch, EffectEntry,
    LogoPatch, MusicPatch,
};
pub use error::{KeywordConflict, ServiceError, ServiceResult};
pub use keywords::{
    add_keyword, bind_clip_to_keyword, bind_media_to_keyword, bind_tagged_media, bound_urls,
    classify_keyword, remove_keyword, unbind_media, TaggedMedia,
};
pub use merge::{apply_narration_variation, bind_media_by_id, resolve_index, update_by_id};
pub use patch::ScenePatch;
pub use services::{fetch_and_bind_media, fetch_narration_variations, MediaSearch, NarrationVariations};
pub use settings::{resolve_effective, EffectiveSettings};
pub use timeline::{delete, insert_after, position_of, reorder, replace_all, split, update_field};
pub use validate::{validate_timeline, Violation};
