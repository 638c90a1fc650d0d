//! Shared data models for the VideoScript scene timeline.
//!
//! This crate provides Serde-serializable types for:
//! - Scenes and their identifiers
//! - Scene media assets with explicit origin tags
//! - Keyword to media bindings (structured form, legacy map accepted on read)
//! - Per-scene video effects (clips, logos, background music, transition)
//! - Scene and project effect settings
//! - Duration parsing, formatting and narration-based estimation

pub mod assets;
pub mod duration;
pub mod effects;
pub mod keyword;
pub mod scene;
pub mod settings;

// Re-export common types
pub use assets::{AssetOrigin, ClipAsset, SceneAssets};
pub use duration::{
    estimate_seconds_from_narration, format_seconds_to_duration, parse_duration_string,
    sum_timeline, synthesize, WORDS_PER_MINUTE,
};
pub use effects::{ClipRef, LogoPosition, LogoRef, MusicTrack, VideoEffects};
pub use keyword::{keyword_key, normalize_keyword, BindingMedia, KeywordBinding};
pub use scene::{Scene, SceneId};
pub use settings::{BackgroundKind, BackgroundMedia, EffectSettings, ProjectSettings, SceneSettings};
