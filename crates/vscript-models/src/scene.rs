//! Scene (chapter) model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::duration::synthesize;
use crate::keyword::{deserialize_keyword_selections, KeywordBinding};
use crate::{SceneAssets, SceneSettings, VideoEffects};

/// Narration given to scenes created from the empty template.
pub const PLACEHOLDER_NARRATION: &str = "New scene narration";

/// Duration given to scenes created from the empty template.
pub const DEFAULT_DURATION: &str = "0s";

/// Unique identifier for a scene.
///
/// Assigned at creation and never reused; a missing id in incoming JSON is
/// filled with a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SceneId(pub String);

impl SceneId {
    /// Generate a new random scene ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SceneId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One ordered unit of the video timeline.
///
/// The position of a scene inside the timeline vector is its order; there is
/// no separate index field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Stable unique ID
    #[serde(default)]
    pub id: SceneId,

    /// Narration text (may be empty)
    #[serde(default)]
    pub narration: String,

    /// Human-readable duration, e.g. "1m 30s"
    #[serde(default = "default_duration")]
    pub duration: String,

    /// Duration in whole seconds
    #[serde(default)]
    pub duration_in_seconds: u64,

    /// Keywords highlighted in the narration, in selection order
    #[serde(default)]
    pub highlighted_keywords: Vec<String>,

    /// Media bound to highlighted keywords
    #[serde(default, deserialize_with = "deserialize_keyword_selections")]
    #[schemars(with = "Vec<KeywordBinding>")]
    pub keywords_selected: Vec<KeywordBinding>,

    /// Flattened media attached to the scene
    #[serde(default)]
    pub assets: SceneAssets,

    /// Per-scene video effects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_effects: Option<VideoEffects>,

    /// Scene-level overrides of the project settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_settings: Option<SceneSettings>,
}

fn default_duration() -> String {
    DEFAULT_DURATION.to_string()
}

impl Scene {
    /// Create a scene with the given narration and a synthesized duration.
    pub fn new(narration: impl Into<String>) -> Self {
        let narration = narration.into();
        let (duration, duration_in_seconds) = synthesize(&narration);
        Self {
            id: SceneId::new(),
            narration,
            duration,
            duration_in_seconds,
            highlighted_keywords: Vec::new(),
            keywords_selected: Vec::new(),
            assets: SceneAssets::default(),
            video_effects: None,
            scene_settings: None,
        }
    }

    /// Create the empty template scene used by "insert".
    pub fn placeholder() -> Self {
        Self {
            duration: default_duration(),
            duration_in_seconds: 0,
            ..Self::new(PLACEHOLDER_NARRATION)
        }
    }

    /// Set the scene ID.
    pub fn with_id(mut self, id: SceneId) -> Self {
        self.id = id;
        self
    }

    /// Set the highlighted keywords without validation.
    ///
    /// Use the timeline keyword binder for checked insertion.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.highlighted_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the video effects.
    pub fn with_effects(mut self, effects: VideoEffects) -> Self {
        self.video_effects = Some(effects);
        self
    }

    /// Set the scene-level settings.
    pub fn with_settings(mut self, settings: SceneSettings) -> Self {
        self.scene_settings = Some(settings);
        self
    }

    /// Video effects, created empty on first access.
    pub fn effects_mut(&mut self) -> &mut VideoEffects {
        self.video_effects.get_or_insert_with(VideoEffects::default)
    }
}
