//! Shallow scene patches.

use vscript_models::{
    synthesize, KeywordBinding, Scene, SceneAssets, SceneSettings, VideoEffects,
};

/// Fields to overwrite on a scene. `None` leaves the field untouched.
///
/// Applying a patch never recomputes the duration. Callers that change the
/// narration and want a fresh estimate build the patch with
/// [`ScenePatch::narration_with_estimate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenePatch {
    pub narration: Option<String>,
    pub duration: Option<String>,
    pub duration_in_seconds: Option<u64>,
    pub highlighted_keywords: Option<Vec<String>>,
    pub keywords_selected: Option<Vec<KeywordBinding>>,
    pub assets: Option<SceneAssets>,
    pub video_effects: Option<VideoEffects>,
    pub scene_settings: Option<SceneSettings>,
}

impl ScenePatch {
    /// Replace the narration only.
    pub fn narration(text: impl Into<String>) -> Self {
        Self {
            narration: Some(text.into()),
            ..Default::default()
        }
    }

    /// Replace the narration and both duration fields with the synthesized estimate.
    pub fn narration_with_estimate(text: impl Into<String>) -> Self {
        let text = text.into();
        let (duration, seconds) = synthesize(&text);
        Self {
            narration: Some(text),
            duration: Some(duration),
            duration_in_seconds: Some(seconds),
            ..Default::default()
        }
    }

    /// Replace the duration string as typed by the user.
    ///
    /// `durationInSeconds` is left alone and may disagree afterwards.
    pub fn duration_text(text: impl Into<String>) -> Self {
        Self {
            duration: Some(text.into()),
            ..Default::default()
        }
    }

    /// Set the video effects.
    pub fn with_video_effects(mut self, effects: VideoEffects) -> Self {
        self.video_effects = Some(effects);
        self
    }

    /// Set the assets.
    pub fn with_assets(mut self, assets: SceneAssets) -> Self {
        self.assets = Some(assets);
        self
    }

    /// Set the scene settings.
    pub fn with_scene_settings(mut self, settings: SceneSettings) -> Self {
        self.scene_settings = Some(settings);
        self
    }

    /// True if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow-merge into `scene`.
    pub fn apply_to(self, scene: &mut Scene) {
        if let Some(narration) = self.narration {
            scene.narration = narration;
        }
        if let Some(duration) = self.duration {
            scene.duration = duration;
        }
        if let Some(seconds) = self.duration_in_seconds {
            scene.duration_in_seconds = seconds;
        }
        if let Some(keywords) = self.highlighted_keywords {
            scene.highlighted_keywords = keywords;
        }
        if let Some(bindings) = self.keywords_selected {
            scene.keywords_selected = bindings;
        }
        if let Some(mut assets) = self.assets {
            assets.normalize();
            scene.assets = assets;
        }
        if let Some(effects) = self.video_effects {
            scene.video_effects = Some(effects);
        }
        if let Some(settings) = self.scene_settings {
            scene.scene_settings = Some(settings);
        }
    }
}
