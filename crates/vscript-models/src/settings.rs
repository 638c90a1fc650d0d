//! Scene and project effect settings.
//!
//! A scene may override any category; unset categories fall back to the
//! project defaults when the effective value is resolved.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{LogoRef, MusicTrack};

/// Kind of background media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundKind {
    Image,
    Video,
}

/// Image or video drawn behind the scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BackgroundMedia {
    pub kind: BackgroundKind,
    pub url: String,
}

impl BackgroundMedia {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: BackgroundKind::Image,
            url: url.into(),
        }
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self {
            kind: BackgroundKind::Video,
            url: url.into(),
        }
    }
}

/// Effect settings for one level (scene override or project default).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EffectSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<LogoRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_music: Option<MusicTrack>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundMedia>,
}

/// Scene-level overrides.
pub type SceneSettings = EffectSettings;

/// Project-level defaults.
pub type ProjectSettings = EffectSettings;

impl EffectSettings {
    /// Set the logo.
    pub fn with_logo(mut self, logo: LogoRef) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Set the transition.
    pub fn with_transition(mut self, transition: impl Into<String>) -> Self {
        self.transition = Some(transition.into());
        self
    }

    /// Set the background music.
    pub fn with_background_music(mut self, track: MusicTrack) -> Self {
        self.background_music = Some(track);
        self
    }

    /// Set the background media.
    pub fn with_background(mut self, background: BackgroundMedia) -> Self {
        self.background = Some(background);
        self
    }
}
