//! Per-scene video effect models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default background music volume.
pub const DEFAULT_MUSIC_VOLUME: f64 = 0.3;

/// Generate an ID for a clip, logo or music entry.
pub fn new_effect_id() -> String {
    Uuid::new_v4().to_string()
}

/// Corner (or center) where a logo is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogoPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

impl LogoPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogoPosition::TopLeft => "top-left",
            LogoPosition::TopRight => "top-right",
            LogoPosition::BottomLeft => "bottom-left",
            LogoPosition::BottomRight => "bottom-right",
            LogoPosition::Center => "center",
        }
    }
}

/// A video clip layered over the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClipRef {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Empty until the user picks a clip
    #[serde(default)]
    pub url: String,

    /// Clip length in seconds
    #[serde(default)]
    pub duration: f64,

    /// Background video picked from the shared drive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_background_id: Option<String>,
}

impl ClipRef {
    /// Unresolved clip with a fresh ID.
    pub fn placeholder() -> Self {
        Self {
            id: new_effect_id(),
            name: String::new(),
            url: String::new(),
            duration: 0.0,
            drive_background_id: None,
        }
    }
}

/// A logo overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoRef {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Empty until the user uploads or picks a logo
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub position: LogoPosition,
}

impl LogoRef {
    /// Unresolved logo with a fresh ID.
    pub fn placeholder() -> Self {
        Self {
            id: new_effect_id(),
            name: String::new(),
            url: String::new(),
            position: LogoPosition::default(),
        }
    }

    /// Resolved logo with a fresh ID.
    pub fn new(name: impl Into<String>, url: impl Into<String>, position: LogoPosition) -> Self {
        Self {
            id: new_effect_id(),
            name: name.into(),
            url: url.into(),
            position,
        }
    }
}

/// A background music track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MusicTrack {
    pub id: String,

    /// URL or library ID of the track; empty until chosen
    #[serde(default)]
    pub selected_music: String,

    /// Playback volume in [0, 1]
    #[serde(default = "default_volume")]
    pub volume: f64,

    /// Duck under narration automatically
    #[serde(default = "default_true")]
    pub auto_adjust: bool,

    #[serde(default = "default_true")]
    pub fade_in: bool,

    #[serde(default = "default_true")]
    pub fade_out: bool,
}

fn default_volume() -> f64 {
    DEFAULT_MUSIC_VOLUME
}

fn default_true() -> bool {
    true
}

impl MusicTrack {
    /// Unselected track with a fresh ID and default mix settings.
    pub fn placeholder() -> Self {
        Self::new("")
    }

    /// Track with a fresh ID and default mix settings.
    pub fn new(selected_music: impl Into<String>) -> Self {
        Self {
            id: new_effect_id(),
            selected_music: selected_music.into(),
            volume: DEFAULT_MUSIC_VOLUME,
            auto_adjust: true,
            fade_in: true,
            fade_out: true,
        }
    }

    /// Set the volume, clamped to [0, 1].
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = clamp_volume(volume);
        self
    }
}

/// Clamp a volume to [0, 1]; NaN becomes the default volume.
pub fn clamp_volume(volume: f64) -> f64 {
    if volume.is_nan() {
        DEFAULT_MUSIC_VOLUME
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Optional video effects attached to a scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoEffects {
    #[serde(default)]
    pub clips: Vec<ClipRef>,

    #[serde(default)]
    pub logos: Vec<LogoRef>,

    #[serde(default)]
    pub background_music: Vec<MusicTrack>,

    /// Transition into the next scene; empty for a hard cut
    #[serde(default)]
    pub transition: String,

    /// IDs of visual effects applied to the scene
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<String>,
}
