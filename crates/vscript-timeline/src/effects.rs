//! Effects composer.
//!
//! Clip, logo and music lists share one set of add/update/remove primitives
//! through [`EffectEntry`]. Each operation touches only its own list; the
//! other lists and the transition are left as they were.

use tracing::{debug, warn};
use vscript_models::effects::{clamp_volume, new_effect_id};
use vscript_models::{ClipRef, LogoPosition, LogoRef, MusicTrack, Scene, VideoEffects};

/// An entry in one of the `videoEffects` lists.
pub trait EffectEntry: Clone {
    /// List name used in logs.
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// The media this entry points at; empty while unresolved.
    fn source(&self) -> &str;

    /// New unresolved entry with a fresh ID and default settings.
    fn placeholder() -> Self;

    fn list(effects: &VideoEffects) -> &Vec<Self>;

    fn list_mut(effects: &mut VideoEffects) -> &mut Vec<Self>;
}

impl EffectEntry for ClipRef {
    const KIND: &'static str = "clip";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn source(&self) -> &str {
        &self.url
    }

    fn placeholder() -> Self {
        ClipRef::placeholder()
    }

    fn list(effects: &VideoEffects) -> &Vec<Self> {
        &effects.clips
    }

    fn list_mut(effects: &mut VideoEffects) -> &mut Vec<Self> {
        &mut effects.clips
    }
}

impl EffectEntry for LogoRef {
    const KIND: &'static str = "logo";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn source(&self) -> &str {
        &self.url
    }

    fn placeholder() -> Self {
        LogoRef::placeholder()
    }

    fn list(effects: &VideoEffects) -> &Vec<Self> {
        &effects.logos
    }

    fn list_mut(effects: &mut VideoEffects) -> &mut Vec<Self> {
        &mut effects.logos
    }
}

impl EffectEntry for MusicTrack {
    const KIND: &'static str = "music";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn source(&self) -> &str {
        &self.selected_music
    }

    fn placeholder() -> Self {
        MusicTrack::placeholder()
    }

    fn list(effects: &VideoEffects) -> &Vec<Self> {
        &effects.background_music
    }

    fn list_mut(effects: &mut VideoEffects) -> &mut Vec<Self> {
        &mut effects.background_music
    }
}

/// True if an entry in the list is still waiting for its media.
pub fn has_unresolved<E: EffectEntry>(scene: &Scene) -> bool {
    scene
        .video_effects
        .as_ref()
        .is_some_and(|effects| E::list(effects).iter().any(|entry| entry.source().is_empty()))
}

/// Append a placeholder entry.
///
/// Returns the new entry's ID, or `None` (scene unchanged) while an existing
/// entry in the same list is unresolved.
pub fn add_entry<E: EffectEntry>(scene: &Scene) -> (Scene, Option<String>) {
    if has_unresolved::<E>(scene) {
        debug!(scene_id = %scene.id, kind = E::KIND, "Add blocked by unresolved entry");
        return (scene.clone(), None);
    }

    let entry = E::placeholder();
    let id = entry.id().to_string();
    let mut next = scene.clone();
    E::list_mut(next.effects_mut()).push(entry);
    (next, Some(id))
}

/// Append a copy of `entry` under a fresh ID, regardless of unresolved entries.
pub fn append_entry<E: EffectEntry>(scene: &Scene, entry: &E) -> (Scene, String) {
    let mut copy = entry.clone();
    let id = new_effect_id();
    copy.set_id(id.clone());

    let mut next = scene.clone();
    E::list_mut(next.effects_mut()).push(copy);
    (next, id)
}

/// Apply `f` to the entry with `id`. No-op if the ID is unknown.
pub fn update_entry<E: EffectEntry>(scene: &Scene, id: &str, f: impl FnOnce(&mut E)) -> Scene {
    let mut next = scene.clone();
    let entry = next
        .video_effects
        .as_mut()
        .and_then(|effects| E::list_mut(effects).iter_mut().find(|entry| entry.id() == id));

    match entry {
        Some(entry) => {
            f(entry);
            // The patch may not change the ID.
            entry.set_id(id.to_string());
        }
        None => {
            warn!(scene_id = %scene.id, kind = E::KIND, entry_id = %id, "Update of unknown entry ignored");
        }
    }
    next
}

/// Remove the entry with `id`. No-op if the ID is unknown.
pub fn remove_entry<E: EffectEntry>(scene: &Scene, id: &str) -> Scene {
    let mut next = scene.clone();
    if let Some(effects) = next.video_effects.as_mut() {
        E::list_mut(effects).retain(|entry| entry.id() != id);
    }
    next
}

/// Fields to overwrite on a clip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipPatch {
    pub name: Option<String>,
    pub url: Option<String>,
    pub duration: Option<f64>,
    pub drive_background_id: Option<String>,
}

impl ClipPatch {
    pub fn apply_to(self, clip: &mut ClipRef) {
        if let Some(name) = self.name {
            clip.name = name;
        }
        if let Some(url) = self.url {
            clip.url = url;
        }
        if let Some(duration) = self.duration {
            clip.duration = duration.max(0.0);
        }
        if let Some(drive_id) = self.drive_background_id {
            clip.drive_background_id = Some(drive_id);
        }
    }
}

/// Fields to overwrite on a logo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogoPatch {
    pub name: Option<String>,
    pub url: Option<String>,
    pub position: Option<LogoPosition>,
}

impl LogoPatch {
    pub fn apply_to(self, logo: &mut LogoRef) {
        if let Some(name) = self.name {
            logo.name = name;
        }
        if let Some(url) = self.url {
            logo.url = url;
        }
        if let Some(position) = self.position {
            logo.position = position;
        }
    }
}

/// Fields to overwrite on a music track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MusicPatch {
    pub selected_music: Option<String>,
    pub volume: Option<f64>,
    pub auto_adjust: Option<bool>,
    pub fade_in: Option<bool>,
    pub fade_out: Option<bool>,
}

impl MusicPatch {
    pub fn apply_to(self, track: &mut MusicTrack) {
        if let Some(selected) = self.selected_music {
            track.selected_music = selected;
        }
        if let Some(volume) = self.volume {
            track.volume = clamp_volume(volume);
        }
        if let Some(auto_adjust) = self.auto_adjust {
            track.auto_adjust = auto_adjust;
        }
        if let Some(fade_in) = self.fade_in {
            track.fade_in = fade_in;
        }
        if let Some(fade_out) = self.fade_out {
            track.fade_out = fade_out;
        }
    }
}

pub fn add_clip(scene: &Scene) -> (Scene, Option<String>) {
    add_entry::<ClipRef>(scene)
}

pub fn add_logo(scene: &Scene) -> (Scene, Option<String>) {
    add_entry::<LogoRef>(scene)
}

pub fn add_music_track(scene: &Scene) -> (Scene, Option<String>) {
    add_entry::<MusicTrack>(scene)
}

pub fn update_clip(scene: &Scene, id: &str, patch: ClipPatch) -> Scene {
    update_entry::<ClipRef>(scene, id, |clip| patch.apply_to(clip))
}

pub fn update_logo(scene: &Scene, id: &str, patch: LogoPatch) -> Scene {
    update_entry::<LogoRef>(scene, id, |logo| patch.apply_to(logo))
}

pub fn update_music_track(scene: &Scene, id: &str, patch: MusicPatch) -> Scene {
    update_entry::<MusicTrack>(scene, id, |track| patch.apply_to(track))
}

pub fn remove_clip(scene: &Scene, id: &str) -> Scene {
    remove_entry::<ClipRef>(scene, id)
}

pub fn remove_logo(scene: &Scene, id: &str) -> Scene {
    remove_entry::<LogoRef>(scene, id)
}

pub fn remove_music_track(scene: &Scene, id: &str) -> Scene {
    remove_entry::<MusicTrack>(scene, id)
}

/// Set the transition into the next scene.
pub fn set_transition(scene: &Scene, transition: &str) -> Scene {
    let mut next = scene.clone();
    next.effects_mut().transition = transition.to_string();
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_initializes_effects() {
        let scene = Scene::new("");
        let (scene, id) = add_clip(&scene);
        let effects = scene.video_effects.as_ref().unwrap();
        assert_eq!(effects.clips.len(), 1);
        assert_eq!(effects.clips[0].id, id.unwrap());
        assert!(effects.clips[0].url.is_empty());
    }

    #[test]
    fn test_add_blocked_while_unresolved() {
        let (scene, first) = add_logo(&Scene::new(""));
        let (blocked, second) = add_logo(&scene);
        assert!(second.is_none());
        assert_eq!(blocked, scene);

        let scene = update_logo(
            &scene,
            &first.unwrap(),
            LogoPatch {
                url: Some("https://cdn/logo.png".into()),
                ..Default::default()
            },
        );
        let (scene, third) = add_logo(&scene);
        assert!(third.is_some());
        assert_eq!(scene.video_effects.unwrap().logos.len(), 2);
    }

    #[test]
    fn test_block_is_per_list() {
        let (scene, _) = add_clip(&Scene::new(""));
        let (scene, logo) = add_logo(&scene);
        assert!(logo.is_some());
        let (_, music) = add_music_track(&scene);
        assert!(music.is_some());
    }

    #[test]
    fn test_music_defaults_and_volume_clamp() {
        let (scene, id) = add_music_track(&Scene::new(""));
        let id = id.unwrap();
        let track = &scene.video_effects.as_ref().unwrap().background_music[0];
        assert_eq!(track.volume, 0.3);
        assert!(track.auto_adjust && track.fade_in && track.fade_out);

        let scene = update_music_track(
            &scene,
            &id,
            MusicPatch {
                volume: Some(1.8),
                fade_out: Some(false),
                ..Default::default()
            },
        );
        let track = &scene.video_effects.as_ref().unwrap().background_music[0];
        assert_eq!(track.volume, 1.0);
        assert!(!track.fade_out);
        assert!(track.fade_in);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (scene, _) = add_clip(&Scene::new(""));
        let updated = update_clip(
            &scene,
            "missing",
            ClipPatch {
                url: Some("x".into()),
                ..Default::default()
            },
        );
        assert_eq!(updated, scene);

        let bare = Scene::new("");
        assert_eq!(update_logo(&bare, "missing", LogoPatch::default()), bare);
    }

    #[test]
    fn test_remove_leaves_other_lists() {
        let (scene, clip) = add_clip(&Scene::new(""));
        let scene = set_transition(&scene, "fade");
        let (scene, _) = add_logo(&scene);

        let scene = remove_clip(&scene, &clip.unwrap());
        let effects = scene.video_effects.unwrap();
        assert!(effects.clips.is_empty());
        assert_eq!(effects.logos.len(), 1);
        assert_eq!(effects.transition, "fade");
    }

    #[test]
    fn test_append_entry_ignores_block() {
        let (scene, _) = add_logo(&Scene::new(""));
        let logo = LogoRef::new("brand", "https://cdn/b.png", LogoPosition::Center);
        let (scene, id) = append_entry(&scene, &logo);
        let logos = &scene.video_effects.as_ref().unwrap().logos;
        assert_eq!(logos.len(), 2);
        assert_eq!(logos[1].id, id);
        assert_ne!(logos[1].id, logo.id);
    }
}
