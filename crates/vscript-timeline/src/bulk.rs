//! Bulk apply engine.
//!
//! Fans one effect change out to every scene using the same per-scene
//! primitives as the effects composer. Per-scene side effects such as
//! re-rendering previews are left to the caller.

use tracing::info;
use vscript_models::{LogoRef, MusicTrack, Scene};

use crate::effects::{append_entry, set_transition};

/// A change to apply to every scene.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkChange {
    /// Overwrite the transition.
    Transition(String),
    /// Union effect IDs into each scene's effect list.
    Effect(Vec<String>),
    /// Append a copy of the logo (fresh ID per scene).
    Logo(LogoRef),
    /// Append a copy of the music track (fresh ID per scene).
    Music(MusicTrack),
}

impl BulkChange {
    pub fn kind(&self) -> &'static str {
        match self {
            BulkChange::Transition(_) => "transition",
            BulkChange::Effect(_) => "effect",
            BulkChange::Logo(_) => "logo",
            BulkChange::Music(_) => "music",
        }
    }
}

fn union_effects(scene: &Scene, ids: &[String]) -> Scene {
    let mut next = scene.clone();
    let effects = &mut next.effects_mut().effects;
    for id in ids {
        if !id.is_empty() && !effects.contains(id) {
            effects.push(id.clone());
        }
    }
    next
}

/// Apply `change` to every scene.
///
/// Scenes without `videoEffects` get an empty one first. Existing logos and
/// music tracks are never replaced.
pub fn apply_to_all(scenes: &[Scene], change: &BulkChange) -> Vec<Scene> {
    let next: Vec<Scene> = scenes
        .iter()
        .map(|scene| match change {
            BulkChange::Transition(transition) => set_transition(scene, transition),
            BulkChange::Effect(ids) => union_effects(scene, ids),
            BulkChange::Logo(logo) => append_entry(scene, logo).0,
            BulkChange::Music(track) => append_entry(scene, track).0,
        })
        .collect();

    info!(kind = change.kind(), scenes = next.len(), "Applied change to all scenes");
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use vscript_models::{LogoPosition, VideoEffects};

    fn logo(name: &str) -> LogoRef {
        LogoRef::new(name, format!("https://cdn/{}.png", name), LogoPosition::BottomRight)
    }

    #[test]
    fn test_transition_overwrites_and_initializes() {
        let scenes = vec![
            Scene::new("a"),
            Scene::new("b").with_effects(VideoEffects {
                transition: "cut".into(),
                logos: vec![logo("keep")],
                ..Default::default()
            }),
        ];

        let next = apply_to_all(&scenes, &BulkChange::Transition("fade".into()));
        for scene in &next {
            assert_eq!(scene.video_effects.as_ref().unwrap().transition, "fade");
        }
        assert_eq!(next[1].video_effects.as_ref().unwrap().logos.len(), 1);
    }

    #[test]
    fn test_logo_appends() {
        let scene = Scene::new("a").with_effects(VideoEffects {
            logos: vec![logo("one"), logo("two")],
            ..Default::default()
        });

        let next = apply_to_all(&[scene, Scene::new("b")], &BulkChange::Logo(logo("brand")));
        let logos = &next[0].video_effects.as_ref().unwrap().logos;
        assert_eq!(logos.len(), 3);
        assert_eq!(logos[2].name, "brand");
        assert_eq!(next[1].video_effects.as_ref().unwrap().logos.len(), 1);
    }

    #[test]
    fn test_copies_get_distinct_ids() {
        let track = MusicTrack::new("https://cdn/theme.mp3");
        let next = apply_to_all(&[Scene::new("a"), Scene::new("b")], &BulkChange::Music(track.clone()));

        let first = &next[0].video_effects.as_ref().unwrap().background_music[0];
        let second = &next[1].video_effects.as_ref().unwrap().background_music[0];
        assert_ne!(first.id, second.id);
        assert_ne!(first.id, track.id);
        assert_eq!(first.selected_music, track.selected_music);
    }

    #[test]
    fn test_effect_union() {
        let scenes = vec![Scene::new("a")];
        let once = apply_to_all(&scenes, &BulkChange::Effect(vec!["zoom".into(), "grain".into()]));
        let twice = apply_to_all(&once, &BulkChange::Effect(vec!["grain".into(), "blur".into()]));

        assert_eq!(
            twice[0].video_effects.as_ref().unwrap().effects,
            vec!["zoom", "grain", "blur"]
        );
    }

    #[test]
    fn test_empty_timeline() {
        assert!(apply_to_all(&[], &BulkChange::Transition("fade".into())).is_empty());
    }
}
