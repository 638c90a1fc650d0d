//! Effective effect settings for rendering.

use vscript_models::{BackgroundMedia, LogoRef, MusicTrack, ProjectSettings, Scene};

/// Resolved settings for one scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveSettings {
    pub logos: Vec<LogoRef>,
    pub transition: Option<String>,
    pub background_music: Vec<MusicTrack>,
    pub background: Option<BackgroundMedia>,
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

/// Resolve the effective settings of a scene.
///
/// Per category, the first non-empty value wins: the scene's `videoEffects`,
/// then its `sceneSettings` override, then the project default. Entries whose
/// media is still unresolved do not count as a value. Neither input is
/// modified.
pub fn resolve_effective(scene: &Scene, project: &ProjectSettings) -> EffectiveSettings {
    let effects = scene.video_effects.as_ref();
    let overrides = scene.scene_settings.as_ref();

    let logos: Vec<LogoRef> = effects
        .map(|e| e.logos.iter().filter(|logo| !logo.url.is_empty()).cloned().collect())
        .unwrap_or_default();
    let logos = if logos.is_empty() {
        let resolved = |logo: &&LogoRef| !logo.url.is_empty();
        overrides
            .and_then(|s| s.logo.as_ref())
            .filter(resolved)
            .or(project.logo.as_ref().filter(resolved))
            .into_iter()
            .cloned()
            .collect()
    } else {
        logos
    };

    let transition = non_empty(effects.map(|e| &e.transition))
        .or_else(|| non_empty(overrides.and_then(|s| s.transition.as_ref())))
        .or_else(|| non_empty(project.transition.as_ref()));

    let music: Vec<MusicTrack> = effects
        .map(|e| {
            e.background_music
                .iter()
                .filter(|track| !track.selected_music.is_empty())
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    let background_music = if music.is_empty() {
        let chosen = |track: &&MusicTrack| !track.selected_music.is_empty();
        overrides
            .and_then(|s| s.background_music.as_ref())
            .filter(chosen)
            .or(project.background_music.as_ref().filter(chosen))
            .into_iter()
            .cloned()
            .collect()
    } else {
        music
    };

    let background = overrides
        .and_then(|s| s.background.as_ref())
        .filter(|bg| !bg.url.is_empty())
        .or(project.background.as_ref().filter(|bg| !bg.url.is_empty()))
        .cloned();

    EffectiveSettings {
        logos,
        transition,
        background_music,
        background,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vscript_models::{LogoPosition, SceneSettings, VideoEffects};

    fn project() -> ProjectSettings {
        ProjectSettings::default()
            .with_logo(LogoRef::new("project", "https://cdn/p.png", LogoPosition::TopLeft))
            .with_transition("crossfade")
            .with_background_music(MusicTrack::new("https://cdn/theme.mp3"))
            .with_background(BackgroundMedia::video("https://cdn/bg.mp4"))
    }

    #[test]
    fn test_falls_back_to_project() {
        let scene = Scene::new("");
        let effective = resolve_effective(&scene, &project());
        assert_eq!(effective.logos[0].name, "project");
        assert_eq!(effective.transition.as_deref(), Some("crossfade"));
        assert_eq!(effective.background_music[0].selected_music, "https://cdn/theme.mp3");
        assert_eq!(effective.background, Some(BackgroundMedia::video("https://cdn/bg.mp4")));
    }

    #[test]
    fn test_scene_values_win() {
        let effects = VideoEffects {
            transition: "wipe".into(),
            logos: vec![LogoRef::new("scene", "https://cdn/s.png", LogoPosition::Center)],
            ..Default::default()
        };
        let scene = Scene::new("")
            .with_effects(effects)
            .with_settings(SceneSettings::default().with_background(BackgroundMedia::image("https://cdn/i.jpg")));

        let effective = resolve_effective(&scene, &project());
        assert_eq!(effective.transition.as_deref(), Some("wipe"));
        assert_eq!(effective.logos.len(), 1);
        assert_eq!(effective.logos[0].name, "scene");
        assert_eq!(effective.background, Some(BackgroundMedia::image("https://cdn/i.jpg")));
        // No scene music: project default applies
        assert_eq!(effective.background_music.len(), 1);
    }

    #[test]
    fn test_unresolved_and_blank_values_fall_through() {
        let effects = VideoEffects {
            transition: "  ".into(),
            logos: vec![LogoRef::placeholder()],
            background_music: vec![MusicTrack::placeholder()],
            ..Default::default()
        };
        let scene = Scene::new("")
            .with_effects(effects)
            .with_settings(SceneSettings::default().with_transition("slide"));

        let effective = resolve_effective(&scene, &project());
        assert_eq!(effective.transition.as_deref(), Some("slide"));
        assert_eq!(effective.logos[0].name, "project");
        assert_eq!(effective.background_music[0].selected_music, "https://cdn/theme.mp3");
    }

    #[test]
    fn test_resolution_does_not_mutate_inputs() {
        let scene = Scene::new("narration");
        let project = project();
        let (scene_before, project_before) = (scene.clone(), project.clone());
        let _ = resolve_effective(&scene, &project);
        assert_eq!(scene, scene_before);
        assert_eq!(project, project_before);
    }

    #[test]
    fn test_empty_everywhere() {
        let effective = resolve_effective(&Scene::new(""), &ProjectSettings::default());
        assert_eq!(effective, EffectiveSettings::default());
    }
}
