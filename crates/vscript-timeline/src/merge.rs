//! Merging asynchronous results back into the timeline.
//!
//! A media search or narration request may finish after the timeline has
//! been edited. Results are therefore addressed by scene ID; the index the
//! request started from is only a hint and is checked before use. A result
//! for a scene that no longer exists is dropped.

use tracing::{debug, warn};
use vscript_models::{keyword_key, Scene, SceneId};

use crate::keywords::bind_media_to_keyword;
use crate::patch::ScenePatch;
use crate::timeline::{map_scene, position_of};

/// Current index of the scene with `id`, trying `hint` first.
pub fn resolve_index(scenes: &[Scene], id: &SceneId, hint: Option<usize>) -> Option<usize> {
    if let Some(index) = hint {
        if scenes.get(index).is_some_and(|scene| &scene.id == id) {
            return Some(index);
        }
        debug!(scene_id = %id, hint = index, "Index hint is stale, searching by id");
    }
    position_of(scenes, id)
}

/// Apply `f` to the scene with `id`. Returns an unchanged copy if the scene
/// is gone.
pub fn map_by_id(
    scenes: &[Scene],
    id: &SceneId,
    hint: Option<usize>,
    f: impl FnOnce(&Scene) -> Scene,
) -> Vec<Scene> {
    match resolve_index(scenes, id, hint) {
        Some(index) => map_scene(scenes, index, f),
        None => {
            warn!(scene_id = %id, "Scene no longer in timeline, dropping result");
            scenes.to_vec()
        }
    }
}

/// Shallow-merge `patch` into the scene with `id`.
pub fn update_by_id(
    scenes: &[Scene],
    id: &SceneId,
    hint: Option<usize>,
    patch: ScenePatch,
) -> Vec<Scene> {
    map_by_id(scenes, id, hint, |scene| {
        let mut next = scene.clone();
        patch.apply_to(&mut next);
        next
    })
}

/// Bind search results to a keyword of the scene with `id`.
///
/// Dropped if the keyword was un-highlighted while the search was running.
pub fn bind_media_by_id<S: AsRef<str>>(
    scenes: &[Scene],
    id: &SceneId,
    hint: Option<usize>,
    keyword: &str,
    urls: &[S],
) -> Vec<Scene> {
    let key = keyword_key(keyword);
    map_by_id(scenes, id, hint, |scene| {
        let still_highlighted = scene
            .highlighted_keywords
            .iter()
            .any(|existing| keyword_key(existing) == key);
        if !still_highlighted {
            warn!(scene_id = %scene.id, keyword = %keyword, "Keyword removed before results arrived, dropping");
            return scene.clone();
        }
        bind_media_to_keyword(scene, keyword, urls)
    })
}

/// Use a chosen narration variation for the scene with `id`.
///
/// The duration is re-estimated from the new narration.
pub fn apply_narration_variation(
    scenes: &[Scene],
    id: &SceneId,
    hint: Option<usize>,
    narration: &str,
) -> Vec<Scene> {
    update_by_id(scenes, id, hint, ScenePatch::narration_with_estimate(narration))
}
