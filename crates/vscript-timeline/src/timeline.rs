//! Timeline mutation engine.
//!
//! Every operation takes the current scene list and returns a new one; the
//! input is never modified. Indices that are out of range (typically stale
//! after a concurrent edit) turn the operation into a no-op that returns an
//! unchanged copy and logs a warning. Nothing here panics on bad input.

use std::collections::HashSet;

use tracing::{debug, info, warn};
use vscript_models::{keyword_key, synthesize, KeywordBinding, Scene, SceneAssets, SceneId};

use crate::effects::EffectEntry;
use crate::keywords::{prune_orphaned_bindings, sanitize_keywords};
use crate::patch::ScenePatch;

/// Index of the scene with `id`.
pub fn position_of(scenes: &[Scene], id: &SceneId) -> Option<usize> {
    scenes.iter().position(|scene| &scene.id == id)
}

/// Insert `scene` after `index`; `-1` prepends.
pub fn insert_scene_after(scenes: &[Scene], index: isize, scene: Scene) -> Vec<Scene> {
    let len = scenes.len() as isize;
    if index < -1 || index >= len {
        warn!(index, len, "Insert position out of range, ignoring");
        return scenes.to_vec();
    }

    let at = (index + 1) as usize;
    debug!(scene_id = %scene.id, at, "Inserting scene");
    let mut next = scenes.to_vec();
    next.insert(at, scene);
    next
}

/// Insert an empty template scene after `index`; `-1` prepends.
pub fn insert_after(scenes: &[Scene], index: isize) -> Vec<Scene> {
    insert_scene_after(scenes, index, Scene::placeholder())
}

/// Remove the scene at `index`. Neighbors are untouched.
pub fn delete(scenes: &[Scene], index: usize) -> Vec<Scene> {
    if index >= scenes.len() {
        warn!(index, len = scenes.len(), "Delete index out of range, ignoring");
        return scenes.to_vec();
    }

    let mut next = scenes.to_vec();
    let removed = next.remove(index);
    debug!(scene_id = %removed.id, index, "Deleted scene");
    next
}

/// Move the scene at `from` to `to`.
///
/// `to = None` is a cancelled drag. Equal or out-of-range indices leave the
/// order unchanged.
pub fn reorder(scenes: &[Scene], from: usize, to: Option<usize>) -> Vec<Scene> {
    let Some(to) = to else {
        debug!(from, "Reorder cancelled");
        return scenes.to_vec();
    };
    if from >= scenes.len() || to >= scenes.len() {
        warn!(from, to, len = scenes.len(), "Reorder index out of range, ignoring");
        return scenes.to_vec();
    }
    if from == to {
        return scenes.to_vec();
    }

    let mut next = scenes.to_vec();
    let moved = next.remove(from);
    debug!(scene_id = %moved.id, from, to, "Reordered scene");
    next.insert(to, moved);
    next
}

/// Replace the scene at `index` with `f(scene)`.
pub fn map_scene(scenes: &[Scene], index: usize, f: impl FnOnce(&Scene) -> Scene) -> Vec<Scene> {
    let Some(current) = scenes.get(index) else {
        warn!(index, len = scenes.len(), "Scene index out of range, ignoring");
        return scenes.to_vec();
    };

    let updated = f(current);
    let mut next = scenes.to_vec();
    next[index] = updated;
    next
}

/// Shallow-merge `patch` into the scene at `index`.
///
/// The duration is never recomputed here; see
/// [`ScenePatch::narration_with_estimate`].
pub fn update_field(scenes: &[Scene], index: usize, patch: ScenePatch) -> Vec<Scene> {
    map_scene(scenes, index, |scene| {
        let mut next = scene.clone();
        patch.apply_to(&mut next);
        next
    })
}

/// Byte offset at which to split `text`, given a character offset.
///
/// An offset inside a word moves back to the start of that word.
fn split_point(text: &str, char_offset: usize) -> Option<usize> {
    let byte = text
        .char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len());
    let head = &text[..byte];

    let inside_word = text[byte..].starts_with(|c: char| !c.is_whitespace())
        && head.ends_with(|c: char| !c.is_whitespace());
    if !inside_word {
        return Some(byte);
    }

    head.rfind(char::is_whitespace)
        .map(|ws| ws + head[ws..].chars().next().map_or(1, char::len_utf8))
}

/// Split the scene at `index` into two at a character offset of its narration.
///
/// The first half keeps the scene ID. Keywords that occur only in the second
/// half move to the new scene together with their bindings and the media those
/// bindings reference; media still bound in the first half stays there as
/// well. Both halves get a synthesized duration. The new scene inherits the
/// effects (under fresh entry IDs) and scene settings.
pub fn split(scenes: &[Scene], index: usize, char_offset: usize) -> Vec<Scene> {
    let Some(scene) = scenes.get(index) else {
        warn!(index, len = scenes.len(), "Split index out of range, ignoring");
        return scenes.to_vec();
    };

    let Some(at) = split_point(&scene.narration, char_offset) else {
        debug!(scene_id = %scene.id, char_offset, "Split point inside first word, ignoring");
        return scenes.to_vec();
    };
    let first_text = scene.narration[..at].trim_end();
    let second_text = scene.narration[at..].trim_start();
    if first_text.is_empty() || second_text.is_empty() {
        debug!(scene_id = %scene.id, char_offset, "Split would leave an empty half, ignoring");
        return scenes.to_vec();
    }

    let first_key = keyword_key(first_text);
    let second_key = keyword_key(second_text);
    let moves = |keyword: &str| {
        let key = keyword_key(keyword);
        !first_key.contains(&key) && second_key.contains(&key)
    };

    let (moved_keywords, kept_keywords): (Vec<String>, Vec<String>) = scene
        .highlighted_keywords
        .iter()
        .cloned()
        .partition(|keyword| moves(keyword.as_str()));
    let binding_moves = |binding: &KeywordBinding| {
        moved_keywords
            .iter()
            .any(|keyword| binding.belongs_to(keyword))
    };
    let (moved_bindings, kept_bindings): (Vec<KeywordBinding>, Vec<KeywordBinding>) = scene
        .keywords_selected
        .iter()
        .cloned()
        .partition(|binding| binding_moves(binding));

    let kept_urls: HashSet<&str> = kept_bindings.iter().flat_map(KeywordBinding::urls).collect();
    let moved_urls: HashSet<&str> = moved_bindings.iter().flat_map(KeywordBinding::urls).collect();
    let leaving: HashSet<&str> = moved_urls
        .iter()
        .copied()
        .filter(|url| !kept_urls.contains(url))
        .collect();

    let second_assets = assets_subset(&scene.assets, &moved_urls);
    let mut first_assets = scene.assets.clone();
    first_assets.remove_urls(&leaving);
    first_assets.normalize();

    let (first_duration, first_seconds) = synthesize(first_text);
    let (second_duration, second_seconds) = synthesize(second_text);

    let second = Scene {
        id: SceneId::new(),
        narration: second_text.to_string(),
        duration: second_duration,
        duration_in_seconds: second_seconds,
        highlighted_keywords: moved_keywords,
        keywords_selected: moved_bindings,
        assets: second_assets,
        video_effects: scene.video_effects.as_ref().map(|effects| {
            let mut effects = effects.clone();
            refresh_ids(&mut effects.clips);
            refresh_ids(&mut effects.logos);
            refresh_ids(&mut effects.background_music);
            effects
        }),
        scene_settings: scene.scene_settings.clone(),
    };

    let first = Scene {
        id: scene.id.clone(),
        narration: first_text.to_string(),
        duration: first_duration,
        duration_in_seconds: first_seconds,
        highlighted_keywords: kept_keywords,
        keywords_selected: kept_bindings,
        assets: first_assets,
        video_effects: scene.video_effects.clone(),
        scene_settings: scene.scene_settings.clone(),
    };

    info!(
        scene_id = %first.id,
        new_scene_id = %second.id,
        index,
        "Split scene"
    );

    let mut next = scenes.to_vec();
    next[index] = first;
    next.insert(index + 1, second);
    next
}

fn refresh_ids<E: EffectEntry>(entries: &mut [E]) {
    for entry in entries {
        entry.set_id(vscript_models::effects::new_effect_id());
    }
}

/// Copy of `assets` restricted to `urls`, origin tags included.
fn assets_subset(assets: &SceneAssets, urls: &HashSet<&str>) -> SceneAssets {
    let pick = |list: &Option<Vec<String>>| {
        list.as_ref().map(|items| {
            items
                .iter()
                .filter(|url| urls.contains(url.as_str()))
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    let mut subset = SceneAssets {
        images: pick(&assets.images),
        clips: assets.clips.as_ref().map(|clips| {
            clips
                .iter()
                .filter(|clip| urls.contains(clip.url.as_str()))
                .cloned()
                .collect()
        }),
        images_google: pick(&assets.images_google),
        images_envato: pick(&assets.images_envato),
        origins: assets
            .origins
            .iter()
            .filter(|(url, _)| urls.contains(url.as_str()))
            .map(|(url, origin)| (url.clone(), *origin))
            .collect(),
    };
    subset.normalize();
    subset
}

/// Accept a whole generated timeline, bringing it in line with the model
/// invariants.
///
/// Duplicate or missing IDs are replaced, empty asset lists become `null`,
/// and conflicting keywords are dropped (first one wins). Bindings of
/// dropped keywords go with them, as does media nothing else references.
pub fn replace_all(scenes: Vec<Scene>) -> Vec<Scene> {
    let mut seen: HashSet<SceneId> = HashSet::with_capacity(scenes.len());

    let normalized: Vec<Scene> = scenes
        .into_iter()
        .map(|mut scene| {
            if scene.id.as_str().trim().is_empty() || seen.contains(&scene.id) {
                let fresh = SceneId::new();
                warn!(old_id = %scene.id, new_id = %fresh, "Replacing duplicate scene id");
                scene.id = fresh;
            }
            seen.insert(scene.id.clone());

            let (accepted, rejected) = sanitize_keywords(&scene.highlighted_keywords);
            for (keyword, conflict) in &rejected {
                warn!(
                    scene_id = %scene.id,
                    keyword = %keyword,
                    reason = conflict.as_str(),
                    "Dropping conflicting keyword"
                );
            }
            scene.highlighted_keywords = accepted;
            prune_orphaned_bindings(&mut scene);
            scene.assets.normalize();
            scene
        })
        .collect();

    info!(scenes = normalized.len(), "Replaced timeline");
    normalized
}
