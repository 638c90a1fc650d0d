//! External collaborators consumed by the timeline.
//!
//! The engine never talks to a backend itself. Callers supply
//! implementations of these traits; the helpers below run one request and
//! merge the result by scene ID. A failed request is returned as an error and
//! nothing is merged, so the caller's last known-good timeline stays
//! authoritative.

use async_trait::async_trait;
use tracing::{info, warn};
use vscript_models::{Scene, SceneId};

use crate::error::{ServiceError, ServiceResult};
use crate::merge::{bind_media_by_id, resolve_index};

/// Image search backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaSearch: Send + Sync {
    /// Candidate media URLs for a narration, optionally steered by keywords.
    async fn search(&self, narration: &str, keyword_hints: &[String]) -> ServiceResult<Vec<String>>;
}

/// Narration rewriting backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NarrationVariations: Send + Sync {
    /// Up to `count` alternative phrasings of `narration`.
    async fn variations(&self, narration: &str, count: usize) -> ServiceResult<Vec<String>>;
}

/// Search media for `keyword` in the scene with `id` and bind the results.
///
/// The search is steered by the keyword's edited search term when its
/// current binding has one.
///
/// `scenes` should be the timeline as it is when the response arrives; the
/// scene is located by ID so intervening inserts and reorders are harmless.
pub async fn fetch_and_bind_media<S>(
    search: &S,
    scenes: &[Scene],
    id: &SceneId,
    hint: Option<usize>,
    keyword: &str,
) -> ServiceResult<Vec<Scene>>
where
    S: MediaSearch + ?Sized,
{
    let index = resolve_index(scenes, id, hint)
        .ok_or_else(|| ServiceError::StaleScene(id.to_string()))?;
    let scene = &scenes[index];
    let term = scene
        .keywords_selected
        .iter()
        .find(|binding| binding.belongs_to(keyword))
        .map_or(keyword, |binding| binding.search_term())
        .to_string();

    let urls = search
        .search(&scene.narration, &[term])
        .await
        .inspect_err(|e| warn!(scene_id = %id, keyword = %keyword, error = %e, "Media search failed"))?;

    let urls: Vec<String> = urls.into_iter().filter(|url| !url.trim().is_empty()).collect();
    if urls.is_empty() {
        return Err(ServiceError::Empty);
    }

    info!(scene_id = %id, keyword = %keyword, results = urls.len(), "Media search completed");
    Ok(bind_media_by_id(scenes, id, Some(index), keyword, &urls))
}

/// Request narration variations for the scene with `id`.
///
/// Blank and duplicate suggestions, and suggestions equal to the current
/// narration, are removed. Apply the chosen one with
/// [`crate::merge::apply_narration_variation`].
pub async fn fetch_narration_variations<N>(
    service: &N,
    scenes: &[Scene],
    id: &SceneId,
    hint: Option<usize>,
    count: usize,
) -> ServiceResult<Vec<String>>
where
    N: NarrationVariations + ?Sized,
{
    let index = resolve_index(scenes, id, hint)
        .ok_or_else(|| ServiceError::StaleScene(id.to_string()))?;
    let current = scenes[index].narration.trim().to_string();

    let raw = service
        .variations(&current, count)
        .await
        .inspect_err(|e| warn!(scene_id = %id, error = %e, "Narration variation request failed"))?;

    let mut variations: Vec<String> = Vec::with_capacity(raw.len());
    for text in raw {
        let text = text.trim().to_string();
        if text.is_empty() || text == current || variations.contains(&text) {
            continue;
        }
        variations.push(text);
    }
    variations.truncate(count);

    if variations.is_empty() {
        return Err(ServiceError::Empty);
    }
    Ok(variations)
}
