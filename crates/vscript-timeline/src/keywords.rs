//! Keyword–media binder.
//!
//! Keeps a scene's highlighted keywords free of duplicates and overlaps,
//! and keeps `assets` in step with the media bound to those keywords.
//! Removing a keyword drops every URL that no remaining keyword still
//! references.

use std::collections::HashSet;

use tracing::debug;
use vscript_models::{
    keyword_key, normalize_keyword, AssetOrigin, ClipAsset, KeywordBinding, Scene,
};

use crate::error::KeywordConflict;

/// An image URL with an explicit origin tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedMedia {
    pub url: String,
    pub origin: AssetOrigin,
}

impl TaggedMedia {
    pub fn new(url: impl Into<String>, origin: AssetOrigin) -> Self {
        Self {
            url: url.into(),
            origin,
        }
    }
}

/// Classify `candidate` against the current keyword set.
///
/// Returns the normalized keyword when it can be added. Exact duplicates are
/// reported before containment so that `"pakistan"` next to `"Pakistan"`
/// reads as a duplicate rather than an overlap.
pub fn classify_keyword(existing: &[String], candidate: &str) -> Result<String, KeywordConflict> {
    let normalized = normalize_keyword(candidate);
    if normalized.is_empty() {
        return Err(KeywordConflict::Empty);
    }
    let key = normalized.to_lowercase();

    let keyed: Vec<(&String, String)> = existing
        .iter()
        .map(|keyword| (keyword, keyword_key(keyword)))
        .filter(|(_, existing_key)| !existing_key.is_empty())
        .collect();

    if let Some((keyword, _)) = keyed.iter().find(|(_, k)| *k == key) {
        return Err(KeywordConflict::ExactDuplicate {
            existing: (*keyword).clone(),
        });
    }
    if let Some((keyword, _)) = keyed.iter().find(|(_, k)| key.contains(k.as_str())) {
        return Err(KeywordConflict::ContainsExisting {
            existing: (*keyword).clone(),
        });
    }
    if let Some((keyword, _)) = keyed.iter().find(|(_, k)| k.contains(key.as_str())) {
        return Err(KeywordConflict::ContainedInExisting {
            existing: (*keyword).clone(),
        });
    }

    Ok(normalized)
}

/// Highlight a new keyword.
pub fn add_keyword(scene: &Scene, candidate: &str) -> Result<Scene, KeywordConflict> {
    let keyword = classify_keyword(&scene.highlighted_keywords, candidate).inspect_err(|conflict| {
        debug!(
            scene_id = %scene.id,
            candidate = %candidate,
            reason = conflict.as_str(),
            "Keyword rejected"
        );
    })?;

    let mut next = scene.clone();
    next.highlighted_keywords.push(keyword);
    Ok(next)
}

/// Keep the first of any conflicting keywords, in order.
///
/// Returns the accepted keywords and the rejected ones with their conflict.
pub fn sanitize_keywords(keywords: &[String]) -> (Vec<String>, Vec<(String, KeywordConflict)>) {
    let mut accepted: Vec<String> = Vec::with_capacity(keywords.len());
    let mut rejected = Vec::new();

    for keyword in keywords {
        match classify_keyword(&accepted, keyword) {
            Ok(normalized) => accepted.push(normalized),
            Err(conflict) => rejected.push((keyword.clone(), conflict)),
        }
    }

    (accepted, rejected)
}

/// URLs bound to `keyword`, in binding order.
pub fn bound_urls(scene: &Scene, keyword: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    scene
        .keywords_selected
        .iter()
        .filter(|binding| binding.belongs_to(keyword))
        .flat_map(KeywordBinding::urls)
        .filter(|url| seen.insert(*url))
        .map(str::to_string)
        .collect()
}

/// Remove a keyword with cascading cleanup of its media.
///
/// URLs still bound to another keyword stay attached.
pub fn remove_keyword(scene: &Scene, keyword: &str) -> Scene {
    let key = keyword_key(keyword);

    let (removed, kept): (Vec<&KeywordBinding>, Vec<&KeywordBinding>) = scene
        .keywords_selected
        .iter()
        .partition(|binding| binding.belongs_to(keyword));

    let still_bound: HashSet<&str> = kept.iter().copied().flat_map(KeywordBinding::urls).collect();
    let orphaned: HashSet<&str> = removed
        .iter()
        .copied()
        .flat_map(KeywordBinding::urls)
        .filter(|url| !still_bound.contains(url))
        .collect();

    let mut next = scene.clone();
    next.highlighted_keywords.retain(|existing| keyword_key(existing) != key);
    next.keywords_selected = kept.into_iter().cloned().collect();
    next.assets.remove_urls(&orphaned);
    next.assets.normalize();

    debug!(
        scene_id = %scene.id,
        keyword = %keyword,
        bindings_removed = removed.len(),
        urls_removed = orphaned.len(),
        "Removed keyword"
    );

    next
}

/// Drop bindings whose keyword is no longer highlighted, along with the
/// media only they referenced.
pub(crate) fn prune_orphaned_bindings(scene: &mut Scene) {
    let highlighted: HashSet<String> = scene
        .highlighted_keywords
        .iter()
        .map(|keyword| keyword_key(keyword))
        .collect();

    let (kept, removed): (Vec<KeywordBinding>, Vec<KeywordBinding>) = scene
        .keywords_selected
        .drain(..)
        .partition(|binding| highlighted.contains(&keyword_key(&binding.suggested_keyword)));
    if removed.is_empty() {
        scene.keywords_selected = kept;
        return;
    }

    let still_bound: HashSet<&str> = kept.iter().flat_map(KeywordBinding::urls).collect();
    let orphaned: HashSet<&str> = removed
        .iter()
        .flat_map(KeywordBinding::urls)
        .filter(|url| !still_bound.contains(url))
        .collect();
    scene.assets.remove_urls(&orphaned);

    debug!(
        scene_id = %scene.id,
        bindings_removed = removed.len(),
        urls_removed = orphaned.len(),
        "Pruned orphaned bindings"
    );

    scene.keywords_selected = kept;
}

/// Bind image URLs to a keyword.
///
/// URLs are appended to `assets.images` without duplicates and replace the
/// keyword's previous bindings. An existing text overlay or edited search
/// keyword carries over to the new bindings.
pub fn bind_media_to_keyword<S: AsRef<str>>(scene: &Scene, keyword: &str, urls: &[S]) -> Scene {
    let items = urls.iter().map(|url| (url.as_ref(), None));
    bind_images(scene, keyword, items)
}

/// Bind image URLs with explicit origin tags to a keyword.
pub fn bind_tagged_media(scene: &Scene, keyword: &str, media: &[TaggedMedia]) -> Scene {
    let items = media.iter().map(|m| (m.url.as_str(), Some(m.origin)));
    bind_images(scene, keyword, items)
}

fn bind_images<'a>(
    scene: &Scene,
    keyword: &str,
    items: impl Iterator<Item = (&'a str, Option<AssetOrigin>)>,
) -> Scene {
    let keyword = normalize_keyword(keyword);
    let mut next = scene.clone();

    let template = next
        .keywords_selected
        .iter()
        .find(|binding| binding.belongs_to(&keyword))
        .cloned();
    next.keywords_selected.retain(|binding| !binding.belongs_to(&keyword));

    let mut seen = HashSet::new();
    for (url, origin) in items {
        if url.is_empty() || !seen.insert(url) {
            continue;
        }
        match origin {
            Some(origin) => next.assets.push_tagged_image(url, origin),
            None => next.assets.push_image(url),
        };

        let mut binding = KeywordBinding::new(keyword.clone(), url);
        if let Some(template) = &template {
            binding.modified_keyword = template.modified_keyword.clone();
            binding.text_overlay = template.text_overlay.clone();
        }
        next.keywords_selected.push(binding);
    }
    next.assets.normalize();

    debug!(
        scene_id = %scene.id,
        keyword = %keyword,
        urls = seen.len(),
        "Bound media to keyword"
    );

    next
}

/// Bind a video clip to a keyword, keeping its other bindings.
pub fn bind_clip_to_keyword(scene: &Scene, keyword: &str, clip: ClipAsset) -> Scene {
    let keyword = normalize_keyword(keyword);
    let mut next = scene.clone();

    let already_bound = next
        .keywords_selected
        .iter()
        .any(|binding| binding.belongs_to(&keyword) && binding.urls().any(|url| url == clip.url));
    if !already_bound && !clip.url.is_empty() {
        next.keywords_selected
            .push(KeywordBinding::new(keyword, clip.url.clone()));
    }
    if !clip.url.is_empty() {
        next.assets.push_clip(clip);
    }
    next
}

/// Detach a single URL from the scene and from every binding.
pub fn unbind_media(scene: &Scene, url: &str) -> Scene {
    let mut next = scene.clone();

    for binding in &mut next.keywords_selected {
        if binding.media.high_res_media.as_deref() == Some(url) {
            binding.media.high_res_media = None;
        }
        if binding.media.low_res_media.as_deref() == Some(url) {
            binding.media.low_res_media = None;
        }
    }
    next.keywords_selected.retain(|binding| binding.urls().next().is_some());
    next.assets.remove_urls(&HashSet::from([url]));
    next.assets.normalize();
    next
}
