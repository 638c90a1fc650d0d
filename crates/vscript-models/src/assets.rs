//! Scene media assets.
//!
//! Every list is `None` once empty and serializes as an explicit `null`;
//! drafts are compared structurally, so `[]` and a missing key are both
//! wrong on the wire.

use std::collections::{BTreeMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where an image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetOrigin {
    /// Generated by the image model
    Ai,
    /// Google image search
    Google,
    /// Envato stock library
    Envato,
    /// Uploaded by the user
    Upload,
}

impl AssetOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetOrigin::Ai => "ai",
            AssetOrigin::Google => "google",
            AssetOrigin::Envato => "envato",
            AssetOrigin::Upload => "upload",
        }
    }
}

/// A video clip attached to a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClipAsset {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ClipAsset {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            thumbnail: None,
        }
    }

    /// Set the thumbnail URL.
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }
}

/// Flattened, de-duplicated media attached to a scene for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SceneAssets {
    /// All images shown in the scene
    #[serde(default)]
    pub images: Option<Vec<String>>,

    /// Video clips shown in the scene
    #[serde(default)]
    pub clips: Option<Vec<ClipAsset>>,

    /// Images that came from Google search
    #[serde(default)]
    pub images_google: Option<Vec<String>>,

    /// Images that came from Envato
    #[serde(default)]
    pub images_envato: Option<Vec<String>>,

    /// Origin tag per image URL
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub origins: BTreeMap<String, AssetOrigin>,
}

/// Collapse an empty list to `None`.
fn collapse<T>(list: &mut Option<Vec<T>>) {
    if list.as_ref().is_some_and(Vec::is_empty) {
        *list = None;
    }
}

/// Append `url` unless already present. Returns true if appended.
fn push_unique(list: &mut Option<Vec<String>>, url: &str) -> bool {
    let items = list.get_or_insert_with(Vec::new);
    if items.iter().any(|existing| existing == url) {
        return false;
    }
    items.push(url.to_string());
    true
}

fn retain_strings(list: &mut Option<Vec<String>>, removed: &HashSet<&str>) {
    if let Some(items) = list.as_mut() {
        items.retain(|url| !removed.contains(url.as_str()));
    }
}

impl SceneAssets {
    /// Append an image URL if not already attached. Returns true if appended.
    pub fn push_image(&mut self, url: &str) -> bool {
        push_unique(&mut self.images, url)
    }

    /// Append an image URL and record its origin.
    ///
    /// Google and Envato images are also listed in their source lists.
    pub fn push_tagged_image(&mut self, url: &str, origin: AssetOrigin) -> bool {
        let added = self.push_image(url);
        match origin {
            AssetOrigin::Google => {
                push_unique(&mut self.images_google, url);
            }
            AssetOrigin::Envato => {
                push_unique(&mut self.images_envato, url);
            }
            AssetOrigin::Ai | AssetOrigin::Upload => {}
        }
        self.origins.insert(url.to_string(), origin);
        added
    }

    /// Append a clip unless one with the same URL is attached.
    pub fn push_clip(&mut self, clip: ClipAsset) -> bool {
        let clips = self.clips.get_or_insert_with(Vec::new);
        if clips.iter().any(|existing| existing.url == clip.url) {
            return false;
        }
        clips.push(clip);
        true
    }

    /// Remove the given URLs from every list (set difference) and normalize.
    pub fn remove_urls(&mut self, removed: &HashSet<&str>) {
        if removed.is_empty() {
            return;
        }
        retain_strings(&mut self.images, removed);
        retain_strings(&mut self.images_google, removed);
        retain_strings(&mut self.images_envato, removed);
        if let Some(clips) = self.clips.as_mut() {
            clips.retain(|clip| !removed.contains(clip.url.as_str()));
        }
        self.origins.retain(|url, _| !removed.contains(url.as_str()));
        self.normalize();
    }

    /// Replace empty lists with `None`.
    pub fn normalize(&mut self) {
        collapse(&mut self.images);
        collapse(&mut self.clips);
        collapse(&mut self.images_google);
        collapse(&mut self.images_envato);
    }

    /// True if any list contains `url`.
    pub fn contains_url(&self, url: &str) -> bool {
        self.all_urls().any(|existing| existing == url)
    }

    /// Every URL referenced by the assets.
    pub fn all_urls(&self) -> impl Iterator<Item = &str> {
        let strings = [&self.images, &self.images_google, &self.images_envato]
            .into_iter()
            .flatten()
            .flatten()
            .map(String::as_str);
        let clips = self.clips.iter().flatten().map(|clip| clip.url.as_str());
        strings.chain(clips)
    }

    /// Explicit origin of an image, if tagged.
    pub fn origin_of(&self, url: &str) -> Option<AssetOrigin> {
        self.origins.get(url).copied()
    }

    /// True only for images explicitly tagged as AI-generated.
    pub fn is_ai_generated(&self, url: &str) -> bool {
        self.origin_of(url) == Some(AssetOrigin::Ai)
    }

    /// True if any list holds an empty array instead of `None`.
    pub fn has_empty_lists(&self) -> bool {
        self.images.as_ref().is_some_and(Vec::is_empty)
            || self.clips.as_ref().is_some_and(Vec::is_empty)
            || self.images_google.as_ref().is_some_and(Vec::is_empty)
            || self.images_envato.as_ref().is_some_and(Vec::is_empty)
    }
}
