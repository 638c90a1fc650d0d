//! Invariant checks over a whole timeline.
//!
//! Used on loaded drafts and in tests. Reports every breach it finds and
//! never panics.

use std::collections::HashSet;

use serde::Serialize;
use vscript_models::{keyword_key, Scene};

use crate::error::KeywordConflict;
use crate::keywords::classify_keyword;

/// A single invariant breach.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Two scenes share an ID.
    DuplicateId { index: usize, id: String },
    /// A scene has no ID.
    MissingId { index: usize },
    /// A highlighted keyword collides with an earlier one in the same scene.
    KeywordConflict {
        index: usize,
        keyword: String,
        conflict: KeywordConflict,
    },
    /// An asset list is present but empty instead of `null`.
    EmptyAssetList { index: usize },
    /// A binding references a keyword the scene no longer highlights.
    OrphanedBinding { index: usize, keyword: String },
}

impl Violation {
    /// Index of the offending scene.
    pub fn index(&self) -> usize {
        match self {
            Violation::DuplicateId { index, .. }
            | Violation::MissingId { index }
            | Violation::KeywordConflict { index, .. }
            | Violation::EmptyAssetList { index }
            | Violation::OrphanedBinding { index, .. } => *index,
        }
    }
}

/// Check every scene and return all breaches in timeline order.
pub fn validate_timeline(scenes: &[Scene]) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut seen_ids: HashSet<&str> = HashSet::new();

    for (index, scene) in scenes.iter().enumerate() {
        let id = scene.id.as_str();
        if id.is_empty() {
            violations.push(Violation::MissingId { index });
        } else if !seen_ids.insert(id) {
            violations.push(Violation::DuplicateId {
                index,
                id: id.to_string(),
            });
        }

        let mut accepted: Vec<String> = Vec::with_capacity(scene.highlighted_keywords.len());
        for keyword in &scene.highlighted_keywords {
            match classify_keyword(&accepted, keyword) {
                Ok(normalized) => accepted.push(normalized),
                Err(conflict) => violations.push(Violation::KeywordConflict {
                    index,
                    keyword: keyword.clone(),
                    conflict,
                }),
            }
        }

        if scene.assets.has_empty_lists() {
            violations.push(Violation::EmptyAssetList { index });
        }

        let highlighted: HashSet<String> = scene
            .highlighted_keywords
            .iter()
            .map(|keyword| keyword_key(keyword))
            .collect();
        let mut reported: HashSet<String> = HashSet::new();
        for binding in &scene.keywords_selected {
            let key = keyword_key(&binding.suggested_keyword);
            if !highlighted.contains(&key) && reported.insert(key) {
                violations.push(Violation::OrphanedBinding {
                    index,
                    keyword: binding.suggested_keyword.clone(),
                });
            }
        }
    }

    violations
}
