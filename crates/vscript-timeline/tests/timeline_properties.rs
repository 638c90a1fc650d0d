//! End-to-end checks of the timeline invariants over realistic edit sequences.

use std::collections::HashSet;

use serde_json::json;
use vscript_models::{
    estimate_seconds_from_narration, format_seconds_to_duration, parse_duration_string,
    sum_timeline, AssetOrigin, LogoPosition, LogoRef, MusicTrack, Scene, SceneId, VideoEffects,
};
use vscript_timeline::{
    add_keyword, apply_to_all, bind_media_to_keyword, bind_tagged_media, delete, insert_after,
    remove_keyword, reorder, replace_all, split, update_field, validate_timeline, BulkChange,
    KeywordConflict, ScenePatch, TaggedMedia,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("vscript_timeline=debug")
        .with_test_writer()
        .try_init();
}

fn ids(scenes: &[Scene]) -> Vec<SceneId> {
    scenes.iter().map(|scene| scene.id.clone()).collect()
}

fn timeline(n: usize) -> Vec<Scene> {
    (0..n).map(|i| Scene::new(format!("scene number {}", i))).collect()
}

/// Small deterministic generator so the edit sequence is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound.max(1)
    }
}

#[test]
fn order_invariant_holds_over_random_edits() {
    init_tracing();
    let mut rng = Lcg(42);
    let mut scenes = timeline(4);

    for step in 0..500 {
        let len = scenes.len();
        let before = ids(&scenes);

        match rng.next(5) {
            0 => {
                let at = rng.next(len + 1) as isize - 1;
                scenes = insert_after(&scenes, at);
                assert_eq!(scenes.len(), len + 1, "step {}", step);
                let after = ids(&scenes);
                let inserted = (at + 1) as usize;
                assert_eq!(&after[..inserted], &before[..inserted]);
                assert_eq!(&after[inserted + 1..], &before[inserted..]);
            }
            1 => {
                // Out-of-range indices are included on purpose
                let index = rng.next(len + 2);
                scenes = delete(&scenes, index);
                if index < len {
                    let mut expected = before.clone();
                    expected.remove(index);
                    assert_eq!(ids(&scenes), expected);
                } else {
                    assert_eq!(ids(&scenes), before);
                }
            }
            2 => {
                let from = rng.next(len + 1);
                let to = if rng.next(4) == 0 { None } else { Some(rng.next(len + 1)) };
                scenes = reorder(&scenes, from, to);
                let after = ids(&scenes);
                let before_set: HashSet<_> = before.iter().collect();
                let after_set: HashSet<_> = after.iter().collect();
                assert_eq!(before_set, after_set);
                if to.is_none() || from >= len || to.is_some_and(|to| to >= len) {
                    assert_eq!(after, before);
                } else if let Some(to) = to {
                    assert_eq!(after[to], before[from]);
                }
            }
            3 => {
                let index = rng.next(len + 1);
                scenes = update_field(&scenes, index, ScenePatch::narration("edited narration"));
                assert_eq!(ids(&scenes), before);
            }
            _ => {
                let index = rng.next(len + 1);
                let offset = rng.next(20);
                scenes = split(&scenes, index, offset);
                assert!(scenes.len() == len || scenes.len() == len + 1);
            }
        }

        let unique: HashSet<_> = scenes.iter().map(|scene| scene.id.as_str()).collect();
        assert_eq!(unique.len(), scenes.len(), "duplicate id after step {}", step);
    }

    assert!(validate_timeline(&scenes).is_empty());
}

#[test]
fn keyword_scenario() {
    init_tracing();
    let scene = Scene::new("");

    let scene = add_keyword(&scene, "Pakistan").unwrap();
    assert_eq!(scene.highlighted_keywords, vec!["Pakistan"]);

    let err = add_keyword(&scene, "pakistan").unwrap_err();
    assert_eq!(err.as_str(), "exact_duplicate");

    let err = add_keyword(&scene, "Pakistan economy").unwrap_err();
    assert_eq!(
        err,
        KeywordConflict::ContainsExisting {
            existing: "Pakistan".into()
        }
    );

    let err = add_keyword(&scene, "Pak").unwrap_err();
    assert_eq!(err.as_str(), "contained_in_existing");
}

#[test]
fn keywords_stay_unique_across_many_additions() {
    let candidates = [
        "rice", "Rice", "rice fields", "fields", "Lahore", "lahore port", "port", "harbor", "  harbor ",
    ];
    let mut scene = Scene::new("Rice leaves Lahore through the harbor");
    for candidate in candidates {
        if let Ok(next) = add_keyword(&scene, candidate) {
            scene = next;
        }
    }

    assert_eq!(scene.highlighted_keywords, vec!["rice", "fields", "Lahore", "port", "harbor"]);
    for (i, a) in scene.highlighted_keywords.iter().enumerate() {
        for b in &scene.highlighted_keywords[i + 1..] {
            let (a, b) = (a.to_lowercase(), b.to_lowercase());
            assert!(!a.contains(&b) && !b.contains(&a));
        }
    }
}

#[test]
fn cascading_delete_keeps_shared_urls() {
    init_tracing();
    let scene = Scene::new("Pakistan exports rice").with_keywords(["Pakistan", "rice"]);
    let scene = bind_media_to_keyword(&scene, "Pakistan", &["flag.jpg", "shared.jpg"]);
    let scene = bind_tagged_media(
        &scene,
        "rice",
        &[
            TaggedMedia::new("shared.jpg", AssetOrigin::Google),
            TaggedMedia::new("paddy.jpg", AssetOrigin::Envato),
        ],
    );

    let scene = remove_keyword(&scene, "Pakistan");
    assert_eq!(scene.highlighted_keywords, vec!["rice"]);
    assert_eq!(
        scene.assets.images,
        Some(vec!["shared.jpg".to_string(), "paddy.jpg".to_string()])
    );
    assert!(scene.keywords_selected.iter().all(|b| b.suggested_keyword == "rice"));

    let scene = remove_keyword(&scene, "rice");
    assert!(scene.highlighted_keywords.is_empty());
    assert!(scene.keywords_selected.is_empty());
    assert_eq!(scene.assets.images, None);
    assert_eq!(scene.assets.images_google, None);
    assert_eq!(scene.assets.images_envato, None);
    assert!(validate_timeline(&[scene]).is_empty());
}

#[test]
fn emptied_assets_serialize_as_null() {
    let scene = Scene::new("Pakistan").with_keywords(["Pakistan"]);
    let scene = bind_media_to_keyword(&scene, "Pakistan", &["flag.jpg"]);
    let scene = remove_keyword(&scene, "Pakistan");

    let value = serde_json::to_value(&scene).unwrap();
    assert_eq!(value["assets"]["images"], serde_json::Value::Null);
    assert_eq!(value["assets"]["clips"], serde_json::Value::Null);
}

#[test]
fn legacy_draft_is_loaded_and_cleaned() {
    init_tracing();
    let draft = json!([
        {
            "id": "s1",
            "narration": "Pakistan exports rice",
            "duration": "3s",
            "durationInSeconds": 3,
            "highlightedKeywords": ["Pakistan", "Pakistan exports"],
            "keywordsSelected": { "Pakistan": ["flag.jpg"] },
            "assets": { "images": ["flag.jpg"], "clips": [] }
        },
        { "id": "s1", "narration": "duplicate id" }
    ]);

    let scenes: Vec<Scene> = serde_json::from_value(draft).unwrap();
    assert!(!validate_timeline(&scenes).is_empty());

    let scenes = replace_all(scenes);
    assert!(validate_timeline(&scenes).is_empty());
    assert_eq!(scenes[0].id.as_str(), "s1");
    assert_ne!(scenes[1].id.as_str(), "s1");
    assert_eq!(scenes[0].highlighted_keywords, vec!["Pakistan"]);
    assert_eq!(scenes[0].assets.clips, None);

    // Written back in the structured form
    let value = serde_json::to_value(&scenes[0]).unwrap();
    assert_eq!(
        value["keywordsSelected"],
        json!([{ "suggestedKeyword": "Pakistan", "media": { "highResMedia": "flag.jpg" } }])
    );
}

#[test]
fn bulk_apply_is_additive() {
    init_tracing();
    let logo = |name: &str| LogoRef::new(name, format!("https://cdn/{}.png", name), LogoPosition::TopLeft);
    let scenes = vec![
        Scene::new("a").with_effects(VideoEffects {
            logos: vec![logo("one"), logo("two")],
            transition: "cut".into(),
            ..Default::default()
        }),
        Scene::new("b"),
    ];

    let scenes = apply_to_all(&scenes, &BulkChange::Logo(logo("brand")));
    let scenes = apply_to_all(&scenes, &BulkChange::Music(MusicTrack::new("https://cdn/theme.mp3")));
    let scenes = apply_to_all(&scenes, &BulkChange::Effect(vec!["zoom".into(), "grain".into()]));
    let scenes = apply_to_all(&scenes, &BulkChange::Effect(vec!["zoom".into()]));

    let first = scenes[0].video_effects.as_ref().unwrap();
    assert_eq!(first.logos.len(), 3);
    assert_eq!(first.transition, "cut");
    assert_eq!(first.background_music.len(), 1);
    assert_eq!(first.effects, vec!["zoom", "grain"]);

    let second = scenes[1].video_effects.as_ref().unwrap();
    assert_eq!(second.logos.len(), 1);
    assert_ne!(second.logos[0].id, first.logos[2].id);
}

#[test]
fn durations_round_trip_and_sum() {
    for text in ["45s", "1m 30s", "2m", "1h 30m 0s", "0s"] {
        assert_eq!(format_seconds_to_duration(parse_duration_string(text)), text);
    }
    for n in (0..=4000).step_by(7) {
        assert_eq!(parse_duration_string(&format_seconds_to_duration(n)), n);
    }

    let narration = vec!["word"; 150].join(" ");
    assert_eq!(estimate_seconds_from_narration(&narration), 60);
    assert_eq!(
        estimate_seconds_from_narration(&narration),
        estimate_seconds_from_narration(&narration)
    );

    let scenes = vec![Scene::new(narration.clone()), Scene::new(narration)];
    assert_eq!(sum_timeline(&scenes), 120);
}
