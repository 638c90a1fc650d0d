//! Duration parsing, formatting and estimation utilities.
//!
//! Scene durations are stored twice: as a human-readable string such as
//! `"1m 30s"` and as whole seconds. This module converts between the two
//! and derives an advisory duration from narration length.

use std::sync::LazyLock;

use regex::Regex;

use crate::Scene;

/// Speaking rate used to estimate narration length.
pub const WORDS_PER_MINUTE: u64 = 150;

/// `<n>h`, `<n>m`, `<n>s`, each optional, in that order.
static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(\d+)\s*h)?\s*(?:(\d+)\s*m)?\s*(?:(\d+)\s*s)?\s*$")
        .expect("duration pattern is valid")
});

/// Count whitespace-separated words.
fn word_count(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

/// Estimate spoken duration in seconds from narration text.
///
/// `ceil(words / 150 * 60)`, evaluated in integer arithmetic so equal inputs
/// always produce equal outputs. The result is a heuristic, not a
/// measurement of any recorded audio.
///
/// # Examples
/// ```
/// use vscript_models::duration::estimate_seconds_from_narration;
/// assert_eq!(estimate_seconds_from_narration(""), 0);
/// assert_eq!(estimate_seconds_from_narration("one two three"), 2);
/// ```
pub fn estimate_seconds_from_narration(text: &str) -> u64 {
    let words = word_count(text);
    (words * 60).div_ceil(WORDS_PER_MINUTE)
}

/// Parse a duration string like `"1h 30m 0s"`, `"2m"` or `"45s"` into seconds.
///
/// Every component is optional but they must appear in h, m, s order.
/// Missing components count as zero and unparseable input yields `0`.
///
/// # Examples
/// ```
/// use vscript_models::duration::parse_duration_string;
/// assert_eq!(parse_duration_string("1m 30s"), 90);
/// assert_eq!(parse_duration_string("1h 30m 0s"), 5400);
/// assert_eq!(parse_duration_string("soon"), 0);
/// ```
pub fn parse_duration_string(s: &str) -> u64 {
    let Some(caps) = DURATION_PATTERN.captures(s) else {
        return 0;
    };

    let component = |idx: usize| -> u64 {
        caps.get(idx)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };

    component(1)
        .saturating_mul(3600)
        .saturating_add(component(2).saturating_mul(60))
        .saturating_add(component(3))
}

/// Format seconds into the canonical duration string.
///
/// - With hours: `"{h}h {m}m {s}s"` (all units shown)
/// - Minutes only: `"{m}m"`, followed by `" {s}s"` when seconds are non-zero
/// - Otherwise: `"{s}s"`
///
/// # Examples
/// ```
/// use vscript_models::duration::format_seconds_to_duration;
/// assert_eq!(format_seconds_to_duration(90), "1m 30s");
/// assert_eq!(format_seconds_to_duration(120), "2m");
/// assert_eq!(format_seconds_to_duration(5400), "1h 30m 0s");
/// ```
pub fn format_seconds_to_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        if secs > 0 {
            format!("{}m {}s", mins, secs)
        } else {
            format!("{}m", mins)
        }
    } else {
        format!("{}s", secs)
    }
}

/// Estimate a narration's duration and return both representations.
pub fn synthesize(narration: &str) -> (String, u64) {
    let seconds = estimate_seconds_from_narration(narration);
    (format_seconds_to_duration(seconds), seconds)
}

/// Total duration of a timeline, summed over each scene's duration string.
pub fn sum_timeline(scenes: &[Scene]) -> u64 {
    scenes
        .iter()
        .map(|scene| parse_duration_string(&scene.duration))
        .fold(0u64, u64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_estimate_baseline() {
        assert_eq!(estimate_seconds_from_narration(&words(150)), 60);
        assert_eq!(estimate_seconds_from_narration(&words(300)), 120);
    }

    #[test]
    fn test_estimate_rounds_up() {
        // 1 word = 0.4s
        assert_eq!(estimate_seconds_from_narration("hello"), 1);
        // 151 words = 60.4s
        assert_eq!(estimate_seconds_from_narration(&words(151)), 61);
    }

    #[test]
    fn test_estimate_ignores_extra_whitespace() {
        let spaced = "  Pakistan\t\teconomy \n grows  ";
        assert_eq!(
            estimate_seconds_from_narration(spaced),
            estimate_seconds_from_narration("Pakistan economy grows")
        );
        assert_eq!(estimate_seconds_from_narration("   \n\t "), 0);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let text = "The quick brown fox jumps over the lazy dog";
        assert_eq!(
            estimate_seconds_from_narration(text),
            estimate_seconds_from_narration(text)
        );
    }

    #[test]
    fn test_parse_components() {
        assert_eq!(parse_duration_string("45s"), 45);
        assert_eq!(parse_duration_string("2m"), 120);
        assert_eq!(parse_duration_string("1h"), 3600);
        assert_eq!(parse_duration_string("1h 5s"), 3605);
        assert_eq!(parse_duration_string("1h30m15s"), 5415);
        assert_eq!(parse_duration_string("0s"), 0);
    }

    #[test]
    fn test_parse_unparseable() {
        assert_eq!(parse_duration_string(""), 0);
        assert_eq!(parse_duration_string("abc"), 0);
        assert_eq!(parse_duration_string("30s 1m"), 0);
        assert_eq!(parse_duration_string("00:01:30"), 0);
        assert_eq!(parse_duration_string("-5s"), 0);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_seconds_to_duration(0), "0s");
        assert_eq!(format_seconds_to_duration(45), "45s");
        assert_eq!(format_seconds_to_duration(90), "1m 30s");
        assert_eq!(format_seconds_to_duration(3600), "1h 0m 0s");
        assert_eq!(format_seconds_to_duration(3661), "1h 1m 1s");
    }

    #[test]
    fn test_canonical_strings_round_trip() {
        for s in ["45s", "1m 30s", "2m", "1h 30m 0s", "0s"] {
            assert_eq!(format_seconds_to_duration(parse_duration_string(s)), s);
        }
    }

    #[test]
    fn test_seconds_round_trip() {
        for n in (0..=7300).chain([86_399, 86_400, 360_001]) {
            assert_eq!(parse_duration_string(&format_seconds_to_duration(n)), n);
        }
    }

    #[test]
    fn test_synthesize() {
        assert_eq!(synthesize(&words(225)), ("1m 30s".to_string(), 90));
        assert_eq!(synthesize(""), ("0s".to_string(), 0));
    }

    #[test]
    fn test_sum_timeline_uses_duration_strings() {
        let mut a = Scene::new("");
        a.duration = "1m 30s".to_string();
        a.duration_in_seconds = 1;
        let mut b = Scene::new("");
        b.duration = "45s".to_string();
        let mut c = Scene::new("");
        c.duration = "not a duration".to_string();

        assert_eq!(sum_timeline(&[a, b, c]), 135);
        assert_eq!(sum_timeline(&[]), 0);
    }
}
