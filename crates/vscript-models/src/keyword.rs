//! Keyword to media binding models.
//!
//! Bindings are held in a single structured form. Older drafts stored them as
//! a `{ "keyword": ["url", ...] }` map; that shape is accepted on read and
//! converted immediately, so nothing past deserialization ever sees it.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Trim and collapse internal whitespace.
///
/// # Examples
/// ```
/// use vscript_models::keyword::normalize_keyword;
/// assert_eq!(normalize_keyword("  Pakistan \t economy "), "Pakistan economy");
/// ```
pub fn normalize_keyword(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Comparison key for a keyword: normalized and lowercased.
pub fn keyword_key(text: &str) -> String {
    normalize_keyword(text).to_lowercase()
}

/// Media chosen for a keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BindingMedia {
    /// Preview-quality URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_res_media: Option<String>,

    /// Render-quality URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_res_media: Option<String>,
}

impl BindingMedia {
    /// Media with a single render-quality URL.
    pub fn high_res(url: impl Into<String>) -> Self {
        Self {
            low_res_media: None,
            high_res_media: Some(url.into()),
        }
    }

    /// Distinct URLs referenced by this media entry.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        let high = self.high_res_media.as_deref();
        let low = self.low_res_media.as_deref().filter(|low| Some(*low) != high);
        high.into_iter().chain(low)
    }
}

/// Association between a highlighted keyword and one media asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeywordBinding {
    /// Keyword as originally highlighted
    pub suggested_keyword: String,

    /// User-edited search keyword
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_keyword: Option<String>,

    /// Bound media
    #[serde(default)]
    pub media: BindingMedia,

    /// Text drawn over the media while it is shown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_overlay: Option<String>,
}

impl KeywordBinding {
    /// Bind a single URL to a keyword.
    pub fn new(keyword: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            suggested_keyword: keyword.into(),
            modified_keyword: None,
            media: BindingMedia::high_res(url),
            text_overlay: None,
        }
    }

    /// Set the text overlay.
    pub fn with_text_overlay(mut self, text: impl Into<String>) -> Self {
        self.text_overlay = Some(text.into());
        self
    }

    /// Set the modified keyword.
    pub fn with_modified_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.modified_keyword = Some(keyword.into());
        self
    }

    /// True if this binding is owned by `keyword` (case-insensitive).
    ///
    /// Only the suggested keyword owns a binding. An edited search term
    /// never does; see [`KeywordBinding::search_term`].
    pub fn belongs_to(&self, keyword: &str) -> bool {
        keyword_key(&self.suggested_keyword) == keyword_key(keyword)
    }

    /// Term used to search media: the modified keyword when set, the
    /// suggested keyword otherwise.
    pub fn search_term(&self) -> &str {
        self.modified_keyword
            .as_deref()
            .unwrap_or(&self.suggested_keyword)
    }

    /// URLs referenced by this binding.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.media.urls()
    }
}

/// Read-side shapes of `keywordsSelected`.
#[derive(Deserialize)]
#[serde(untagged)]
enum KeywordSelectionsRepr {
    Structured(Vec<KeywordBinding>),
    Legacy(BTreeMap<String, LegacyUrls>),
}

/// Legacy map values were sometimes a single URL.
#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyUrls {
    Many(Vec<String>),
    One(String),
}

impl KeywordSelectionsRepr {
    fn into_bindings(self) -> Vec<KeywordBinding> {
        match self {
            Self::Structured(bindings) => bindings,
            Self::Legacy(map) => map
                .into_iter()
                .flat_map(|(keyword, urls)| {
                    let urls = match urls {
                        LegacyUrls::Many(urls) => urls,
                        LegacyUrls::One(url) => vec![url],
                    };
                    urls.into_iter()
                        .filter(|url| !url.is_empty())
                        .map(move |url| KeywordBinding::new(keyword.clone(), url))
                        .collect::<Vec<_>>()
                })
                .collect(),
        }
    }
}

/// Deserialize `keywordsSelected` from either the structured array, the
/// legacy map, or `null`.
pub(crate) fn deserialize_keyword_selections<'de, D>(
    deserializer: D,
) -> Result<Vec<KeywordBinding>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<KeywordSelectionsRepr>::deserialize(deserializer)?;
    Ok(repr.map(KeywordSelectionsRepr::into_bindings).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_keyword_selections")]
        selections: Vec<KeywordBinding>,
    }

    fn read(value: serde_json::Value) -> Vec<KeywordBinding> {
        serde_json::from_value::<Holder>(value).unwrap().selections
    }

    #[test]
    fn test_normalize_keyword() {
        assert_eq!(normalize_keyword("  a   b "), "a b");
        assert_eq!(normalize_keyword(""), "");
        assert_eq!(keyword_key(" PAKISTAN  Economy"), "pakistan economy");
    }

    #[test]
    fn test_reads_structured_form() {
        let bindings = read(json!({
            "selections": [{
                "suggestedKeyword": "Pakistan",
                "modifiedKeyword": "Lahore",
                "media": { "lowResMedia": "https://a/low.jpg", "highResMedia": "https://a/high.jpg" },
                "textOverlay": "Lahore, 2024"
            }]
        }));

        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].modified_keyword.as_deref(), Some("Lahore"));
        assert_eq!(
            bindings[0].urls().collect::<Vec<_>>(),
            vec!["https://a/high.jpg", "https://a/low.jpg"]
        );
    }

    #[test]
    fn test_reads_legacy_map_form() {
        let bindings = read(json!({
            "selections": {
                "economy": ["https://a/1.jpg", "https://a/2.jpg"],
                "Pakistan": "https://a/3.jpg"
            }
        }));

        assert_eq!(bindings.len(), 3);
        assert!(bindings.iter().all(|b| b.modified_keyword.is_none()));
        let economy: Vec<_> = bindings
            .iter()
            .filter(|b| b.belongs_to("ECONOMY"))
            .flat_map(|b| b.urls())
            .collect();
        assert_eq!(economy, vec!["https://a/1.jpg", "https://a/2.jpg"]);
    }

    #[test]
    fn test_reads_null_and_missing() {
        assert!(read(json!({ "selections": null })).is_empty());
        assert!(read(json!({})).is_empty());
    }

    #[test]
    fn test_modified_keyword_does_not_own_binding() {
        let binding = KeywordBinding::new("Pakistan", "u").with_modified_keyword("Karachi port");
        assert!(binding.belongs_to("pakistan"));
        assert!(!binding.belongs_to("karachi  PORT"));
        assert_eq!(binding.search_term(), "Karachi port");

        let plain = KeywordBinding::new("Pakistan", "u");
        assert_eq!(plain.search_term(), "Pakistan");
    }

    #[test]
    fn test_duplicate_resolutions_collapse() {
        let media = BindingMedia {
            low_res_media: Some("same".into()),
            high_res_media: Some("same".into()),
        };
        assert_eq!(media.urls().count(), 1);
    }
}
