use serde::{Deserialize, Serialize};

use super::time_window::Dated;

/// A news item as served by the portal backend.
///
/// Feeds are inconsistent about the timestamp key: newer endpoints send
/// `published_at`, older ones `publishedAt`. Both are kept verbatim and
/// resolved by [`Dated::raw_timestamp`].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Article {
    pub id: u64,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default, rename = "publishedAt")]
    pub published_at_alt: Option<String>,
}

impl Article {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }
}

impl Dated for Article {
    fn raw_timestamp(&self) -> Option<&str> {
        [self.published_at.as_deref(), self.published_at_alt.as_deref()]
            .into_iter()
            .flatten()
            .find(|raw| !raw.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_both_timestamp_spellings() {
        let json = r#"[
            {"id": 1, "title": "Snake", "published_at": "2026-06-30T08:00:00Z"},
            {"id": 2, "title": "Camel", "publishedAt": "2026-06-29T08:00:00Z"},
            {"id": 3, "title": "Neither"}
        ]"#;
        let articles: Vec<Article> = serde_json::from_str(json).unwrap();

        assert_eq!(articles[0].raw_timestamp(), Some("2026-06-30T08:00:00Z"));
        assert_eq!(articles[1].raw_timestamp(), Some("2026-06-29T08:00:00Z"));
        assert_eq!(articles[2].raw_timestamp(), None);
    }

    #[test]
    fn prefers_snake_case_and_skips_blank_values() {
        let both = Article {
            id: 1,
            published_at: Some("2026-06-30".to_string()),
            published_at_alt: Some("2020-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(both.raw_timestamp(), Some("2026-06-30"));

        let blank_primary = Article {
            id: 2,
            published_at: Some("   ".to_string()),
            published_at_alt: Some("2020-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(blank_primary.raw_timestamp(), Some("2020-01-01"));
    }

    #[test]
    fn explicit_null_timestamp_matches_no_window() {
        use crate::internal::time_window::{WindowId, classify};
        use jiff::Timestamp;
        use jiff::tz::TimeZone;
        use strum::IntoEnumIterator;

        let json = r#"[{"id": 7, "title": "Undated", "published_at": null}]"#;
        let articles: Vec<Article> = serde_json::from_str(json).unwrap();
        assert_eq!(articles[0].raw_timestamp(), None);

        for raw_now in ["2026-06-30T12:00:00Z", "2027-01-01T00:00:00Z"] {
            let now = raw_now
                .parse::<Timestamp>()
                .unwrap()
                .to_zoned(TimeZone::UTC);
            for window in WindowId::iter() {
                assert!(classify(&articles, window, &now).is_empty(), "{window}");
            }
        }
    }

    #[test]
    fn display_title_falls_back() {
        let article = Article::default();
        assert_eq!(article.display_title(), "(untitled)");
    }
}
