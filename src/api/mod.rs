use crate::internal::cache::Cache;
use crate::internal::models::Article;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum_macros::{Display, EnumIter};

/// Portal sections, one tab each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum Section {
    Latest,
    National,
    Province,
    Business,
    Sports,
    Entertainment,
    Opinion,
}

impl Section {
    /// Category slug used both by the backend and in route paths.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::National => "national",
            Self::Province => "province",
            Self::Business => "business",
            Self::Sports => "sports",
            Self::Entertainment => "entertainment",
            Self::Opinion => "opinion",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        use strum::IntoEnumIterator;
        Self::iter().find(|s| s.as_api_str() == slug)
    }

    /// Translation key for the tab label.
    pub fn label_key(&self) -> &'static str {
        match self {
            Self::Latest => "section.latest",
            Self::National => "section.national",
            Self::Province => "section.province",
            Self::Business => "section.business",
            Self::Sports => "section.sports",
            Self::Entertainment => "section.entertainment",
            Self::Opinion => "section.opinion",
        }
    }
}

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/";

/// Thin REST client for the portal backend.
///
/// Async `reqwest` under the hood; the UI awaits it from spawned tasks.
/// Responses are kept in a TTL cache so tab switches do not refetch.
#[derive(Clone)]
pub struct ApiService {
    client: Client,
    base_url: String,
    list_cache: Cache<Section, Vec<Article>>,
    article_cache: Cache<u64, Article>,
}

impl ApiService {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self::with_options(base_url, Duration::from_secs(300), false)
    }

    pub fn with_options(base_url: String, ttl: Duration, enable_metrics: bool) -> Self {
        let base_url = match base_url.ends_with('/') {
            true => base_url,
            false => format!("{}/", base_url),
        };
        Self {
            client: Client::new(),
            base_url,
            list_cache: Cache::with_metrics(ttl, enable_metrics),
            article_cache: Cache::with_metrics(ttl, enable_metrics),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generic helper to GET a URL and deserialize the JSON body into `T`.
    async fn get_json<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let resp = self
            .client
            .get(url)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .with_context(|| format!("failed to send GET request to {}", url))?
            .error_for_status()
            .with_context(|| format!("GET {} returned an error status", url))?;

        resp.json::<T>()
            .await
            .with_context(|| format!("failed to parse JSON response from {}", url))
    }

    /// Fetch the article list for one section.
    pub async fn fetch_articles(&self, section: Section) -> Result<Vec<Article>> {
        if let Some(articles) = self.list_cache.get(&section) {
            return Ok(articles);
        }

        let url = format!(
            "{}articles?category={}",
            self.base_url,
            section.as_api_str()
        );
        let articles: Vec<Article> = self
            .get_json(&url)
            .await
            .with_context(|| format!("fetch_articles failed for section {}", section))?;

        for article in &articles {
            self.article_cache.set(article.id, article.clone());
        }
        self.list_cache.set(section, articles.clone());
        Ok(articles)
    }

    /// Fetch a single article by id.
    pub async fn fetch_article(&self, id: u64) -> Result<Article> {
        if let Some(article) = self.article_cache.get(&id) {
            return Ok(article);
        }

        let url = format!("{}articles/{}", self.base_url, id);
        let article: Article = self
            .get_json(&url)
            .await
            .with_context(|| format!("fetch_article failed for id {}", id))?;

        self.article_cache.set(id, article.clone());
        Ok(article)
    }

    /// Drop the cached list for `section` so the next fetch hits the backend.
    pub fn invalidate(&self, section: Section) {
        self.list_cache.invalidate(&section);
    }
}

impl Default for ApiService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const LIST_BODY: &str = r#"[
        {"id": 11, "title": "Dam inaugurated", "published_at": "2026-06-30T06:00:00Z"},
        {"id": 12, "title": "Market closes higher", "publishedAt": "2026-06-29T15:30:00Z"}
    ]"#;

    #[test]
    fn test_section_slugs_round_trip() {
        for section in Section::iter() {
            assert_eq!(Section::from_slug(section.as_api_str()), Some(section));
        }
        assert_eq!(Section::from_slug("weather"), None);
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let service = ApiService::with_base_url("http://example.test/api".to_string());
        assert_eq!(service.base_url(), "http://example.test/api/");
    }

    #[tokio::test]
    async fn test_fetch_articles_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/articles?category=business")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LIST_BODY)
            .create_async()
            .await;

        let service = ApiService::with_base_url(format!("{}/", server.url()));
        let articles = service.fetch_articles(Section::Business).await.unwrap();

        mock.assert_async().await;
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].display_title(), "Dam inaugurated");
        assert_eq!(
            articles[1].published_at_alt.as_deref(),
            Some("2026-06-29T15:30:00Z")
        );
    }

    #[tokio::test]
    async fn test_fetch_articles_is_cached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/articles?category=sports")
            .with_status(200)
            .with_body(LIST_BODY)
            .expect(1)
            .create_async()
            .await;

        let service = ApiService::with_base_url(server.url());
        service.fetch_articles(Section::Sports).await.unwrap();
        service.fetch_articles(Section::Sports).await.unwrap();

        // Listed articles also satisfy single-article lookups.
        let article = service.fetch_article(12).await.unwrap();
        assert_eq!(article.display_title(), "Market closes higher");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_article_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/articles/99")
            .with_status(500)
            .create_async()
            .await;

        let service = ApiService::with_base_url(server.url());
        let err = service.fetch_article(99).await.unwrap_err();
        assert!(err.to_string().contains("fetch_article failed for id 99"));
    }

    #[tokio::test]
    async fn test_fetch_articles_network_error() {
        let service = ApiService::with_base_url("http://localhost:1/".to_string());
        let result = service.fetch_articles(Section::Latest).await;

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("fetch_articles failed"));
    }
}
