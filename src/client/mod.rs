//! Article API client
//!
//! [`ArticleApi`] is the seam the store talks to; [`HttpArticleClient`] is the
//! HTTP/JSON implementation for blog backends exposing `/articles`.

mod articles;
mod io;
mod posting;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use crate::article::{Article, PublishedArticle};
use crate::config::ApiConfig;
use crate::{EditorError, Result};

/// Remote article operations
///
/// Object safe, so the store can hold an `Arc<dyn ArticleApi>` and tests can
/// substitute an in-memory implementation.
#[async_trait]
pub trait ArticleApi: Send + Sync {
    /// Fetch an article by slug
    async fn get_article(&self, slug: &str) -> Result<PublishedArticle>;

    /// Create a new article
    async fn create_article(&self, article: &Article) -> Result<PublishedArticle>;

    /// Replace the editable fields of the article at `slug`
    async fn update_article(&self, article: &Article, slug: &str) -> Result<PublishedArticle>;
}

/// Async HTTP client for the article endpoints
///
/// # Example
///
/// ```no_run
/// use article_editor::{ApiConfig, ArticleApi, HttpArticleClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ApiConfig::new("https://blog.example.com/api").with_token("jwt");
/// let client = HttpArticleClient::new(config)?;
///
/// let published = client.get_article("how-to-train-your-dragon").await?;
/// println!("{} by {:?}", published.article.title, published.author_name());
/// # Ok(())
/// # }
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct HttpArticleClient {
    /// Connection-pooling reqwest client
    http: reqwest::Client,
    /// Parsed API root
    base_url: Url,
    /// Client configuration
    config: Arc<ApiConfig>,
}

impl HttpArticleClient {
    /// Build a client from its configuration
    ///
    /// # Errors
    ///
    /// - [`EditorError::Config`] - The base URL is not an absolute http(s) URL
    /// - [`EditorError::Http`] - The underlying HTTP client could not be built
    pub fn new(config: ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| EditorError::Config(format!("invalid base URL {:?}: {e}", config.base_url)))?;

        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(EditorError::Config(format!(
                "base URL must be an absolute http(s) URL, got {:?}",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        debug!(base_url = %base_url, authenticated = config.token.is_some(), "Article client ready");

        Ok(Self {
            http,
            base_url,
            config: Arc::new(config),
        })
    }

    /// Client configuration
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// True if requests carry an `Authorization` header
    pub fn is_authenticated(&self) -> bool {
        self.config.token.is_some()
    }
}

#[async_trait]
impl ArticleApi for HttpArticleClient {
    async fn get_article(&self, slug: &str) -> Result<PublishedArticle> {
        self.fetch_article(slug).await
    }

    async fn create_article(&self, article: &Article) -> Result<PublishedArticle> {
        self.post_article(article).await
    }

    async fn update_article(&self, article: &Article, slug: &str) -> Result<PublishedArticle> {
        self.put_article(article, slug).await
    }
}
