//! Global article state and the actions that update it
//!
//! The store is a cheap cloneable handle over a `tokio::sync::watch` channel.
//! Every action updates the state through `send_modify`, so updates are
//! applied one at a time and every subscriber sees the latest snapshot.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use article_editor::{ApiConfig, ArticleStore, HttpArticleClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpArticleClient::new(ApiConfig::new("https://blog.example.com/api"))?;
//! let store = ArticleStore::new(Arc::new(client));
//!
//! store.get_article("how-to-train-your-dragon").await?;
//! let state = store.state();
//! assert!(!state.load_article);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::article::{Article, PublishedArticle};
use crate::client::ArticleApi;
use crate::validation::validate_slug;
use crate::Result;

/// Snapshot of the article slice of the application state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleState {
    /// Most recently fetched, created or updated article
    pub article: Option<PublishedArticle>,
    /// Logged-in user
    pub user_name: Option<String>,
    /// A fetch is in flight
    pub load_article: bool,
    /// The last request failed
    pub error_article: bool,
}

/// Article state container with async action dispatchers
#[derive(Clone)]
pub struct ArticleStore {
    api: Arc<dyn ArticleApi>,
    state: Arc<watch::Sender<ArticleState>>,
}

impl std::fmt::Debug for ArticleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleStore")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl ArticleStore {
    /// Create a store with an empty state
    pub fn new(api: Arc<dyn ArticleApi>) -> Self {
        let (state, _) = watch::channel(ArticleState::default());
        Self {
            api,
            state: Arc::new(state),
        }
    }

    /// Set the logged-in user
    #[must_use]
    pub fn with_user(self, user_name: impl Into<String>) -> Self {
        self.set_user(Some(user_name.into()));
        self
    }

    /// Replace the logged-in user
    pub fn set_user(&self, user_name: Option<String>) {
        self.state.send_modify(|state| state.user_name = user_name);
    }

    /// Current state snapshot
    pub fn state(&self) -> ArticleState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<ArticleState> {
        self.state.subscribe()
    }

    /// Fetch an article by slug
    ///
    /// Sets `load_article` and clears the previous article and error while
    /// the request is in flight. On failure `error_article` is set.
    pub async fn get_article(&self, slug: &str) -> Result<PublishedArticle> {
        debug!(slug, "get_article");
        self.begin_load();

        let result = match validate_slug(slug) {
            Ok(()) => self.api.get_article(slug).await,
            Err(e) => Err(e),
        };

        self.state.send_modify(|state| {
            state.load_article = false;
            match &result {
                Ok(article) => state.article = Some(article.clone()),
                Err(_) => state.error_article = true,
            }
        });

        if let Err(e) = &result {
            warn!(slug, error = %e, "Failed to load article");
        }
        result
    }

    /// Create an article
    pub async fn add_article(&self, article: Article) -> Result<PublishedArticle> {
        debug!(title = %article.title, "add_article");
        let result = self.api.create_article(&article).await;
        self.finish_write(&result);

        if let Err(e) = &result {
            warn!(error = %e, "Failed to create article");
        }
        result
    }

    /// Replace the article at `slug`
    pub async fn edit_article(&self, article: Article, slug: &str) -> Result<PublishedArticle> {
        debug!(slug, title = %article.title, "edit_article");
        let result = match validate_slug(slug) {
            Ok(()) => self.api.update_article(&article, slug).await,
            Err(e) => Err(e),
        };
        self.finish_write(&result);

        if let Err(e) = &result {
            warn!(slug, error = %e, "Failed to update article");
        }
        result
    }

    /// Drop the current article and raise the loading flag
    pub(crate) fn begin_load(&self) {
        self.state.send_modify(|state| {
            state.article = None;
            state.load_article = true;
            state.error_article = false;
        });
    }

    fn finish_write(&self, result: &Result<PublishedArticle>) {
        self.state.send_modify(|state| match result {
            Ok(article) => {
                state.article = Some(article.clone());
                state.error_article = false;
            }
            Err(_) => state.error_article = true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EditorError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Answers every call with a fixed article, or fails when `fail` is set
    struct FixedApi {
        fail: AtomicBool,
    }

    fn published(slug: &str) -> PublishedArticle {
        PublishedArticle {
            slug: slug.to_string(),
            article: Article {
                title: "Title".to_string(),
                description: "Description".to_string(),
                body: "Body".to_string(),
                tag_list: vec!["a".to_string()],
            },
            ..Default::default()
        }
    }

    #[async_trait]
    impl ArticleApi for FixedApi {
        async fn get_article(&self, slug: &str) -> Result<PublishedArticle> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(EditorError::NotFound(slug.to_string()));
            }
            Ok(published(slug))
        }

        async fn create_article(&self, _article: &Article) -> Result<PublishedArticle> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(EditorError::Unauthorized("no token".to_string()));
            }
            Ok(published("created"))
        }

        async fn update_article(&self, _article: &Article, slug: &str) -> Result<PublishedArticle> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(EditorError::Unauthorized("no token".to_string()));
            }
            Ok(published(slug))
        }
    }

    fn store(fail: bool) -> ArticleStore {
        ArticleStore::new(Arc::new(FixedApi {
            fail: AtomicBool::new(fail),
        }))
    }

    #[tokio::test]
    async fn test_get_article_success() {
        let store = store(false);
        let article = store.get_article("my-post").await.unwrap();
        assert_eq!(article.slug, "my-post");

        let state = store.state();
        assert_eq!(state.article, Some(article));
        assert!(!state.load_article);
        assert!(!state.error_article);
    }

    #[tokio::test]
    async fn test_get_article_failure_sets_error() {
        let store = store(true);
        assert!(store.get_article("my-post").await.is_err());

        let state = store.state();
        assert!(state.article.is_none());
        assert!(!state.load_article);
        assert!(state.error_article);
    }

    #[tokio::test]
    async fn test_get_article_invalid_slug_never_reaches_api() {
        let store = store(false);
        let err = store.get_article("../etc").await.unwrap_err();
        assert!(matches!(err, EditorError::InvalidSlug(_)));
        assert!(store.state().error_article);
    }

    #[tokio::test]
    async fn test_new_fetch_clears_previous_error() {
        let api = Arc::new(FixedApi {
            fail: AtomicBool::new(true),
        });
        let store = ArticleStore::new(api.clone());
        let _ = store.get_article("a").await;
        assert!(store.state().error_article);

        let mut rx = store.subscribe();
        api.fail.store(false, Ordering::SeqCst);
        store.get_article("b").await.unwrap();

        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update();
        assert!(!state.error_article);
        assert_eq!(state.article.as_ref().unwrap().slug, "b");
    }

    #[tokio::test]
    async fn test_add_and_edit_article() {
        let store = store(false);
        let created = store.add_article(Article::default()).await.unwrap();
        assert_eq!(created.slug, "created");
        assert_eq!(store.state().article.unwrap().slug, "created");

        let updated = store.edit_article(Article::default(), "created").await.unwrap();
        assert_eq!(updated.slug, "created");
        assert!(!store.state().error_article);
    }

    #[tokio::test]
    async fn test_write_failure_sets_error() {
        let store = store(true);
        assert!(store.add_article(Article::default()).await.is_err());
        assert!(store.state().error_article);
        assert!(store.edit_article(Article::default(), "x").await.is_err());
        assert!(store.state().error_article);
    }

    #[tokio::test]
    async fn test_user_name() {
        let store = store(false).with_user("jake");
        assert_eq!(store.state().user_name.as_deref(), Some("jake"));
        store.set_user(None);
        assert!(store.state().user_name.is_none());
    }
}
