use tracing::{debug, info};

use super::HttpArticleClient;
use crate::article::{Article, PublishedArticle};
use crate::response::ArticleEnvelope;
use crate::Result;

impl HttpArticleClient {
    /// Create an article (`POST /articles`)
    ///
    /// The body is sent as `{"article": {...}}`. Most backends require a token.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`EditorError::Unauthorized`](crate::EditorError::Unauthorized) - Missing or rejected token
    /// - [`EditorError::Rejected`](crate::EditorError::Rejected) - Server refused the fields (422)
    /// - [`EditorError::Api`](crate::EditorError::Api) - Server returned an unexpected status
    /// - [`EditorError::Http`](crate::EditorError::Http) - Transport failure or timeout
    pub async fn post_article(&self, article: &Article) -> Result<PublishedArticle> {
        debug!(title = %article.title, "Posting article");

        let url = self.articles_url(None)?;
        let request = self.http.post(url).json(&ArticleEnvelope { article });
        let created = self.send_for_article(request, None).await?;

        info!(slug = %created.slug, "Article created");
        Ok(created)
    }

    /// Update the article at `slug` (`PUT /articles/{slug}`)
    ///
    /// The server may assign a new slug when the title changes; the returned
    /// article carries the current one.
    ///
    /// # Errors
    ///
    /// Same as [`post_article`](Self::post_article), plus
    /// [`EditorError::NotFound`](crate::EditorError::NotFound) when no article has this slug.
    pub async fn put_article(&self, article: &Article, slug: &str) -> Result<PublishedArticle> {
        debug!(slug, title = %article.title, "Updating article");

        let url = self.articles_url(Some(slug))?;
        let request = self.http.put(url).json(&ArticleEnvelope { article });
        let updated = self.send_for_article(request, Some(slug)).await?;

        info!(slug, new_slug = %updated.slug, "Article updated");
        Ok(updated)
    }
}
