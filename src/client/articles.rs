//! Article retrieval (`GET /articles/{slug}`)

use tracing::debug;

use super::HttpArticleClient;
use crate::article::PublishedArticle;
use crate::Result;

impl HttpArticleClient {
    /// Fetch an article by slug
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`EditorError::NotFound`](crate::EditorError::NotFound) - No article has this slug
    /// - [`EditorError::Api`](crate::EditorError::Api) - Server returned an unexpected status
    /// - [`EditorError::Http`](crate::EditorError::Http) - Transport failure or timeout
    pub async fn fetch_article(&self, slug: &str) -> Result<PublishedArticle> {
        debug!(slug, "Fetching article");

        let url = self.articles_url(Some(slug))?;
        let article = self.send_for_article(self.http.get(url), Some(slug)).await?;

        debug!(slug, tags = article.article.tag_list.len(), "Article fetched");
        Ok(article)
    }
}
