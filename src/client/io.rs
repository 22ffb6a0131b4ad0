//! Request building and response decoding shared by all article operations
//!
//! - URL construction with the slug percent-encoded as one path segment
//! - `Authorization: Token <jwt>` header
//! - Status code classification into [`EditorError`] variants

use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use tracing::{trace, warn};

use super::HttpArticleClient;
use crate::article::PublishedArticle;
use crate::response::{parse_error_body, ArticleEnvelope};
use crate::{EditorError, Result};

/// Longest response body quoted in an error message
const MAX_ERROR_BODY_CHARS: usize = 200;

impl HttpArticleClient {
    /// `{base}/articles` or `{base}/articles/{slug}`
    pub(super) fn articles_url(&self, slug: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                EditorError::Config(format!("base URL {} cannot be a base", self.base_url))
            })?;
            segments.pop_if_empty().push("articles");
            if let Some(slug) = slug {
                segments.push(slug);
            }
        }
        Ok(url)
    }

    /// Attach the token header when configured
    pub(super) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.token.as_deref() {
            Some(token) => request.header(AUTHORIZATION, format!("Token {token}")),
            None => request,
        }
    }

    /// Send a request and decode an `{"article": ...}` body
    ///
    /// `slug` is only used to label a 404.
    pub(super) async fn send_for_article(
        &self,
        request: RequestBuilder,
        slug: Option<&str>,
    ) -> Result<PublishedArticle> {
        let response = self.authorize(request).send().await?;
        read_article(response, slug).await
    }
}

async fn read_article(response: Response, slug: Option<&str>) -> Result<PublishedArticle> {
    let status = response.status();
    let body = response.text().await?;
    trace!(%status, bytes = body.len(), "Received response");

    if !status.is_success() {
        let err = classify_error(status, &body, slug);
        warn!(%status, error = %err, "Article request failed");
        return Err(err);
    }

    let envelope: ArticleEnvelope<PublishedArticle> = serde_json::from_str(&body)
        .map_err(|e| EditorError::InvalidResponse(format!("malformed article body: {e}")))?;
    Ok(envelope.article)
}

/// Maps a non-success status and its body to an error
pub(super) fn classify_error(status: StatusCode, body: &str, slug: Option<&str>) -> EditorError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            EditorError::Unauthorized(describe(status, body))
        }
        StatusCode::NOT_FOUND => {
            EditorError::NotFound(slug.map_or_else(|| describe(status, body), str::to_string))
        }
        StatusCode::UNPROCESSABLE_ENTITY => {
            let errors = parse_error_body(body);
            if errors.is_empty() {
                EditorError::Api {
                    status: status.as_u16(),
                    message: describe(status, body),
                }
            } else {
                EditorError::Rejected(errors)
            }
        }
        _ => EditorError::Api {
            status: status.as_u16(),
            message: describe(status, body),
        },
    }
}

/// Short human-readable message: the trimmed body if any, else the reason phrase
fn describe(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return status.canonical_reason().unwrap_or("unknown status").to_string();
    }
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
