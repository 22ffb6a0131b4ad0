//! Article builder for assembling submit payloads
//!
//! Tags are normalised on build: each is trimmed and blank ones are dropped,
//! keeping the original order.

use super::types::Article;

#[must_use]
#[derive(Debug, Clone, Default)]
pub struct ArticleBuilder {
    title: String,
    description: String,
    body: String,
    tags: Vec<String>,
}

impl ArticleBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the short description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the body text
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Append a single raw tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Append several raw tags
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Build the payload
    ///
    /// Text fields are passed through untouched; validation is the form's job.
    pub fn build(self) -> Article {
        let tag_list = self
            .tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        Article {
            title: self.title,
            description: self.description,
            body: self.body,
            tag_list,
        }
    }
}
