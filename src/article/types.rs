//! Article type definitions
//!
//! JSON field names follow the blog API convention (`tagList`, `createdAt`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Article payload sent when creating or editing
///
/// # Examples
///
/// ```
/// use article_editor::article::Article;
///
/// let article = Article {
///     title: "How to train your dragon".to_string(),
///     description: "Ever wonder how?".to_string(),
///     body: "You have to believe".to_string(),
///     tag_list: vec!["dragons".to_string(), "training".to_string()],
/// };
///
/// let json = serde_json::to_value(&article).unwrap();
/// assert_eq!(json["tagList"][0], "dragons");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Headline
    pub title: String,
    /// Short description shown in listings
    #[serde(default)]
    pub description: String,
    /// Markdown body
    #[serde(default)]
    pub body: String,
    /// Ordered topical tags
    #[serde(default)]
    pub tag_list: Vec<String>,
}

/// Author profile attached to a published article
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Login name
    pub username: String,
    /// Profile text
    #[serde(default)]
    pub bio: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub image: Option<String>,
    /// Whether the current user follows the author
    #[serde(default)]
    pub following: bool,
}

/// Article as stored by the server
///
/// The editable fields are flattened from [`Article`]; everything else is
/// server-managed metadata and defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedArticle {
    /// URL-safe identifier
    pub slug: String,

    /// Editable content
    #[serde(flatten)]
    pub article: Article,

    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Favorited by the current user
    #[serde(default)]
    pub favorited: bool,

    /// Number of users who favorited the article
    #[serde(default)]
    pub favorites_count: u64,

    /// Author profile
    #[serde(default)]
    pub author: Option<Author>,
}

impl PublishedArticle {
    /// Author's username, if the server sent a profile
    pub fn author_name(&self) -> Option<&str> {
        self.author.as_ref().map(|author| author.username.as_str())
    }
}
