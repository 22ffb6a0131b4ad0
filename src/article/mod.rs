//! Article payloads
//!
//! - `types`: wire types exchanged with the article API (Article, PublishedArticle, Author)
//! - `builder`: ArticleBuilder for assembling a submit payload from raw input

mod builder;
mod types;

pub use self::builder::ArticleBuilder;
pub use self::types::{Article, Author, PublishedArticle};
