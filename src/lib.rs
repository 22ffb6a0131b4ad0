#![doc = include_str!("../README.md")]

/// Article payload types and builder
pub mod article;
/// Article API client
pub mod client;
mod config;
mod error;
/// Form values and tag slots
pub mod form;
/// Create/edit article form page
pub mod page;
/// Article API response bodies
pub mod response;
/// Global article state and actions
pub mod store;
/// Form field and slug validation
pub mod validation;

pub use article::{Article, ArticleBuilder, Author, PublishedArticle};
pub use client::{ArticleApi, HttpArticleClient};
pub use config::{ApiConfig, PageConfig, ARTICLES_ROUTE, DEFAULT_ERROR_MESSAGE, DEFAULT_TIMEOUT_SECS};
pub use error::{EditorError, Result};
pub use form::{FormState, TagSlot, TextField};
pub use page::{ArticleFormPage, History, Navigator, Submission, View};
pub use store::{ArticleState, ArticleStore};
pub use validation::{
    validate_field, validate_slug, Field, FieldError, FieldErrorKind, ValidationConfig,
    ValidationErrors,
};
