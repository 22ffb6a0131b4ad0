//! Article editor error types

use std::collections::BTreeMap;

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Errors raised by the article API client, the store and the form page
#[derive(Error, Debug)]
pub enum EditorError {
    /// Transport-level HTTP failure (connect, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid or unparseable response body
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid client configuration (e.g. a base URL that cannot be parsed)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Server rejected the credentials (401/403)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// No article with this slug
    #[error("No such article: {0}")]
    NotFound(String),

    /// Server refused the article (422) with per-field messages
    #[error("Article rejected: {}", format_rejections(.0))]
    Rejected(BTreeMap<String, Vec<String>>),

    /// Any other non-success status
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Slug is empty or not URL-safe
    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    /// Form input failed validation
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

fn format_rejections(errors: &BTreeMap<String, Vec<String>>) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{field} {}", messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias using EditorError
pub type Result<T> = std::result::Result<T, EditorError>;
