//! Article API and form page configuration

use serde::{Deserialize, Serialize};

use crate::validation::ValidationConfig;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Generic error message shown when the store reports a failed request
pub const DEFAULT_ERROR_MESSAGE: &str = "что-то пошло не так";

/// Route of the article listing view, visited after a submit
pub const ARTICLES_ROUTE: &str = "/articles";

/// Article API configuration
///
/// Contains everything needed to talk to a blog backend's article endpoints.
///
/// # Example
///
/// ```
/// use article_editor::ApiConfig;
///
/// // Anonymous access (read-only on most backends)
/// let config = ApiConfig::new("https://blog.example.com/api");
///
/// // Authenticated access for creating and editing articles
/// let config = ApiConfig::new("https://blog.example.com/api").with_token("jwt.token.here");
/// assert_eq!(config.token.as_deref(), Some("jwt.token.here"));
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root, without the trailing `/articles` (e.g. "https://blog.example.com/api")
    pub base_url: String,

    /// JWT sent as `Authorization: Token <jwt>`
    ///
    /// Creating and editing articles requires a token on every known backend.
    #[serde(default)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Value of the `User-Agent` header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    concat!("article-editor/", env!("CARGO_PKG_VERSION")).to_string()
}

impl ApiConfig {
    /// Create a configuration without credentials
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }

    /// Attach a JWT used for authenticated requests
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Form page configuration
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    /// Message rendered when the store's error flag is set
    pub error_message: String,
    /// Route navigated to after a submit
    pub listing_route: String,
    /// Field validation behavior
    pub validation: ValidationConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            listing_route: ARTICLES_ROUTE.to_string(),
            validation: ValidationConfig::default(),
        }
    }
}

impl PageConfig {
    /// Replace the localized error message
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    /// Replace the validation config
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }
}
