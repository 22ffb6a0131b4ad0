//! Article form validation
//!
//! Field rules for the create/edit article form, plus slug validation for
//! the identifiers used in article URLs.
//!
//! | Field       | Required | Min | Max  |
//! |-------------|----------|-----|------|
//! | Title       | yes      | 3   | 50   |
//! | Description | yes      | 3   | 500  |
//! | Text (body) | yes      | 3   | 3000 |
//! | Tag         | strict   | -   | -    |
//!
//! Lengths are counted in characters and values are checked untrimmed.

use std::collections::BTreeMap;
use std::fmt;

use crate::{EditorError, Result};

/// Message shown for an empty required field
pub const REQUIRED_MESSAGE: &str = "The field must be filled in";

/// Configuration options for validation behavior
///
/// # Examples
///
/// ```
/// use article_editor::validation::ValidationConfig;
///
/// // Every tag slot must be filled (default)
/// let strict = ValidationConfig::strict();
/// assert!(strict.require_tags);
///
/// // Empty tag slots are allowed and dropped from the payload
/// let lenient = ValidationConfig::lenient();
/// assert!(!lenient.require_tags);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// If true, every present tag slot must be non-empty.
    pub require_tags: bool,
}

impl ValidationConfig {
    /// Every tag slot is required
    pub fn strict() -> Self {
        Self { require_tags: true }
    }

    /// Empty tag slots pass validation
    pub fn lenient() -> Self {
        Self {
            require_tags: false,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::strict()
    }
}

/// A validated form field
///
/// Ordered so that errors list in form order: title, description, text,
/// then tags by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Article title
    Title,
    /// Short description
    Description,
    /// Article body
    Text,
    /// Tag slot at the given position
    Tag(usize),
}

impl Field {
    /// Human-readable label, as shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Description => "Short description",
            Field::Text => "Text",
            Field::Tag(_) => "Tag",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Title => f.write_str("title"),
            Field::Description => f.write_str("description"),
            Field::Text => f.write_str("text"),
            Field::Tag(index) => write!(f, "tags.{index}.tag"),
        }
    }
}

/// Constraints declared for a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Empty string is rejected
    pub required: bool,
    /// Minimum length in characters
    pub min_len: Option<usize>,
    /// Maximum length in characters
    pub max_len: Option<usize>,
}

impl FieldRule {
    const fn text(min: usize, max: usize) -> Self {
        Self {
            required: true,
            min_len: Some(min),
            max_len: Some(max),
        }
    }
}

/// Title: required, 3 to 50 characters
pub const TITLE_RULE: FieldRule = FieldRule::text(3, 50);
/// Description: required, 3 to 500 characters
pub const DESCRIPTION_RULE: FieldRule = FieldRule::text(3, 500);
/// Body: required, 3 to 3000 characters
pub const BODY_RULE: FieldRule = FieldRule::text(3, 3000);

/// Returns the rule that applies to `field` under `config`
pub fn rule_for(field: Field, config: &ValidationConfig) -> FieldRule {
    match field {
        Field::Title => TITLE_RULE,
        Field::Description => DESCRIPTION_RULE,
        Field::Text => BODY_RULE,
        Field::Tag(_) => FieldRule {
            required: config.require_tags,
            min_len: None,
            max_len: None,
        },
    }
}

/// Which constraint a value broke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Value is empty
    Required,
    /// Value is shorter than the minimum
    TooShort {
        /// Minimum length in characters
        min: usize,
    },
    /// Value is longer than the maximum
    TooLong {
        /// Maximum length in characters
        max: usize,
    },
}

/// An inline validation error for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Broken constraint
    pub kind: FieldErrorKind,
    /// Message rendered under the input
    pub message: String,
}

impl FieldError {
    fn new(field: Field, kind: FieldErrorKind) -> Self {
        let message = match kind {
            FieldErrorKind::Required => REQUIRED_MESSAGE.to_string(),
            FieldErrorKind::TooShort { min } => {
                format!("{} needs to be at least {min} characters", field.label())
            }
            FieldErrorKind::TooLong { max } => {
                format!("{} must contain no more than {max} characters", field.label())
            }
        };
        Self { kind, message }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Checks `value` against the rule for `field`
///
/// Rules are checked in declaration order (required, min, max) and the first
/// failure wins. An empty optional value skips the length checks.
///
/// # Examples
///
/// ```
/// use article_editor::validation::{validate_field, Field, FieldErrorKind, ValidationConfig};
///
/// let config = ValidationConfig::strict();
/// assert!(validate_field(Field::Title, "Hello", &config).is_ok());
///
/// let err = validate_field(Field::Title, "Hi", &config).unwrap_err();
/// assert_eq!(err.kind, FieldErrorKind::TooShort { min: 3 });
/// assert_eq!(err.message, "Title needs to be at least 3 characters");
/// ```
pub fn validate_field(
    field: Field,
    value: &str,
    config: &ValidationConfig,
) -> std::result::Result<(), FieldError> {
    let rule = rule_for(field, config);

    if value.is_empty() {
        if rule.required {
            return Err(FieldError::new(field, FieldErrorKind::Required));
        }
        return Ok(());
    }

    let len = value.chars().count();
    if let Some(min) = rule.min_len
        && len < min
    {
        return Err(FieldError::new(field, FieldErrorKind::TooShort { min }));
    }
    if let Some(max) = rule.max_len
        && len > max
    {
        return Err(FieldError::new(field, FieldErrorKind::TooLong { max }));
    }

    Ok(())
}

/// Per-field errors collected from a whole-form validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationErrors {
    /// Create an empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`, replacing any previous one
    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }

    /// Error recorded for `field`, if any
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Number of fields with errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True if no field failed
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate errors in form order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }

    /// Drop the error recorded for `field`
    pub fn remove(&mut self, field: Field) -> Option<FieldError> {
        self.errors.remove(&field)
    }

    /// Drop the error of the removed tag row and move later tag errors up one
    /// position, so they stay attached to the same rows
    pub fn remove_tag(&mut self, index: usize) {
        let errors = std::mem::take(&mut self.errors);
        self.errors = errors
            .into_iter()
            .filter_map(|(field, error)| match field {
                Field::Tag(i) if i == index => None,
                Field::Tag(i) if i > index => Some((Field::Tag(i - 1), error)),
                _ => Some((field, error)),
            })
            .collect();
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates an article slug
///
/// Slugs end up as a URL path segment, so they must be non-empty and made of
/// ASCII letters, digits, `-` and `_`.
///
/// # Examples
///
/// ```
/// use article_editor::validation::validate_slug;
///
/// assert!(validate_slug("how-to-train-your-dragon-x1f3").is_ok());
/// assert!(validate_slug("").is_err());
/// assert!(validate_slug("../admin").is_err());
/// assert!(validate_slug("with space").is_err());
/// ```
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() {
        return Err(EditorError::InvalidSlug("slug cannot be empty".to_string()));
    }

    if let Some(ch) = slug
        .chars()
        .find(|ch| !(ch.is_ascii_alphanumeric() || *ch == '-' || *ch == '_'))
    {
        return Err(EditorError::InvalidSlug(format!(
            "invalid character {ch:?} in {slug:?} (only ASCII letters, digits, - and _ allowed)"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> ValidationConfig {
        ValidationConfig::strict()
    }

    #[test]
    fn test_required_fields() {
        for field in [Field::Title, Field::Description, Field::Text] {
            let err = validate_field(field, "", &strict()).unwrap_err();
            assert_eq!(err.kind, FieldErrorKind::Required);
            assert_eq!(err.message, REQUIRED_MESSAGE);
        }
    }

    #[test]
    fn test_title_bounds() {
        assert!(validate_field(Field::Title, "abc", &strict()).is_ok());
        assert!(validate_field(Field::Title, &"a".repeat(50), &strict()).is_ok());

        let err = validate_field(Field::Title, "ab", &strict()).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::TooShort { min: 3 });

        let err = validate_field(Field::Title, &"a".repeat(51), &strict()).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::TooLong { max: 50 });
        assert_eq!(err.message, "Title must contain no more than 50 characters");
    }

    #[test]
    fn test_description_bounds() {
        assert!(validate_field(Field::Description, &"d".repeat(500), &strict()).is_ok());
        let err = validate_field(Field::Description, &"d".repeat(501), &strict()).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::TooLong { max: 500 });
        let err = validate_field(Field::Description, "dd", &strict()).unwrap_err();
        assert_eq!(
            err.message,
            "Short description needs to be at least 3 characters"
        );
    }

    #[test]
    fn test_body_bounds() {
        assert!(validate_field(Field::Text, &"b".repeat(3000), &strict()).is_ok());
        let err = validate_field(Field::Text, &"b".repeat(3001), &strict()).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::TooLong { max: 3000 });
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 3 Cyrillic letters are 6 bytes
        assert!(validate_field(Field::Title, "где", &strict()).is_ok());
        assert!(validate_field(Field::Title, &"я".repeat(50), &strict()).is_ok());
    }

    #[test]
    fn test_whitespace_is_not_trimmed() {
        assert!(validate_field(Field::Title, "   ", &strict()).is_ok());
        assert!(validate_field(Field::Tag(0), " ", &strict()).is_ok());
    }

    #[test]
    fn test_tag_required_in_strict_mode() {
        let err = validate_field(Field::Tag(2), "", &strict()).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::Required);
        assert!(validate_field(Field::Tag(2), "rust", &strict()).is_ok());
    }

    #[test]
    fn test_tag_optional_in_lenient_mode() {
        let lenient = ValidationConfig::lenient();
        assert!(validate_field(Field::Tag(0), "", &lenient).is_ok());
        // Text fields stay required
        assert!(validate_field(Field::Title, "", &lenient).is_err());
    }

    #[test]
    fn test_field_ordering() {
        let mut fields = vec![Field::Tag(1), Field::Text, Field::Tag(0), Field::Title];
        fields.sort();
        assert_eq!(
            fields,
            vec![Field::Title, Field::Text, Field::Tag(0), Field::Tag(1)]
        );
    }

    #[test]
    fn test_validation_errors_display() {
        let mut errors = ValidationErrors::new();
        errors.insert(
            Field::Tag(1),
            FieldError::new(Field::Tag(1), FieldErrorKind::Required),
        );
        errors.insert(
            Field::Title,
            FieldError::new(Field::Title, FieldErrorKind::TooShort { min: 3 }),
        );
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "title: Title needs to be at least 3 characters; tags.1.tag: The field must be filled in"
        );
    }

    #[test]
    fn test_remove_tag_shifts_later_errors() {
        let required = |index| FieldError::new(Field::Tag(index), FieldErrorKind::Required);
        let mut errors = ValidationErrors::new();
        errors.insert(Field::Title, FieldError::new(Field::Title, FieldErrorKind::Required));
        errors.insert(Field::Tag(0), required(0));
        errors.insert(Field::Tag(1), required(1));
        errors.insert(Field::Tag(3), required(3));

        errors.remove_tag(1);

        let fields: Vec<Field> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec![Field::Title, Field::Tag(0), Field::Tag(2)]);

        assert!(errors.remove(Field::Title).is_some());
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("abc").is_ok());
        assert!(validate_slug("my_article-42").is_ok());
        assert!(matches!(validate_slug(""), Err(EditorError::InvalidSlug(_))));
        assert!(validate_slug("a/b").is_err());
        assert!(validate_slug("a?b=c").is_err());
        assert!(validate_slug("статья").is_err());
    }

    #[test]
    fn test_validation_config_default() {
        assert_eq!(ValidationConfig::default(), ValidationConfig::strict());
    }
}
