//! Form values and tag slots

use uuid::Uuid;

use crate::article::{Article, ArticleBuilder};
use crate::validation::{validate_field, Field, FieldError, ValidationConfig, ValidationErrors};

/// One of the three free-text inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    /// Title input
    Title,
    /// Short description input
    Description,
    /// Body textarea
    Text,
}

impl TextField {
    /// All text fields in form order
    pub const ALL: [TextField; 3] = [TextField::Title, TextField::Description, TextField::Text];
}

impl From<TextField> for Field {
    fn from(field: TextField) -> Self {
        match field {
            TextField::Title => Field::Title,
            TextField::Description => Field::Description,
            TextField::Text => Field::Text,
        }
    }
}

/// A single tag input row
///
/// The id is stable for the lifetime of the row and is used as its render
/// key, so removing a row never re-keys the ones after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSlot {
    id: Uuid,
    /// Raw input value
    pub tag: String,
}

impl TagSlot {
    fn new(tag: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tag: tag.into(),
        }
    }

    /// Render key
    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// Values of the article form for one edit session
///
/// There is always at least one tag slot; the first slot cannot be removed.
///
/// # Example
///
/// ```
/// use article_editor::form::FormState;
///
/// let mut form = FormState::new();
/// assert_eq!(form.tags().len(), 1);
///
/// form.append_tag("");
/// form.set_tag(1, " rust ");
/// assert!(!form.remove_tag(0)); // first slot stays
///
/// let article = form.to_article();
/// assert_eq!(article.tag_list, vec!["rust"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Title input
    pub title: String,
    /// Short description input
    pub description: String,
    /// Body textarea; sent as the article body
    pub text: String,
    tags: Vec<TagSlot>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// Empty form with a single empty tag slot
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            text: String::new(),
            tags: vec![TagSlot::new("")],
        }
    }

    /// Current value of a text field
    pub fn value(&self, field: TextField) -> &str {
        match field {
            TextField::Title => &self.title,
            TextField::Description => &self.description,
            TextField::Text => &self.text,
        }
    }

    /// Replace the value of a text field
    pub fn set_value(&mut self, field: TextField, value: impl Into<String>) {
        let slot = match field {
            TextField::Title => &mut self.title,
            TextField::Description => &mut self.description,
            TextField::Text => &mut self.text,
        };
        *slot = value.into();
    }

    /// Tag slots in display order
    pub fn tags(&self) -> &[TagSlot] {
        &self.tags
    }

    /// Value of the tag slot at `index`
    pub fn tag(&self, index: usize) -> Option<&str> {
        self.tags.get(index).map(|slot| slot.tag.as_str())
    }

    /// Replace the value of the tag slot at `index`
    ///
    /// Returns false if there is no such slot.
    pub fn set_tag(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.tags.get_mut(index) {
            Some(slot) => {
                slot.tag = value.into();
                true
            }
            None => false,
        }
    }

    /// Append a tag slot at the end
    pub fn append_tag(&mut self, tag: impl Into<String>) {
        self.tags.push(TagSlot::new(tag));
    }

    /// Remove the tag slot at `index`
    ///
    /// Index 0 is never removed. Returns true if a slot was removed.
    pub fn remove_tag(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.tags.len() {
            return false;
        }
        self.tags.remove(index);
        true
    }

    /// Replace every tag slot with one per tag, plus a trailing empty slot
    pub fn replace_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.clear();
        self.tags.extend(tags.into_iter().map(TagSlot::new));
        self.tags.push(TagSlot::new(""));
    }

    /// Load an existing article into the form
    pub fn populate(&mut self, article: &Article) {
        self.title.clone_from(&article.title);
        self.description.clone_from(&article.description);
        self.text.clone_from(&article.body);
        self.replace_tags(article.tag_list.iter().cloned());
    }

    /// Current value of any validated field
    ///
    /// Returns `None` for a tag index past the end.
    pub fn field_value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => Some(&self.title),
            Field::Description => Some(&self.description),
            Field::Text => Some(&self.text),
            Field::Tag(index) => self.tag(index),
        }
    }

    /// Validate a single field
    pub fn validate_field(
        &self,
        field: Field,
        config: &ValidationConfig,
    ) -> std::result::Result<(), FieldError> {
        match self.field_value(field) {
            Some(value) => validate_field(field, value, config),
            None => Ok(()),
        }
    }

    /// Validate every field, collecting all failures
    pub fn validate(&self, config: &ValidationConfig) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let fields = TextField::ALL
            .into_iter()
            .map(Field::from)
            .chain((0..self.tags.len()).map(Field::Tag));
        for field in fields {
            if let Err(error) = self.validate_field(field, config) {
                errors.insert(field, error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Build the submit payload: body from the text input, tags trimmed and
    /// blank ones dropped
    pub fn to_article(&self) -> Article {
        ArticleBuilder::new()
            .title(self.title.as_str())
            .description(self.description.as_str())
            .body(self.text.as_str())
            .tags(self.tags.iter().map(|slot| slot.tag.as_str()))
            .build()
    }
}
