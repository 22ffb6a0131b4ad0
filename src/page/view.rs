//! Render output of the article form page
//!
//! A `View` is a plain description of what to draw. Front ends map it to
//! widgets; `Display` gives a plain-text rendering for terminals and logs.

use std::fmt;

use uuid::Uuid;

use crate::form::{FormState, TextField};
use crate::validation::{Field, ValidationErrors};

/// Form heading, shown for both create and edit
pub const HEADING: &str = "Create new article";
/// Heading above the tag rows
pub const TAGS_HEADING: &str = "Tags";
/// Submit button label
pub const SUBMIT_LABEL: &str = "Create";
/// Per-row delete button label
pub const DELETE_TAG_LABEL: &str = "Delete";
/// Add button label, shown on the last row only
pub const ADD_TAG_LABEL: &str = "Add tag";

/// What the page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Article is loading
    Spinner,
    /// The store reported a failure
    Error {
        /// Localized message
        message: String,
    },
    /// The editable form
    Form(FormView),
}

impl View {
    /// True for the loading state
    pub fn is_spinner(&self) -> bool {
        matches!(self, View::Spinner)
    }

    /// True for the error state
    pub fn is_error(&self) -> bool {
        matches!(self, View::Error { .. })
    }

    /// The form, if rendered
    pub fn as_form(&self) -> Option<&FormView> {
        match self {
            View::Form(form) => Some(form),
            _ => None,
        }
    }
}

/// Input widget kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Single-line input
    Text,
    /// Multi-line input
    TextArea,
}

/// A labeled input with its inline error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    /// Bound field
    pub field: Field,
    /// Label above the input
    pub label: Option<&'static str>,
    /// Placeholder text
    pub placeholder: &'static str,
    /// Widget kind
    pub kind: InputKind,
    /// Current value
    pub value: String,
    /// Inline validation message
    pub error: Option<String>,
    /// Focus on first render
    pub autofocus: bool,
}

/// One tag row: input, delete button and, on the last row, the add button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRowView {
    /// Stable render key
    pub key: Uuid,
    /// Tag input
    pub input: InputView,
    /// Show the add button after this row
    pub show_add: bool,
}

/// The article form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// Page heading
    pub heading: &'static str,
    /// Title, description and text inputs, in order
    pub fields: Vec<InputView>,
    /// Heading above the tags
    pub tags_heading: &'static str,
    /// Tag rows, in order
    pub tags: Vec<TagRowView>,
    /// Submit button label
    pub submit_label: &'static str,
}

impl FormView {
    /// Build the view from form values and the current inline errors
    pub fn new(form: &FormState, errors: &ValidationErrors) -> Self {
        let error_for = |field: Field| errors.get(field).map(|e| e.message.clone());

        let fields = TextField::ALL
            .into_iter()
            .map(|text_field| {
                let field = Field::from(text_field);
                let (placeholder, kind) = match text_field {
                    TextField::Title => ("Title", InputKind::Text),
                    TextField::Description => ("Short description", InputKind::Text),
                    TextField::Text => ("Text", InputKind::TextArea),
                };
                InputView {
                    field,
                    label: Some(field.label()),
                    placeholder,
                    kind,
                    value: form.value(text_field).to_string(),
                    error: error_for(field),
                    autofocus: text_field == TextField::Title,
                }
            })
            .collect();

        let last = form.tags().len().saturating_sub(1);
        let tags = form
            .tags()
            .iter()
            .enumerate()
            .map(|(index, slot)| TagRowView {
                key: slot.id(),
                input: InputView {
                    field: Field::Tag(index),
                    label: None,
                    placeholder: "Tag",
                    kind: InputKind::Text,
                    value: slot.tag.clone(),
                    error: error_for(Field::Tag(index)),
                    autofocus: false,
                },
                show_add: index == last,
            })
            .collect();

        Self {
            heading: HEADING,
            fields,
            tags_heading: TAGS_HEADING,
            tags,
            submit_label: SUBMIT_LABEL,
        }
    }

    /// Input bound to `field`
    pub fn input(&self, field: Field) -> Option<&InputView> {
        match field {
            Field::Tag(index) => self.tags.get(index).map(|row| &row.input),
            _ => self.fields.iter().find(|input| input.field == field),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Spinner => f.write_str("Loading..."),
            View::Error { message } => write!(f, "Error: {message}"),
            View::Form(form) => write!(f, "{form}"),
        }
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        for input in &self.fields {
            writeln!(f, "{}: [{}]", input.label.unwrap_or(input.placeholder), input.value)?;
            if let Some(error) = &input.error {
                writeln!(f, "  ! {error}")?;
            }
        }

        writeln!(f, "{}", self.tags_heading)?;
        for row in &self.tags {
            write!(f, "  [{}] ({DELETE_TAG_LABEL})", row.input.value)?;
            if row.show_add {
                write!(f, " ({ADD_TAG_LABEL})")?;
            }
            writeln!(f)?;
            if let Some(error) = &row.input.error {
                writeln!(f, "    ! {error}")?;
            }
        }

        write!(f, "({})", self.submit_label)
    }
}
