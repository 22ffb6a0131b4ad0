//! Create/edit article form page
//!
//! [`ArticleFormPage`] binds a [`FormState`] to the [`ArticleStore`]:
//!
//! - `mount(Some(slug))` requests the article; `sync()` copies it into the
//!   form once it arrives
//! - user input goes through `set_value`, `set_tag`, `blur`, `add_tag` and
//!   `delete_tag`
//! - `submit()` validates, dispatches create or edit in the background and
//!   navigates to the listing route
//! - `render()` yields a spinner, the error message or the form
//!
//! Background requests are spawned on the current Tokio runtime and never
//! awaited by the page itself; `settle()` waits for them.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use article_editor::page::{ArticleFormPage, History};
//! use article_editor::{ApiConfig, ArticleStore, HttpArticleClient, TextField};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpArticleClient::new(ApiConfig::new("https://blog.example.com/api").with_token("jwt"))?;
//! let store = ArticleStore::new(Arc::new(client));
//!
//! let mut page = ArticleFormPage::new(store, History::new());
//! page.mount(None);
//! page.set_value(TextField::Title, "Hello world");
//! page.set_value(TextField::Description, "First post");
//! page.set_value(TextField::Text, "Lorem ipsum dolor sit amet");
//! page.set_tag(0, "intro");
//!
//! page.submit()?;
//! page.settle().await;
//! assert_eq!(page.navigator().current(), Some("/articles"));
//! # Ok(())
//! # }
//! ```

mod navigation;
mod view;

pub use self::navigation::{History, Navigator};
pub use self::view::{
    FormView, InputKind, InputView, TagRowView, View, ADD_TAG_LABEL, DELETE_TAG_LABEL, HEADING,
    SUBMIT_LABEL, TAGS_HEADING,
};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::article::Article;
use crate::config::PageConfig;
use crate::form::{FormState, TextField};
use crate::store::ArticleStore;
use crate::validation::{Field, ValidationErrors};
use crate::{EditorError, Result};

/// Outcome of a successful submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A create request was dispatched
    Created,
    /// An edit request was dispatched for this slug
    Updated {
        /// Slug the page was mounted with
        slug: String,
    },
}

/// Headless create/edit article form
pub struct ArticleFormPage<N: Navigator = History> {
    store: ArticleStore,
    navigator: N,
    config: PageConfig,
    /// Identifier from the route; `None` when creating
    slug: Option<String>,
    form: FormState,
    errors: ValidationErrors,
    /// Set by the first submit; edits re-validate from then on
    submitted: bool,
    /// Article content last copied into the form
    applied: Option<Article>,
    tasks: Vec<JoinHandle<()>>,
}

impl<N: Navigator> ArticleFormPage<N> {
    /// Create an unmounted page with an empty form
    pub fn new(store: ArticleStore, navigator: N) -> Self {
        Self {
            store,
            navigator,
            config: PageConfig::default(),
            slug: None,
            form: FormState::new(),
            errors: ValidationErrors::new(),
            submitted: false,
            applied: None,
            tasks: Vec::new(),
        }
    }

    /// Replace the page configuration
    #[must_use]
    pub fn with_config(mut self, config: PageConfig) -> Self {
        self.config = config;
        self
    }

    /// Mount the page for a route
    ///
    /// Starts a fresh form. With a slug the store is marked as loading right
    /// away and the article is requested in the background. Must be called
    /// from within a Tokio runtime.
    pub fn mount(&mut self, slug: Option<String>) {
        self.slug = slug;
        self.applied = None;
        self.form = FormState::new();
        self.errors = ValidationErrors::new();
        self.submitted = false;

        if let Some(slug) = self.slug.clone() {
            debug!(slug = %slug, "Mounting edit form");
            // nothing fetched before this mount may reach the form
            self.store.begin_load();
            let store = self.store.clone();
            self.spawn(async move {
                // failures land in the store's error flag
                let _ = store.get_article(&slug).await;
            });
        } else {
            debug!("Mounting create form");
        }
    }

    /// Copy a newly received article into the form
    ///
    /// Only applies when editing, the store holds the article for this
    /// route's slug, and it differs from the one applied last. Returns true if
    /// the form was repopulated.
    pub fn sync(&mut self) -> bool {
        let Some(slug) = self.slug.as_deref() else {
            return false;
        };

        let state = self.store.state();
        let Some(published) = state.article else {
            return false;
        };
        if published.slug != slug || self.applied.as_ref() == Some(&published.article) {
            return false;
        }

        debug!(slug = %published.slug, tags = published.article.tag_list.len(), "Populating form");
        self.form.populate(&published.article);
        self.errors = ValidationErrors::new();
        self.applied = Some(published.article);
        true
    }

    /// Route identifier the page was mounted with
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    /// Current form values
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Current inline errors
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Page configuration
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Navigation target
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Store the page reads from
    pub fn store(&self) -> &ArticleStore {
        &self.store
    }

    /// Edit a text field
    pub fn set_value(&mut self, field: TextField, value: impl Into<String>) {
        self.form.set_value(field, value);
        if self.submitted {
            self.revalidate(field.into());
        }
    }

    /// Edit the tag at `index`; ignored if there is no such row
    pub fn set_tag(&mut self, index: usize, value: impl Into<String>) {
        if self.form.set_tag(index, value) && self.submitted {
            self.revalidate(Field::Tag(index));
        }
    }

    /// Input lost focus: validate it
    pub fn blur(&mut self, field: Field) {
        self.revalidate(field);
    }

    /// Append an empty tag row
    pub fn add_tag(&mut self) {
        self.form.append_tag("");
    }

    /// Remove the tag row at `index`
    ///
    /// The first row cannot be removed. Returns true if a row was removed.
    pub fn delete_tag(&mut self, index: usize) -> bool {
        if !self.form.remove_tag(index) {
            return false;
        }
        self.errors.remove_tag(index);
        true
    }

    /// Validate and submit the form
    ///
    /// On success the create or edit request is spawned on the current Tokio
    /// runtime and the navigator is sent to the listing route without waiting
    /// for the response.
    ///
    /// # Errors
    ///
    /// [`EditorError::Validation`] with every failing field. Nothing is
    /// dispatched and no navigation happens.
    pub fn submit(&mut self) -> Result<Submission> {
        self.submitted = true;

        if let Err(errors) = self.form.validate(&self.config.validation) {
            debug!(fields = errors.len(), "Submit blocked by validation");
            self.errors = errors.clone();
            return Err(EditorError::Validation(errors));
        }
        self.errors = ValidationErrors::new();

        let article = self.form.to_article();
        let store = self.store.clone();
        let submission = match self.slug.clone() {
            None => {
                self.spawn(async move {
                    let _ = store.add_article(article).await;
                });
                Submission::Created
            }
            Some(slug) => {
                let target = slug.clone();
                self.spawn(async move {
                    let _ = store.edit_article(article, &target).await;
                });
                Submission::Updated { slug }
            }
        };

        self.navigator.navigate(&self.config.listing_route);
        Ok(submission)
    }

    /// Wait for every background request spawned by this page
    pub async fn settle(&mut self) {
        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                warn!(error = %e, "Background article task failed");
            }
        }
    }

    /// True while the article for this route is loading
    ///
    /// The store's flag is ignored when creating.
    pub fn is_loading(&self) -> bool {
        self.slug.is_some() && self.store.state().load_article
    }

    /// Render the page
    pub fn render(&self) -> View {
        let state = self.store.state();
        if self.slug.is_some() && state.load_article {
            return View::Spinner;
        }
        if state.error_article {
            return View::Error {
                message: self.config.error_message.clone(),
            };
        }
        View::Form(FormView::new(&self.form, &self.errors))
    }

    /// Track a background request, forgetting the ones already finished
    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.retain(|handle| !handle.is_finished());
        self.tasks.push(tokio::spawn(task));
    }

    fn revalidate(&mut self, field: Field) {
        match self.form.validate_field(field, &self.config.validation) {
            Ok(()) => {
                self.errors.remove(field);
            }
            Err(error) => self.errors.insert(field, error),
        }
    }
}

impl<N: Navigator> Drop for ArticleFormPage<N> {
    fn drop(&mut self) {
        if !self.tasks.is_empty() {
            debug!(pending = self.tasks.len(), "Form page dropped with requests in flight");
        }
    }
}
