//! Article editor example
//!
//! Creates an article through the form page, or edits one when a slug is
//! given, and prints each rendered view.
//!
//! Run with: cargo run --example editor -- [slug]

use std::sync::Arc;

use article_editor::{
    ApiConfig, ArticleFormPage, ArticleStore, EditorError, History, HttpArticleClient, TextField,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let base_url = std::env::var("ARTICLE_API_URL")
        .unwrap_or_else(|_| "http://localhost:3000/api".to_string());
    let mut config = ApiConfig::new(base_url);
    if let Ok(token) = std::env::var("ARTICLE_API_TOKEN") {
        config = config.with_token(token);
    }

    println!("Using {}", config.base_url);
    let client = HttpArticleClient::new(config)?;
    let store = ArticleStore::new(Arc::new(client));
    let mut page = ArticleFormPage::new(store, History::new());

    let slug = std::env::args().nth(1);
    page.mount(slug.clone());
    println!("{}\n", page.render());

    page.settle().await;
    if page.sync() {
        println!("Loaded {}", slug.as_deref().unwrap_or_default());
    }
    println!("{}\n", page.render());

    if slug.is_none() {
        page.set_value(TextField::Title, "Hello from article-editor");
        page.set_value(TextField::Description, "A demo article");
        page.set_value(TextField::Text, "Written through the headless form page.");
        page.set_tag(0, "demo");
    } else {
        let text = format!("{}\n\nEdited from the demo.", page.form().text);
        page.set_value(TextField::Text, text);

        // every tag row is required: drop the empty "add next" row
        let last = page.form().tags().len() - 1;
        if !page.delete_tag(last) && page.form().tags()[0].tag.is_empty() {
            page.set_tag(0, "demo");
        }
    }

    match page.submit() {
        Ok(submission) => println!("Submitted: {submission:?}"),
        Err(EditorError::Validation(errors)) => {
            println!("Form has errors: {errors}");
            println!("{}", page.render());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    page.settle().await;
    println!("Now at {:?}", page.navigator().current());
    println!("{}", page.render());

    Ok(())
}
