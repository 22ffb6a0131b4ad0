//! Route navigation

/// Moves the host application to another route
pub trait Navigator: Send {
    /// Navigate to `path`
    fn navigate(&mut self, path: &str);
}

/// In-memory navigation history
///
/// # Example
///
/// ```
/// use article_editor::page::{History, Navigator};
///
/// let mut history = History::new();
/// history.navigate("/articles");
/// assert_eq!(history.current(), Some("/articles"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    /// Empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent route
    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// Every visited route, oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Navigator for History {
    fn navigate(&mut self, path: &str) {
        self.entries.push(path.to_string());
    }
}
