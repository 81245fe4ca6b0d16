//! Access to rendered page HTML.
//!
//! The markup engine renders each page to `<page>.html` before page data is
//! generated. [`HtmlSource`] hides where that output lives so generation can
//! be tested without a build directory.

use std::path::PathBuf;

/// Error reading a rendered page.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// No rendered output exists for the page.
    #[error("rendered HTML not found for page '{0}'")]
    NotFound(String),
    /// Rendered output exists but could not be read.
    #[error("cannot read rendered HTML for page '{page}': {source}")]
    Io {
        /// Page name.
        page: String,
        /// Underlying error.
        source: std::io::Error,
    },
}

/// Provider of rendered page HTML.
pub trait HtmlSource {
    /// Read the full rendered HTML document for `page`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotFound`] if the page was never rendered, or
    /// [`SourceError::Io`] if reading fails.
    fn read_html(&self, page: &str) -> Result<String, SourceError>;
}

/// Reads `<root>/<page>.html` from the filesystem.
#[derive(Clone, Debug)]
pub struct FsHtmlSource {
    root: PathBuf,
}

impl FsHtmlSource {
    /// Create a source rooted at the HTML output directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl HtmlSource for FsHtmlSource {
    fn read_html(&self, page: &str) -> Result<String, SourceError> {
        let path = self.root.join(format!("{page}.html"));
        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(page.to_owned())
            } else {
                SourceError::Io {
                    page: page.to_owned(),
                    source,
                }
            }
        })
    }
}

/// In-memory HTML source for tests.
#[cfg(any(test, feature = "mock"))]
#[derive(Clone, Debug, Default)]
pub struct MemoryHtmlSource {
    pages: std::collections::HashMap<String, String>,
}

#[cfg(any(test, feature = "mock"))]
impl MemoryHtmlSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register rendered HTML for `page`.
    #[must_use]
    pub fn with_page(mut self, page: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(page.into(), html.into());
        self
    }
}

#[cfg(any(test, feature = "mock"))]
impl HtmlSource for MemoryHtmlSource {
    fn read_html(&self, page: &str) -> Result<String, SourceError> {
        self.pages
            .get(page)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(page.to_owned()))
    }
}
