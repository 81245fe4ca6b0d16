//! Page data generation for a whole project.
//!
//! Builds the TOC hierarchy once, then assembles a [`PageRecord`] for every
//! registered page and optionally writes it to `<output_dir>/<page>.fjson`.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::diagnostics::{Diagnostic, DiagnosticsPolicy};
use crate::hierarchy::build_hierarchy;
use crate::navigation::NavigationResolver;
use crate::page_data::{PageRecord, assemble_page};
use crate::registry::DocumentGraph;
use crate::source::HtmlSource;

/// Extension of generated page data files.
pub const PAGE_DATA_EXTENSION: &str = "fjson";

/// Error writing generated output.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// A file or directory could not be written.
    #[error("cannot write {}: {source}", path.display())]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// A record could not be serialized.
    #[error("cannot serialize page data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Generator settings.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Root of the hierarchy.
    pub master_document: String,
    /// Where to write `.fjson` files; `None` keeps records in memory only.
    pub output_dir: Option<PathBuf>,
    /// Which problems to record.
    pub diagnostics: DiagnosticsPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            master_document: "index".to_owned(),
            output_dir: None,
            diagnostics: DiagnosticsPolicy::default(),
        }
    }
}

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct BuildResult {
    /// Records keyed by page name.
    pub records: HashMap<String, PageRecord>,
    /// Problems found, in discovery order.
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildResult {
    /// Whether the run found no problems.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Record for `page`, if it is registered.
    #[must_use]
    pub fn record(&self, page: &str) -> Option<&PageRecord> {
        self.records.get(page)
    }

    /// Diagnostics as a plain-text log.
    #[must_use]
    pub fn error_log(&self) -> String {
        let mut log = String::from("Build errors\n");
        for diagnostic in &self.diagnostics {
            let _ = writeln!(log, "{diagnostic}");
        }
        log
    }

    /// Write [`error_log`](Self::error_log) to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Io`] if the file cannot be written.
    pub fn save_errors(&self, path: &Path) -> Result<(), GenerateError> {
        write_file(path, &self.error_log())
    }
}

/// Generates page data for every page of a project.
pub struct JsonGenerator<'a> {
    graph: &'a dyn DocumentGraph,
    source: &'a dyn HtmlSource,
    config: GeneratorConfig,
}

impl<'a> JsonGenerator<'a> {
    /// Create a generator over a compiled project and its rendered HTML.
    pub fn new(
        graph: &'a dyn DocumentGraph,
        source: &'a dyn HtmlSource,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            graph,
            source,
            config,
        }
    }

    /// Generate records for all registered pages, in registry order.
    ///
    /// Problems in the project (dangling references, orphans, unreadable
    /// HTML) become diagnostics; only output failures are errors.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] if a `.fjson` file cannot be written.
    pub fn generate(&self) -> Result<BuildResult, GenerateError> {
        let policy = self.config.diagnostics;
        let hierarchy = build_hierarchy(self.graph, &self.config.master_document);
        let resolver = NavigationResolver::new(self.graph, &hierarchy);

        let mut result = BuildResult::default();
        if policy.missing_children.is_enabled() {
            result
                .diagnostics
                .extend(hierarchy.dangling().iter().map(|reference| {
                    Diagnostic::MissingChild {
                        parent: reference.parent.clone(),
                        child: reference.child.clone(),
                    }
                }));
        }

        for document in self.graph.documents() {
            let navigation = resolver.resolve(&document.name);
            if navigation.parents.is_none() && policy.orphans.is_enabled() {
                result.diagnostics.push(Diagnostic::Orphan {
                    page: document.name.clone(),
                });
            }

            let html = match self.source.read_html(&document.name) {
                Ok(html) => html,
                Err(err) => {
                    tracing::warn!(page = %document.name, error = %err, "Rendered HTML unavailable");
                    result.diagnostics.push(Diagnostic::MissingHtml {
                        page: document.name.clone(),
                        reason: err.to_string(),
                    });
                    String::new()
                }
            };

            let record = assemble_page(document, navigation, &html);
            if let Some(output_dir) = &self.config.output_dir {
                let path = output_dir.join(format!("{}.{PAGE_DATA_EXTENSION}", document.name));
                write_file(&path, &serde_json::to_string_pretty(&record)?)?;
                tracing::debug!(page = %document.name, path = %path.display(), "Page data written");
            }
            result.records.insert(document.name.clone(), record);
        }

        tracing::info!(
            page_count = result.records.len(),
            diagnostic_count = result.diagnostics.len(),
            "Page data generated"
        );
        Ok(result)
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), GenerateError> {
    let io_error = |source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(path, content).map_err(io_error)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::diagnostics::Report;
    use crate::navigation::NavigationLink;
    use crate::registry::DocumentRegistry;
    use crate::source::MemoryHtmlSource;

    const NO_CHILDREN: [&str; 0] = [];

    fn link(title: &str, link: &str) -> Option<NavigationLink> {
        Some(NavigationLink {
            title: title.to_owned(),
            link: link.to_owned(),
        })
    }

    fn site() -> (DocumentRegistry, MemoryHtmlSource) {
        let registry = DocumentRegistry::new()
            .with_document("index", "Home", ["guide/setup", "faq"])
            .with_document("guide/setup", "Setup", ["guide/advanced"])
            .with_document("guide/advanced", "Advanced", NO_CHILDREN)
            .with_document("faq", "FAQ", NO_CHILDREN);
        let source = MemoryHtmlSource::new()
            .with_page("index", "<html><body><h1>Home</h1></body></html>")
            .with_page(
                "guide/setup",
                r#"<html><body><h2 id="install">Install</h2><h3 id="linux">Linux</h3></body></html>"#,
            )
            .with_page("guide/advanced", "<html><body><p>Deep</p></body></html>")
            .with_page("faq", "<html><body><h2>Why?</h2></body></html>");
        (registry, source)
    }

    #[test]
    fn test_generate_navigation() {
        let (registry, source) = site();
        let generator = JsonGenerator::new(&registry, &source, GeneratorConfig::default());

        let result = generator.generate().unwrap();

        assert!(result.is_successful());
        assert_eq!(result.records.len(), 4);

        let index = result.record("index").unwrap();
        assert_eq!(index.prev, None);
        assert_eq!(index.next, link("Setup", "guide/setup.html"));
        assert!(index.parents.is_empty());

        let advanced = result.record("guide/advanced").unwrap();
        assert_eq!(advanced.prev, link("Setup", "../guide/setup.html"));
        assert_eq!(advanced.next, link("FAQ", "../faq.html"));
        assert_eq!(
            advanced.parents,
            [NavigationLink {
                title: "Setup".to_owned(),
                link: "../guide/setup.html".to_owned(),
            }]
        );

        let faq = result.record("faq").unwrap();
        assert_eq!(faq.next, None);
    }

    #[test]
    fn test_generate_toc_and_body() {
        let (registry, source) = site();
        let generator = JsonGenerator::new(&registry, &source, GeneratorConfig::default());

        let result = generator.generate().unwrap();
        let setup = result.record("guide/setup").unwrap();

        assert_eq!(setup.toc.len(), 1);
        assert_eq!(setup.toc[0].children[0].fragment, "linux");
        assert_eq!(setup.toc_options.max_depth, 2);
        assert_eq!(
            setup.body,
            r#"<h2 id="install">Install</h2><h3 id="linux">Linux</h3>"#
        );

        let faq = result.record("faq").unwrap();
        assert_eq!(faq.toc[0].fragment, "why");
    }

    #[test]
    fn test_generate_writes_fjson_files() {
        let dir = tempfile::tempdir().unwrap();
        let (registry, source) = site();
        let config = GeneratorConfig {
            output_dir: Some(dir.path().to_path_buf()),
            ..GeneratorConfig::default()
        };

        let result = JsonGenerator::new(&registry, &source, config)
            .generate()
            .unwrap();

        let written = std::fs::read_to_string(dir.path().join("guide/setup.fjson")).unwrap();
        let parsed: PageRecord = serde_json::from_str(&written).unwrap();
        assert_eq!(&parsed, result.record("guide/setup").unwrap());
        assert!(written.contains("\n  \"title\": \"Setup\""));
        assert!(dir.path().join("index.fjson").exists());
    }

    #[test]
    fn test_generate_orphan_page() {
        let (registry, source) = site();
        let registry = registry.with_document("notes", "Notes", NO_CHILDREN);
        let source = source.with_page("notes", "<p>Loose</p>");

        let result = JsonGenerator::new(&registry, &source, GeneratorConfig::default())
            .generate()
            .unwrap();
        let notes = result.record("notes").unwrap();

        assert_eq!(notes.next, None);
        assert_eq!(notes.prev, None);
        assert!(notes.parents.is_empty());
        assert_eq!(notes.body, "<p>Loose</p>");
        assert_eq!(
            result.diagnostics,
            [Diagnostic::Orphan {
                page: "notes".to_owned(),
            }]
        );
    }

    #[test]
    fn test_generate_missing_child_reported() {
        let registry = DocumentRegistry::new().with_document("index", "Home", ["gone"]);
        let source = MemoryHtmlSource::new().with_page("index", "");

        let result = JsonGenerator::new(&registry, &source, GeneratorConfig::default())
            .generate()
            .unwrap();

        assert_eq!(
            result.record("index").unwrap().next,
            Some(NavigationLink::default())
        );
        assert_eq!(
            result.diagnostics,
            [Diagnostic::MissingChild {
                parent: "index".to_owned(),
                child: "gone".to_owned(),
            }]
        );
    }

    #[test]
    fn test_generate_policy_ignore() {
        let registry = DocumentRegistry::new()
            .with_document("index", "Home", ["gone"])
            .with_document("notes", "Notes", NO_CHILDREN);
        let source = MemoryHtmlSource::new()
            .with_page("index", "")
            .with_page("notes", "");
        let config = GeneratorConfig {
            diagnostics: DiagnosticsPolicy {
                missing_children: Report::Ignore,
                orphans: Report::Ignore,
            },
            ..GeneratorConfig::default()
        };

        let result = JsonGenerator::new(&registry, &source, config)
            .generate()
            .unwrap();

        assert!(result.is_successful());
    }

    #[test]
    fn test_generate_missing_html_is_placeholder() {
        let registry = DocumentRegistry::new().with_document("index", "Home", NO_CHILDREN);
        let source = MemoryHtmlSource::new();

        let result = JsonGenerator::new(&registry, &source, GeneratorConfig::default())
            .generate()
            .unwrap();
        let index = result.record("index").unwrap();

        assert!(index.toc.is_empty());
        assert_eq!(index.body, "");
        assert!(matches!(
            result.diagnostics.as_slice(),
            [Diagnostic::MissingHtml { page, .. }] if page == "index"
        ));
    }

    #[test]
    fn test_save_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/errors.txt");
        let result = BuildResult {
            records: HashMap::new(),
            diagnostics: vec![Diagnostic::Orphan {
                page: "notes".to_owned(),
            }],
        };

        result.save_errors(&path).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Build errors\nnotes: document isn't included in any toctree\n"
        );
    }
}
