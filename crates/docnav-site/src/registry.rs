//! Compiled document registry.
//!
//! The markup engine compiles every source file into a document with a title
//! and an ordered list of child page names (its TOC declaration). This module
//! exposes that registry read-only through [`DocumentGraph`] and provides
//! [`DocumentRegistry`], an in-memory implementation loaded from a project
//! manifest.
//!
//! # Manifest format
//!
//! JSON (`.json`) or YAML (`.yaml`, `.yml`), documents in build order:
//!
//! ```json
//! {
//!   "documents": [
//!     { "name": "index", "title": "Home", "children": ["setup", "guide/intro"] },
//!     { "name": "setup", "title": "Setup" },
//!     { "name": "guide/intro", "title": "Introduction" }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// A compiled documentation page.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Document {
    /// Page name: forward-slash separated, no extension (e.g., "guide/intro").
    pub name: String,
    /// Rendered page title.
    pub title: String,
    /// Declared TOC children, in declaration order.
    #[serde(default)]
    pub children: Vec<String>,
}

impl Document {
    /// Create a document.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        children: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            children: children.into_iter().map(Into::into).collect(),
        }
    }
}

/// Read-only view over the compiled project.
pub trait DocumentGraph {
    /// Look up a page by name. `None` for dangling references.
    fn document(&self, name: &str) -> Option<&Document>;

    /// All pages, in build order.
    fn documents(&self) -> Vec<&Document>;
}

/// Error loading a project manifest.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Manifest could not be read.
    #[error("cannot read manifest {}: {source}", path.display())]
    Io {
        /// Manifest path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// JSON manifest is malformed.
    #[error("invalid JSON manifest: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML manifest is malformed.
    #[error("invalid YAML manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Manifest extension is neither JSON nor YAML.
    #[error("unsupported manifest format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

#[derive(Deserialize)]
struct Manifest {
    #[serde(default)]
    documents: Vec<Document>,
}

/// In-memory document registry.
///
/// Documents keep their insertion order; lookups by name are O(1).
#[derive(Debug, Default)]
pub struct DocumentRegistry {
    documents: Vec<Document>,
    index: HashMap<String, usize>,
}

impl DocumentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document. A name that is already registered keeps its first entry.
    pub fn insert(&mut self, document: Document) {
        if self.index.contains_key(&document.name) {
            tracing::warn!(page = %document.name, "Duplicate document in registry, keeping first entry");
            return;
        }
        self.index
            .insert(document.name.clone(), self.documents.len());
        self.documents.push(document);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with_document(
        mut self,
        name: &str,
        title: &str,
        children: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.insert(Document::new(name, title, children));
        self
    }

    /// Load a registry from a JSON or YAML manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read, has an unknown
    /// extension, or does not parse.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let manifest: Manifest = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("yaml" | "yml") => serde_yaml::from_str(&content)?,
            _ => return Err(RegistryError::UnsupportedFormat(path.to_path_buf())),
        };

        let registry: Self = manifest.documents.into_iter().collect();
        tracing::debug!(
            path = %path.display(),
            document_count = registry.len(),
            "Manifest loaded"
        );
        Ok(registry)
    }

    /// Number of registered documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the registry has no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl FromIterator<Document> for DocumentRegistry {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        let mut registry = Self::new();
        for document in iter {
            registry.insert(document);
        }
        registry
    }
}

impl DocumentGraph for DocumentRegistry {
    fn document(&self, name: &str) -> Option<&Document> {
        self.index.get(name).map(|&i| &self.documents[i])
    }

    fn documents(&self) -> Vec<&Document> {
        self.documents.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const NO_CHILDREN: [&str; 0] = [];

    #[test]
    fn test_document_lookup() {
        let registry = DocumentRegistry::new()
            .with_document("index", "Home", ["setup"])
            .with_document("setup", "Setup", NO_CHILDREN);

        let doc = registry.document("index").unwrap();

        assert_eq!(doc.title, "Home");
        assert_eq!(doc.children, ["setup"]);
        assert!(registry.document("missing").is_none());
    }

    #[test]
    fn test_documents_keep_insertion_order() {
        let registry = DocumentRegistry::new()
            .with_document("b", "B", NO_CHILDREN)
            .with_document("a", "A", NO_CHILDREN)
            .with_document("c", "C", NO_CHILDREN);

        let names: Vec<&str> = registry
            .documents()
            .iter()
            .map(|d| d.name.as_str())
            .collect();

        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_name_keeps_first() {
        let registry = DocumentRegistry::new()
            .with_document("index", "First", NO_CHILDREN)
            .with_document("index", "Second", NO_CHILDREN);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.document("index").unwrap().title, "First");
    }

    #[test]
    fn test_load_json_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.json");
        std::fs::write(
            &path,
            r#"{"documents": [
                {"name": "index", "title": "Home", "children": ["guide/intro"]},
                {"name": "guide/intro", "title": "Introduction"}
            ]}"#,
        )
        .unwrap();

        let registry = DocumentRegistry::load(&path).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.document("guide/intro"),
            Some(&Document::new("guide/intro", "Introduction", NO_CHILDREN))
        );
    }

    #[test]
    fn test_load_yaml_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.yaml");
        std::fs::write(
            &path,
            "documents:\n  - name: index\n    title: Home\n    children: [setup]\n  - name: setup\n    title: Setup\n",
        )
        .unwrap();

        let registry = DocumentRegistry::load(&path).unwrap();

        assert_eq!(registry.document("index").unwrap().children, ["setup"]);
        assert_eq!(registry.document("setup").unwrap().title, "Setup");
    }

    #[test]
    fn test_load_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.txt");
        std::fs::write(&path, "").unwrap();

        let result = DocumentRegistry::load(&path);

        assert!(matches!(result, Err(RegistryError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = DocumentRegistry::load(Path::new("/nonexistent/project.json"));

        assert!(matches!(result, Err(RegistryError::Io { .. })));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.json");
        std::fs::write(&path, "{\"documents\": [{\"name\": 1}]}").unwrap();

        let result = DocumentRegistry::load(&path);

        assert!(matches!(result, Err(RegistryError::Json(_))));
    }
}
