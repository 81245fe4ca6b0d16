//! Site-wide navigation and page data for docnav.
//!
//! This crate provides:
//! - [`DocumentRegistry`]: compiled pages and their TOC declarations
//! - [`build_hierarchy`]: deduplicated TOC forest rooted at the master document
//! - [`NavigationResolver`]: previous, next and breadcrumb links per page
//! - [`JsonGenerator`]: `.fjson` page data for every page
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::{Path, PathBuf};
//! use docnav_site::{DocumentRegistry, FsHtmlSource, GeneratorConfig, JsonGenerator};
//!
//! let registry = DocumentRegistry::load(Path::new("_build/project.json"))?;
//! let source = FsHtmlSource::new("_build/html");
//! let config = GeneratorConfig {
//!     output_dir: Some(PathBuf::from("_build/html")),
//!     ..GeneratorConfig::default()
//! };
//!
//! let result = JsonGenerator::new(&registry, &source, config).generate()?;
//! for diagnostic in &result.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! # Ok(())
//! # }
//! ```

mod diagnostics;
mod generator;
mod hierarchy;
mod navigation;
mod page_data;
mod registry;
mod source;

pub use diagnostics::{Diagnostic, DiagnosticsPolicy, Report};
pub use generator::{
    BuildResult, GenerateError, GeneratorConfig, JsonGenerator, PAGE_DATA_EXTENSION,
};
pub use hierarchy::{DanglingReference, Hierarchy, HierarchyNode, build_hierarchy, flatten};
pub use navigation::{NavigationLink, NavigationResolver, PageNavigation, relative_link};
pub use page_data::{PageRecord, TocOptions, TocSize, assemble_page};
pub use registry::{Document, DocumentGraph, DocumentRegistry, RegistryError};
#[cfg(any(test, feature = "mock"))]
pub use source::MemoryHtmlSource;
pub use source::{FsHtmlSource, HtmlSource, SourceError};

// Re-export the page-local TOC type used in records
pub use docnav_toc::Heading;
