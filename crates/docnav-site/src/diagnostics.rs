//! Non-fatal build problems.

use std::fmt;

/// A problem found while generating page data. Never aborts generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A TOC declaration names a page that does not exist.
    MissingChild {
        /// Page whose TOC declares the child.
        parent: String,
        /// Missing child name.
        child: String,
    },
    /// A page is not reachable from the master document.
    Orphan {
        /// Page name.
        page: String,
    },
    /// Rendered HTML for a page could not be read.
    MissingHtml {
        /// Page name.
        page: String,
        /// Read failure.
        reason: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingChild { parent, child } => write!(
                f,
                "{parent}: toctree contains reference to nonexisting document '{child}'"
            ),
            Self::Orphan { page } => {
                write!(f, "{page}: document isn't included in any toctree")
            }
            Self::MissingHtml { page, reason } => write!(f, "{page}: {reason}"),
        }
    }
}

/// Whether a class of problem is reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Report {
    /// Do not record.
    Ignore,
    /// Record as a diagnostic.
    #[default]
    Warn,
}

impl Report {
    /// Whether problems of this class are recorded.
    #[must_use]
    pub fn is_enabled(self) -> bool {
        self == Self::Warn
    }
}

/// Which problems the generator records.
///
/// [`Diagnostic::MissingHtml`] is always recorded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticsPolicy {
    /// Dangling TOC references.
    pub missing_children: Report,
    /// Pages outside the hierarchy.
    pub orphans: Report,
}
