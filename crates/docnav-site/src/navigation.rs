//! Per-page navigation: previous, next and breadcrumbs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::hierarchy::Hierarchy;
use crate::registry::DocumentGraph;

/// Link to another page, relative to the linking page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationLink {
    /// Target page title.
    pub title: String,
    /// Relative URL of the target page.
    pub link: String,
}

/// Navigation computed for one page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageNavigation {
    /// Next page in reading order.
    pub next: Option<NavigationLink>,
    /// Previous page in reading order.
    pub prev: Option<NavigationLink>,
    /// Ancestors root-most first; `None` if the page is not in the hierarchy.
    pub parents: Option<Vec<NavigationLink>>,
}

/// Compute the link from page `from` to page `to`.
///
/// One `../` per `/` in `from`, followed by `to` with an `.html` extension.
///
/// # Examples
///
/// ```
/// use docnav_site::relative_link;
///
/// assert_eq!(relative_link("index", "setup"), "setup.html");
/// assert_eq!(relative_link("guide/install", "index"), "../index.html");
/// assert_eq!(relative_link("a/b/c", "a/b/d"), "../../a/b/d.html");
/// ```
#[must_use]
pub fn relative_link(from: &str, to: &str) -> String {
    let depth = from.matches('/').count();
    format!("{}{to}.html", "../".repeat(depth))
}

/// Resolves prev/next/parents over a built [`Hierarchy`].
///
/// The flattened order and a position index are computed once; each
/// [`resolve`](Self::resolve) call is then a lookup plus a tree search.
pub struct NavigationResolver<'a> {
    graph: &'a dyn DocumentGraph,
    hierarchy: &'a Hierarchy,
    order: Vec<&'a str>,
    positions: HashMap<&'a str, usize>,
}

impl<'a> NavigationResolver<'a> {
    /// Create a resolver for `hierarchy`, titling links from `graph`.
    pub fn new(graph: &'a dyn DocumentGraph, hierarchy: &'a Hierarchy) -> Self {
        let order = hierarchy.flatten();
        let mut positions = HashMap::with_capacity(order.len());
        for (i, &name) in order.iter().enumerate() {
            positions.entry(name).or_insert(i);
        }

        Self {
            graph,
            hierarchy,
            order,
            positions,
        }
    }

    /// Reading order used for prev/next.
    #[must_use]
    pub fn order(&self) -> &[&'a str] {
        &self.order
    }

    /// Compute navigation for `page`.
    #[must_use]
    pub fn resolve(&self, page: &str) -> PageNavigation {
        PageNavigation {
            next: self.next(page),
            prev: self.prev(page),
            parents: self.parents(page),
        }
    }

    /// Page after `page` in reading order.
    #[must_use]
    pub fn next(&self, page: &str) -> Option<NavigationLink> {
        let &position = self.positions.get(page)?;
        let target = self.order.get(position + 1)?;
        Some(self.link(page, target))
    }

    /// Page before `page` in reading order.
    #[must_use]
    pub fn prev(&self, page: &str) -> Option<NavigationLink> {
        let &position = self.positions.get(page)?;
        let target = self.order.get(position.checked_sub(1)?)?;
        Some(self.link(page, target))
    }

    /// Breadcrumb links, root-most first, excluding `page` itself.
    ///
    /// `Some(vec![])` for top-level pages (including the master document),
    /// `None` for pages outside the hierarchy.
    #[must_use]
    pub fn parents(&self, page: &str) -> Option<Vec<NavigationLink>> {
        let ancestors = self.hierarchy.ancestors(page)?;
        Some(
            ancestors
                .into_iter()
                .map(|ancestor| self.link(page, ancestor))
                .collect(),
        )
    }

    /// Link from `from` to `target`; empty title and link when `target` is
    /// not in the registry.
    #[must_use]
    pub fn link(&self, from: &str, target: &str) -> NavigationLink {
        self.graph
            .document(target)
            .map_or_else(NavigationLink::default, |document| NavigationLink {
                title: document.title.clone(),
                link: relative_link(from, &document.name),
            })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::hierarchy::build_hierarchy;
    use crate::registry::DocumentRegistry;

    const NO_CHILDREN: [&str; 0] = [];

    fn link(title: &str, link: &str) -> NavigationLink {
        NavigationLink {
            title: title.to_owned(),
            link: link.to_owned(),
        }
    }

    fn chain() -> DocumentRegistry {
        DocumentRegistry::new()
            .with_document("a", "A", ["b"])
            .with_document("b", "B", ["c"])
            .with_document("c", "C", NO_CHILDREN)
    }

    #[test]
    fn test_relative_link_depths() {
        assert_eq!(relative_link("index", "index"), "index.html");
        assert_eq!(relative_link("guide/setup", "faq"), "../faq.html");
        assert_eq!(
            relative_link("a/b/c", "guide/setup"),
            "../../guide/setup.html"
        );
    }

    #[test]
    fn test_prev_next_chain() {
        let registry = chain();
        let hierarchy = build_hierarchy(&registry, "a");
        let resolver = NavigationResolver::new(&registry, &hierarchy);

        assert_eq!(resolver.next("a"), Some(link("B", "b.html")));
        assert_eq!(resolver.next("b"), Some(link("C", "c.html")));
        assert_eq!(resolver.next("c"), None);
        assert_eq!(resolver.prev("c"), Some(link("B", "b.html")));
        assert_eq!(resolver.prev("b"), Some(link("A", "a.html")));
        assert_eq!(resolver.prev("a"), None);
    }

    #[test]
    fn test_prev_next_unknown_page() {
        let registry = chain();
        let hierarchy = build_hierarchy(&registry, "a");
        let resolver = NavigationResolver::new(&registry, &hierarchy);

        assert_eq!(resolver.resolve("orphan"), PageNavigation::default());
    }

    #[test]
    fn test_parents_root_most_first() {
        let registry = DocumentRegistry::new()
            .with_document("index", "Home", ["book/index"])
            .with_document("book/index", "Book", ["book/part"])
            .with_document("book/part", "Part", ["book/part/chapter"])
            .with_document("book/part/chapter", "Chapter", NO_CHILDREN);
        let hierarchy = build_hierarchy(&registry, "index");
        let resolver = NavigationResolver::new(&registry, &hierarchy);

        let parents = resolver.parents("book/part/chapter").unwrap();

        assert_eq!(
            parents,
            [
                link("Book", "../../book/index.html"),
                link("Part", "../../book/part.html"),
            ]
        );
    }

    #[test]
    fn test_parents_root_page_is_empty() {
        let registry = chain();
        let hierarchy = build_hierarchy(&registry, "a");
        let resolver = NavigationResolver::new(&registry, &hierarchy);

        assert_eq!(resolver.parents("a"), Some(Vec::new()));
    }

    #[test]
    fn test_parents_orphan_is_none() {
        let registry = chain().with_document("orphan", "Orphan", NO_CHILDREN);
        let hierarchy = build_hierarchy(&registry, "a");
        let resolver = NavigationResolver::new(&registry, &hierarchy);

        assert_eq!(resolver.parents("orphan"), None);
    }

    #[test]
    fn test_dangling_target_gives_empty_link() {
        let registry = DocumentRegistry::new()
            .with_document("index", "Home", ["missing"]);
        let hierarchy = build_hierarchy(&registry, "index");
        let resolver = NavigationResolver::new(&registry, &hierarchy);

        assert_eq!(resolver.next("index"), Some(NavigationLink::default()));
        assert_eq!(resolver.link("index", "missing"), link("", ""));
        assert_eq!(resolver.prev("missing"), Some(link("Home", "index.html")));
    }

    #[test]
    fn test_links_are_relative_to_current_page() {
        let registry = DocumentRegistry::new()
            .with_document("index", "Home", ["guide/setup", "faq"])
            .with_document("guide/setup", "Setup", NO_CHILDREN)
            .with_document("faq", "FAQ", NO_CHILDREN);
        let hierarchy = build_hierarchy(&registry, "index");
        let resolver = NavigationResolver::new(&registry, &hierarchy);

        let navigation = resolver.resolve("guide/setup");

        assert_eq!(navigation.prev, Some(link("Home", "../index.html")));
        assert_eq!(navigation.next, Some(link("FAQ", "../faq.html")));
        assert_eq!(navigation.parents, Some(Vec::new()));
    }

    #[test]
    fn test_order_matches_flattened_hierarchy() {
        let registry = chain();
        let hierarchy = build_hierarchy(&registry, "a");
        let resolver = NavigationResolver::new(&registry, &hierarchy);

        assert_eq!(resolver.order(), ["a", "b", "c"]);
    }
}
