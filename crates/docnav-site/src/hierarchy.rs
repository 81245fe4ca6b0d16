//! Site-wide TOC hierarchy.
//!
//! TOC declarations across a document set form a directed graph: a page can
//! be listed by several parents, and accidental cycles happen. The hierarchy
//! turns that graph into a forest by walking declarations depth-first from
//! the master document and placing every page at the position where it is
//! first discovered. Later references to an already placed page are skipped,
//! so each page has exactly one position and prev/next/parents are functions
//! of the page name.
//!
//! Example result for a master document `index` declaring
//! `[dashboards, design, fields]` where `design` declares
//! `[crud, design/sub-page]`:
//!
//! ```text
//! index
//! dashboards
//! design
//!   crud
//!   design/sub-page
//! fields
//! ```
//!
//! The master document itself is the first top-level entry and its declared
//! children follow as its siblings: for navigation it behaves like the first
//! item of its own TOC.

use std::collections::HashSet;

use crate::registry::DocumentGraph;

/// A page and the pages first discovered through its TOC declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HierarchyNode {
    /// Page name.
    pub name: String,
    /// Nested pages, in declaration order.
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    fn leaf(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            children: Vec::new(),
        }
    }
}

/// A TOC declaration naming a page that is not in the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DanglingReference {
    /// Page whose TOC declares the child.
    pub parent: String,
    /// Declared child name.
    pub child: String,
}

/// Deduplicated forest of all pages reachable from the master document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hierarchy {
    roots: Vec<HierarchyNode>,
    dangling: Vec<DanglingReference>,
}

/// Build the hierarchy by walking TOC declarations from `root`.
///
/// Never fails: a declared child missing from the registry is still placed
/// (with no children of its own) and recorded in [`Hierarchy::dangling`].
pub fn build_hierarchy(graph: &dyn DocumentGraph, root: &str) -> Hierarchy {
    let mut walker = Walker {
        graph,
        visited: HashSet::from([root.to_owned()]),
        dangling: Vec::new(),
    };

    let mut roots = vec![HierarchyNode::leaf(root)];
    roots.extend(walker.walk(root));

    let hierarchy = Hierarchy {
        roots,
        dangling: walker.dangling,
    };
    tracing::debug!(
        root,
        page_count = walker.visited.len(),
        dangling_count = hierarchy.dangling.len(),
        "TOC hierarchy built"
    );
    hierarchy
}

/// Depth-first walk with a global visited set.
///
/// Uses an explicit stack so arbitrarily deep TOC chains cannot exhaust the
/// thread stack.
struct Walker<'a> {
    graph: &'a dyn DocumentGraph,
    visited: HashSet<String>,
    dangling: Vec<DanglingReference>,
}

/// A page whose declared children are being walked.
struct Frame<'a> {
    name: String,
    declared: &'a [String],
    next: usize,
    nodes: Vec<HierarchyNode>,
}

impl<'a> Walker<'a> {
    fn frame(&self, name: String) -> Frame<'a> {
        let graph = self.graph;
        let declared = graph
            .document(&name)
            .map_or(&[][..], |document| document.children.as_slice());
        Frame {
            name,
            declared,
            next: 0,
            nodes: Vec::new(),
        }
    }

    /// Nodes first discovered through `page`'s TOC declaration.
    fn walk(&mut self, page: &str) -> Vec<HierarchyNode> {
        let mut stack = vec![self.frame(page.to_owned())];

        while let Some(frame) = stack.last_mut() {
            let declared = frame.declared;
            let Some(child) = declared.get(frame.next) else {
                let Some(done) = stack.pop() else { break };
                match stack.last_mut() {
                    Some(parent) => parent.nodes.push(HierarchyNode {
                        name: done.name,
                        children: done.nodes,
                    }),
                    None => return done.nodes,
                }
                continue;
            };
            frame.next += 1;

            // First discovery wins: a page is placed once.
            if !self.visited.insert(child.clone()) {
                continue;
            }

            if self.graph.document(child).is_none() {
                tracing::warn!(parent = %frame.name, child = %child, "TOC references unknown page");
                self.dangling.push(DanglingReference {
                    parent: frame.name.clone(),
                    child: child.clone(),
                });
            }

            let child_frame = self.frame(child.clone());
            stack.push(child_frame);
        }

        Vec::new()
    }
}

impl Hierarchy {
    /// Top-level entries; the first is always the master document.
    #[must_use]
    pub fn roots(&self) -> &[HierarchyNode] {
        &self.roots
    }

    /// Declared children that were not found in the registry.
    #[must_use]
    pub fn dangling(&self) -> &[DanglingReference] {
        &self.dangling
    }

    /// Pre-order linearization: parents before descendants, siblings in
    /// declaration order. Defines "previous" and "next".
    #[must_use]
    pub fn flatten(&self) -> Vec<&str> {
        flatten(&self.roots)
    }

    /// Ancestor names of `page`, root-most first, excluding `page`.
    ///
    /// `Some(vec![])` for top-level pages, `None` when `page` is not part of
    /// the hierarchy.
    #[must_use]
    pub fn ancestors(&self, page: &str) -> Option<Vec<&str>> {
        find_path(&self.roots, page)
    }

    /// Whether `page` is placed anywhere in the hierarchy.
    #[must_use]
    pub fn contains(&self, page: &str) -> bool {
        self.ancestors(page).is_some()
    }
}

/// Pre-order linearization of a forest.
#[must_use]
pub fn flatten(forest: &[HierarchyNode]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut stack: Vec<&HierarchyNode> = forest.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(node.name.as_str());
        stack.extend(node.children.iter().rev());
    }
    out
}

fn find_path<'a>(roots: &'a [HierarchyNode], target: &str) -> Option<Vec<&'a str>> {
    let mut path = Vec::new();
    let mut stack: Vec<(&HierarchyNode, usize)> =
        roots.iter().rev().map(|node| (node, 0)).collect();
    while let Some((node, depth)) = stack.pop() {
        path.truncate(depth);
        if node.name == target {
            return Some(path);
        }
        path.push(node.name.as_str());
        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }
    None
}

impl Drop for Hierarchy {
    // Unnest before dropping so deep chains are not freed recursively.
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.roots);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}
