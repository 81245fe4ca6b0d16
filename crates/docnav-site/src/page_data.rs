//! Per-page data records (`.fjson` payloads).

use docnav_toc::{Heading, extract_body, extract_toc};
use serde::{Deserialize, Serialize};

use crate::navigation::{NavigationLink, PageNavigation};
use crate::registry::Document;

/// Everything a theme needs to lay out one page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Page title.
    pub title: String,
    /// Breadcrumb links, root-most first. Empty for pages outside the hierarchy.
    pub parents: Vec<NavigationLink>,
    /// Page name.
    pub current_page_name: String,
    /// Two-level in-page table of contents.
    pub toc: Vec<Heading>,
    /// Display hints derived from `toc`.
    pub toc_options: TocOptions,
    /// Next page in reading order.
    pub next: Option<NavigationLink>,
    /// Previous page in reading order.
    pub prev: Option<NavigationLink>,
    /// Inner HTML of the rendered page body.
    pub body: String,
}

/// Width class of the in-page TOC sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TocSize {
    /// Fewer than 10 entries.
    Md,
    /// Fewer than 20 entries.
    Lg,
    /// 20 entries or more.
    Xl,
}

/// Display hints for the in-page TOC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TocOptions {
    /// Deepest heading level present, 0 for an empty TOC.
    pub max_depth: u8,
    /// Number of entries across all levels.
    pub num_visible_items: usize,
    /// Sidebar width class.
    pub size: TocSize,
}

impl TocOptions {
    /// Derive display hints from a nested TOC.
    #[must_use]
    pub fn from_toc(toc: &[Heading]) -> Self {
        fn visit(headings: &[Heading], max_depth: &mut u8, count: &mut usize) {
            for heading in headings {
                *max_depth = (*max_depth).max(heading.level);
                *count += 1;
                visit(&heading.children, max_depth, count);
            }
        }

        let mut max_depth = 0;
        let mut num_visible_items = 0;
        visit(toc, &mut max_depth, &mut num_visible_items);

        let size = match num_visible_items {
            0..10 => TocSize::Md,
            10..20 => TocSize::Lg,
            _ => TocSize::Xl,
        };

        Self {
            max_depth,
            num_visible_items,
            size,
        }
    }
}

/// Combine a document, its navigation and its rendered HTML into a record.
#[must_use]
pub fn assemble_page(document: &Document, navigation: PageNavigation, html: &str) -> PageRecord {
    let toc = extract_toc(&document.name, html);
    let toc_options = TocOptions::from_toc(&toc);

    PageRecord {
        title: document.title.clone(),
        parents: navigation.parents.unwrap_or_default(),
        current_page_name: document.name.clone(),
        toc,
        toc_options,
        next: navigation.next,
        prev: navigation.prev,
        body: extract_body(html),
    }
}
