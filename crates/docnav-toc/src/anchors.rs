//! Page-unique heading anchors.
//!
//! Two headings on the same page often slugify to the same id ("Example",
//! "Example"). [`HeadingIdAllocator`] keeps per-page usage counters and
//! suffixes repeated ids so every anchor on a page is distinct.
//!
//! # Lifecycle
//!
//! The counters belong to exactly one build. Create an allocator when a build
//! starts (or call [`HeadingIdAllocator::reset`]), pass it by `&mut` to every
//! heading rendered in that build, and drop it afterwards. Reusing an
//! allocator across builds without a reset makes ids drift between builds.

use std::collections::HashMap;

use crate::slug::slugify;

/// Per-build anchor id counters keyed by `(page, base_id)`.
#[derive(Debug, Default)]
pub struct HeadingIdAllocator {
    usages: HashMap<String, HashMap<String, usize>>,
}

impl HeadingIdAllocator {
    /// Create an allocator with no recorded ids.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the anchor id for a heading.
    ///
    /// The first use of `base_id` on `page` returns `base_id` unchanged. Every
    /// later use returns `slugify("{heading_text}-{n}")` where `n` is the number
    /// of earlier uses.
    ///
    /// # Examples
    ///
    /// ```
    /// use docnav_toc::HeadingIdAllocator;
    ///
    /// let mut anchors = HeadingIdAllocator::new();
    /// assert_eq!(anchors.allocate("guide", "example", "Example"), "example");
    /// assert_eq!(anchors.allocate("guide", "example", "Example"), "example-1");
    /// assert_eq!(anchors.allocate("faq", "example", "Example"), "example");
    /// ```
    pub fn allocate(&mut self, page: &str, base_id: &str, heading_text: &str) -> String {
        let count = self
            .usages
            .entry(page.to_owned())
            .or_default()
            .entry(base_id.to_owned())
            .or_default();

        let id = match *count {
            0 => base_id.to_owned(),
            n => slugify(&format!("{heading_text}-{n}")),
        };
        *count += 1;
        id
    }

    /// Forget all recorded ids.
    pub fn reset(&mut self) {
        self.usages.clear();
    }

    /// Whether no id has been allocated since creation or the last reset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.usages.is_empty()
    }
}

/// Render a heading element with a page-unique anchor.
///
/// This is the point where rendering consumes the allocator: `base_id` is the
/// id the markup engine derived for the title, `text` its plain text.
/// Levels outside `1..=6` are clamped.
pub fn render_heading(
    anchors: &mut HeadingIdAllocator,
    page: &str,
    level: u8,
    base_id: &str,
    text: &str,
) -> String {
    let level = level.clamp(1, 6);
    let id = anchors.allocate(page, base_id, text);
    format!(
        r#"<h{level} id="{}">{}</h{level}>"#,
        html_escape::encode_double_quoted_attribute(&id),
        html_escape::encode_text(text)
    )
}
