//! Heading anchors and in-page table of contents for docnav.
//!
//! This crate covers the page-local half of navigation synthesis:
//! - [`HeadingIdAllocator`]: collision-free anchor ids within a page, scoped to one build
//! - [`extract_toc`]: two-level table of contents read back from rendered HTML
//! - [`extract_body`]: inner HTML of the page `<body>`
//!
//! # Example
//!
//! ```
//! use docnav_toc::{HeadingIdAllocator, extract_toc, render_heading};
//!
//! let mut anchors = HeadingIdAllocator::new();
//! let html = [
//!     render_heading(&mut anchors, "guide", 2, "example", "Example"),
//!     render_heading(&mut anchors, "guide", 3, "example", "Example"),
//! ]
//! .concat();
//!
//! let toc = extract_toc("guide", &html);
//! assert_eq!(toc[0].fragment, "example");
//! assert_eq!(toc[0].children[0].fragment, "example-1");
//! ```

mod anchors;
mod entities;
mod extract;
mod slug;

pub use anchors::{HeadingIdAllocator, render_heading};
pub use extract::{Heading, extract_body, extract_toc, nest_headings};
pub use slug::slugify;
