//! Table of contents extraction from rendered HTML.
//!
//! Reads `h2` and `h3` elements back out of a page that was already rendered
//! by the markup engine. `h2` headings become top-level entries and `h3`
//! headings nest under the closest preceding `h2`.
//!
//! The scan is tolerant of HTML that is not well-formed XML: unclosed void
//! elements, mismatched end tags and bare `&` are accepted, and `script` and
//! `style` bodies are skipped as raw text. On markup the reader cannot make
//! sense of it stops and keeps the headings collected so far.

use std::sync::LazyLock;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use regex::Regex;

use crate::entities::decode_entity;
use crate::slug::slugify;

/// Inner HTML of the `<body>` element (last closing tag wins).
static BODY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<body\b[^>]*>(.*)</body\s*>").expect("invalid body regex")
});

/// `script` and `style` elements; their bodies are raw text, not markup.
static RAW_TEXT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("invalid raw text regex")
});

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heading {
    /// 1 for `h2` headings, 2 for `h3` headings.
    pub level: u8,
    /// Page-relative link with fragment (e.g., `"guide/setup.html#install"`).
    pub url: String,
    /// Page name the heading belongs to.
    pub page: String,
    /// Anchor id.
    pub fragment: String,
    /// Plain heading text.
    pub title: String,
    /// Level-2 headings nested under this one.
    pub children: Vec<Heading>,
}

impl Heading {
    /// Create a heading without children.
    #[must_use]
    pub fn new(page: &str, level: u8, fragment: String, title: String) -> Self {
        Self {
            level,
            url: format!("{page}.html#{fragment}"),
            page: page.to_owned(),
            fragment,
            title,
            children: Vec::new(),
        }
    }
}

/// Heading as found in the markup, before nesting.
struct RawHeading {
    level: u8,
    id: Option<String>,
    text: String,
}

/// Extract the nested table of contents of a rendered page.
///
/// The anchor of each entry is the element's `id` attribute, or the slug of
/// its text when the attribute is missing or empty.
#[must_use]
pub fn extract_toc(page: &str, html: &str) -> Vec<Heading> {
    let flat = scan_headings(html).into_iter().map(|raw| {
        let title = raw.text.trim().to_owned();
        let fragment = raw
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| slugify(&title));
        Heading::new(page, raw.level, fragment, title)
    });

    nest_headings(flat)
}

/// Fold a flat heading sequence into the two-level table of contents.
///
/// Level-2 headings that appear before any level-1 heading have no parent
/// and are dropped.
pub fn nest_headings(flat: impl IntoIterator<Item = Heading>) -> Vec<Heading> {
    let mut nested: Vec<Heading> = Vec::new();

    for heading in flat {
        if heading.level == 1 {
            nested.push(heading);
        } else if let Some(parent) = nested.last_mut() {
            parent.children.push(heading);
        }
    }

    nested
}

/// Inner HTML of the page body.
///
/// Documents without a `<body>` element are fragments; they are returned
/// whole, trimmed.
#[must_use]
pub fn extract_body(html: &str) -> String {
    BODY_PATTERN
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| html.trim().to_owned(), |m| m.as_str().to_owned())
}

/// Map a tag name to its table of contents level.
fn toc_level(name: &[u8]) -> Option<u8> {
    if name.eq_ignore_ascii_case(b"h2") {
        Some(1)
    } else if name.eq_ignore_ascii_case(b"h3") {
        Some(2)
    } else {
        None
    }
}

fn id_attribute(element: &BytesStart) -> Option<String> {
    element
        .html_attributes()
        .flatten()
        .find(|attr| attr.key.as_ref().eq_ignore_ascii_case(b"id"))
        .map(|attr| {
            attr.unescape_value().map_or_else(
                |_| String::from_utf8_lossy(&attr.value).into_owned(),
                std::borrow::Cow::into_owned,
            )
        })
}

fn scan_headings(html: &str) -> Vec<RawHeading> {
    let markup = RAW_TEXT_PATTERN.replace_all(html, "");
    let mut reader = Reader::from_str(&markup);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.allow_dangling_amp = true;

    let mut headings = Vec::new();
    let mut current: Option<RawHeading> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if current.is_none()
                    && let Some(level) = toc_level(e.name().as_ref())
                {
                    current = Some(RawHeading {
                        level,
                        id: id_attribute(&e),
                        text: String::new(),
                    });
                }
            }
            Ok(Event::End(e)) => {
                let level = toc_level(e.name().as_ref());
                if level.is_some() && current.as_ref().map(|h| h.level) == level {
                    headings.extend(current.take());
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(heading) = current.as_mut() {
                    heading.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let Some(heading) = current.as_mut() {
                    heading
                        .text
                        .push_str(&decode_entity(&String::from_utf8_lossy(&e)));
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(heading) = current.as_mut() {
                    heading.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    position = reader.error_position(),
                    error = %e,
                    "Malformed HTML, heading scan stopped early"
                );
                break;
            }
        }
    }

    headings
}
