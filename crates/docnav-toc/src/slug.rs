//! Anchor slugs.

/// Convert heading text to an anchor slug.
///
/// Lowercases ASCII letters and collapses every run of characters outside
/// `[a-z0-9]` into a single dash. Leading and trailing dashes are dropped.
/// Non-ASCII characters count as separators.
///
/// The result is deterministic but not unique: two headings with the same
/// text produce the same slug. Use [`HeadingIdAllocator`](crate::HeadingIdAllocator)
/// for page-unique ids.
///
/// # Examples
///
/// ```
/// use docnav_toc::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("  --Setup & Teardown--  "), "setup-teardown");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !result.is_empty() {
                result.push('-');
            }
            pending_dash = false;
            result.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    result
}
