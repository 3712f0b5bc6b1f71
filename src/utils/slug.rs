//! Slug generation for entry ids.
//!
//! Entry ids are derived from content file stems: ASCII-folded via
//! `deunicode`, lowercased, with non-alphanumeric runs collapsed to a
//! single hyphen.

use deunicode::deunicode;

/// Slugify text for use as an entry id or HTML anchor.
///
/// # Examples
/// ```ignore
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Grüße aus Wien"), "gruesse-aus-wien");
/// ```
pub fn slugify(text: &str) -> String {
    let folded = deunicode(text);
    let mut slug = String::with_capacity(folded.len());
    let mut prev_hyphen = true; // suppress leading hyphen
    for ch in folded.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
