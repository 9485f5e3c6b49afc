//! Anchor identifiers for headings
//!
//! Every annotated heading ends up with exactly one anchor (`<a name="...">`)
//! carrying a normalized identifier:
//!
//! 1. The default identifier is the heading text with spaces turned into
//!    hyphens, lower-cased.
//! 2. An anchor already inside the heading wins: its `name` attribute (or its
//!    `id` when there is no `name`) is used instead.
//! 3. The identifier is lower-cased and trimmed, then the remote renderer's
//!    content prefix is stripped until none is left.
//! 4. A heading without an anchor gets a new one as its first child.
//!
//! Stripping after normalization makes the written identifier a fixed point:
//! annotating the output again yields the same identifier. The prefix is
//! stripped from text-derived identifiers too, so `<h2>User Content Policy</h2>`
//! gets `policy`; otherwise the second pass would read `user-content-policy`
//! back from the anchor and strip it there.
//!
//! Headings whose identifier comes out empty are left untouched.
//!
//! The identifier is stored raw; the serializer attribute-encodes it on output.

use markup5ever_rcdom::Handle;

use crate::dom::{create_element, find_descendant, get_attribute, prepend_child, set_attribute};

/// Default identifier derived from heading text
///
/// ```rust
/// use doc_page_renderer::anchor::default_identifier;
///
/// assert_eq!(default_identifier("Getting Started"), "getting-started");
/// ```
pub fn default_identifier(text: &str) -> String {
    text.replace(' ', "-").to_lowercase()
}

/// Lower-case and trim an identifier
pub fn normalize_identifier(id: &str) -> String {
    id.to_lowercase().trim().to_string()
}

/// Assigns anchor identifiers to heading elements
#[derive(Debug, Clone)]
pub struct AnchorAssigner {
    /// Normalized prefix, compared against normalized identifiers
    prefix: String,
}

impl AnchorAssigner {
    /// Create an assigner stripping `prefix` from identifiers
    pub fn new(prefix: impl AsRef<str>) -> Self {
        Self {
            prefix: normalize_identifier(prefix.as_ref()),
        }
    }

    /// Resolve the identifier for `heading` and write it to its anchor
    ///
    /// `text` is the heading's inner text. Returns `None`, without touching
    /// the tree, when the identifier is empty.
    pub fn assign(&self, heading: &Handle, text: &str) -> Option<String> {
        let existing = find_descendant(heading, "a");

        let raw = existing
            .as_ref()
            .and_then(existing_identifier)
            .unwrap_or_else(|| default_identifier(text));
        let id = self.strip_prefix(normalize_identifier(&raw));

        if id.is_empty() {
            return None;
        }

        let anchor = existing.unwrap_or_else(|| {
            let anchor = create_element("a", &[]);
            prepend_child(heading, anchor.clone());
            anchor
        });
        set_attribute(&anchor, "name", &id);

        Some(id)
    }

    fn strip_prefix(&self, mut id: String) -> String {
        if self.prefix.is_empty() {
            return id;
        }
        while let Some(rest) = id.strip_prefix(self.prefix.as_str()) {
            id = rest.trim_start().to_string();
        }
        id
    }
}

fn existing_identifier(anchor: &Handle) -> Option<String> {
    ["name", "id"]
        .iter()
        .filter_map(|attr| get_attribute(anchor, attr))
        .find(|value| !value.trim().is_empty())
}
