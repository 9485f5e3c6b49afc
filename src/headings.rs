//! Heading classification and outline records
//!
//! A heading is any element whose tag name is exactly `h` followed by a single
//! digit `1`-`9`. `h10`, `hx` or `header` are never headings.
//!
//! The [`Outline`] is append-only: one [`Heading`] per annotated heading, in
//! document order, with duplicate ids kept as they are.

use markup5ever_rcdom::{Handle, NodeData};

/// A heading found in the rendered document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Normalized anchor identifier
    pub id: String,
    /// Heading level (1-9)
    pub level: u8,
    /// Inner text with markup stripped
    pub text: String,
}

/// Ordered headings of a document
///
/// Insertion order is document order. Ids are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    headings: Vec<Heading>,
}

impl Outline {
    /// Create an empty outline
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, heading: Heading) {
        self.headings.push(heading);
    }

    /// Headings in document order
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Heading> {
        self.headings.iter()
    }

    pub fn len(&self) -> usize {
        self.headings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    /// First level-1 heading, used as the page title
    pub fn title(&self) -> Option<&Heading> {
        self.headings.iter().find(|h| h.level == 1)
    }

    pub fn into_vec(self) -> Vec<Heading> {
        self.headings
    }
}

impl IntoIterator for Outline {
    type Item = Heading;
    type IntoIter = std::vec::IntoIter<Heading>;

    fn into_iter(self) -> Self::IntoIter {
        self.headings.into_iter()
    }
}

impl<'a> IntoIterator for &'a Outline {
    type Item = &'a Heading;
    type IntoIter = std::slice::Iter<'a, Heading>;

    fn into_iter(self) -> Self::IntoIter {
        self.headings.iter()
    }
}

/// Heading level for a tag name, if it names a heading
///
/// # Examples
///
/// ```rust
/// use doc_page_renderer::headings::heading_level;
///
/// assert_eq!(heading_level("h1"), Some(1));
/// assert_eq!(heading_level("h9"), Some(9));
/// assert_eq!(heading_level("h0"), None);
/// assert_eq!(heading_level("h10"), None);
/// assert_eq!(heading_level("hx"), None);
/// ```
pub fn heading_level(tag: &str) -> Option<u8> {
    match tag.as_bytes() {
        [b'h', digit @ b'1'..=b'9'] => Some(digit - b'0'),
        _ => None,
    }
}

/// Heading level of a node, `None` for non-heading nodes
pub fn node_heading_level(node: &Handle) -> Option<u8> {
    match node.data {
        NodeData::Element { ref name, .. } => heading_level(name.local.as_ref()),
        _ => None,
    }
}

/// Concatenated text of all descendant text nodes, trimmed
///
/// Walks with an explicit stack, so arbitrarily deep inline markup is fine.
pub fn inner_text(node: &Handle) -> String {
    let mut output = String::new();
    let mut stack = vec![node.clone()];

    while let Some(current) = stack.pop() {
        match current.data {
            NodeData::Text { ref contents } => output.push_str(&contents.borrow()),
            NodeData::Element { .. } | NodeData::Document => {
                stack.extend(current.children.borrow().iter().rev().cloned());
            }
            _ => {}
        }
    }

    output.trim().to_string()
}
