//! HTML5 parsing and serialization using html5ever
//!
//! Renderer output is an HTML fragment. It is parsed as the content of a
//! `<body>` element into a mutable `RcDom`, annotated in place, and the body's
//! children are serialized back to a fragment.
//!
//! # Overview
//!
//! html5ever implements the WHATWG HTML5 parsing algorithm, so malformed
//! markup from either renderer is repaired the same way a browser would
//! repair it. Parsing therefore only fails when the resulting document has no
//! body to work on.
//!
//! # Examples
//!
//! ```rust
//! use doc_page_renderer::parser::{parse_fragment, serialize_body};
//!
//! let dom = parse_fragment("<h1>Hello</h1><p>World").expect("Failed to parse");
//! let html = serialize_body(&dom).expect("Failed to serialize");
//! assert_eq!(html, "<h1>Hello</h1><p>World</p>");
//! ```
//!
//! # Configuration
//!
//! - **Scripting**: Disabled (scripts are not executed)
//! - **Error Handling**: Errors are collected but parsing continues
//! - **Tree Builder**: `RcDom` reference-counted nodes, mutated by the annotation pass

use html5ever::parse_document;
use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

use crate::error::RenderError;

/// Parse renderer output into a DOM tree
///
/// The fragment is parsed as body content: a leading `<body>` start tag keeps
/// elements such as `<style>` or `<link>` where the renderer put them instead
/// of letting the tree builder hoist them into `<head>`.
///
/// # Errors
///
/// - `RenderError::ParseError` if the parsed document has no `<body>` element
pub fn parse_fragment(html: &str) -> Result<RcDom, RenderError> {
    let mut source = String::with_capacity(html.len() + 6);
    source.push_str("<body>");
    source.push_str(html);

    let dom = parse_document(RcDom::default(), Default::default()).one(source);

    if body_element(&dom).is_none() {
        return Err(RenderError::ParseError(
            "parsed document has no body element".to_string(),
        ));
    }

    Ok(dom)
}

/// Locate the `<body>` element of a parsed document
pub fn body_element(dom: &RcDom) -> Option<Handle> {
    let html = find_child_element(&dom.document, "html")?;
    find_child_element(&html, "body")
}

fn find_child_element(node: &Handle, tag: &str) -> Option<Handle> {
    node.children
        .borrow()
        .iter()
        .find(|child| {
            matches!(child.data, NodeData::Element { ref name, .. } if name.local.as_ref() == tag)
        })
        .cloned()
}

/// Serialize the children of `<body>` back to an HTML fragment
///
/// Attribute values and text are escaped by the serializer, so identifiers
/// stored raw in the tree come out HTML-attribute-encoded.
///
/// # Errors
///
/// - `RenderError::ParseError` if the document has no `<body>` element
/// - `RenderError::InternalError` if serialization fails or produces invalid UTF-8
pub fn serialize_body(dom: &RcDom) -> Result<String, RenderError> {
    let body = body_element(dom).ok_or_else(|| {
        RenderError::ParseError("document has no body element to serialize".to_string())
    })?;

    let mut bytes = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    serialize(&mut bytes, &SerializableHandle::from(body), opts)
        .map_err(|e| RenderError::InternalError(format!("HTML serialization failed: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| {
        RenderError::InternalError(format!("Serializer produced invalid UTF-8: {}", e))
    })
}
