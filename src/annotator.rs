//! Single-pass heading annotation
//!
//! Walks the parsed tree once in document order (depth-first, left-to-right).
//! For every heading it assigns the anchor identifier, appends the outline
//! entry and records the section container for levels 1 and 2. Container
//! moves are only recorded here; the caller applies the returned
//! [`SectionPlan`] once the walk is over.
//!
//! Headings with an empty identifier are skipped entirely: no anchor, no
//! outline entry, no container.

use markup5ever_rcdom::{Handle, RcDom};

use crate::anchor::AnchorAssigner;
use crate::config::PipelineOptions;
use crate::error::RenderError;
use crate::headings::{Heading, Outline, inner_text, node_heading_level};
use crate::sections::SectionPlan;

/// Result of the annotation walk
#[derive(Debug, Default)]
pub struct Annotation {
    /// Headings in document order
    pub outline: Outline,
    /// Deferred section containers
    pub sections: SectionPlan,
}

/// Annotates headings of a parsed document
pub struct HeadingAnnotator {
    anchors: AnchorAssigner,
}

impl HeadingAnnotator {
    pub fn new(options: &PipelineOptions) -> Self {
        Self {
            anchors: AnchorAssigner::new(&options.anchor_prefix),
        }
    }

    /// Annotate every heading of `dom` and plan its section containers
    ///
    /// Anchors are written into the tree; containers are not. The walk uses an
    /// explicit stack, so nesting depth is bounded only by memory.
    pub fn annotate(&self, dom: &RcDom) -> Annotation {
        let mut annotation = Annotation::default();
        let mut stack: Vec<Handle> = vec![dom.document.clone()];

        while let Some(node) = stack.pop() {
            if let Some(level) = node_heading_level(&node) {
                self.visit_heading(&node, level, &mut annotation);
            }
            // Pushed after the visit: anchor insertion changes the children.
            stack.extend(node.children.borrow().iter().rev().cloned());
        }

        annotation
    }

    /// Annotate and immediately apply section containers
    ///
    /// # Errors
    ///
    /// - `RenderError::InternalError` if section containers overlap
    pub fn annotate_and_wrap(&self, dom: &RcDom) -> Result<(Outline, usize), RenderError> {
        let Annotation { outline, sections } = self.annotate(dom);
        let wrapped = sections.len();
        sections.apply()?;
        Ok((outline, wrapped))
    }

    fn visit_heading(&self, heading: &Handle, level: u8, annotation: &mut Annotation) {
        let text = inner_text(heading);

        let Some(id) = self.anchors.assign(heading, &text) else {
            log::trace!("skipping h{level} with empty identifier");
            return;
        };

        annotation.outline.push(Heading { id, level, text });
        annotation.sections.record(heading, level);
    }
}
