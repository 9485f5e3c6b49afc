//! Section containers for level-1 and level-2 headings
//!
//! Each level-1 heading is wrapped together with its following siblings, up to
//! but not including the next heading of any level, in a
//! `<div class="topic">`. Level-2 headings get `<div class="sub-topic">`.
//! Levels 3-9 stay where they are.
//!
//! Moving nodes while walking sibling lists would invalidate the walk, so the
//! work is split in two phases:
//!
//! 1. [`SectionPlan::record`] is called during the read-only traversal and
//!    remembers `(wrapper, members)` groups in discovery order.
//! 2. [`SectionPlan::apply`] runs after the traversal and performs every move.
//!
//! Groups never overlap: membership stops at any heading, so no heading can be
//! a member of another heading's group. A group whose heading has moved by
//! the time it is applied is reported as `RenderError::InternalError`.
//!
//! # Example
//!
//! Input:
//! ```html
//! <h1>Intro</h1><p>x</p><h2>Sub</h2><p>y</p><h1>Next</h1>
//! ```
//!
//! Output:
//! ```html
//! <div class="topic"><h1>Intro</h1><p>x</p></div>
//! <div class="sub-topic"><h2>Sub</h2><p>y</p></div>
//! <div class="topic"><h1>Next</h1></div>
//! ```

use markup5ever_rcdom::Handle;
use std::rc::Rc;

use crate::dom::{create_element, following_siblings, parent_of};
use crate::error::RenderError;
use crate::headings::node_heading_level;

/// CSS class of the container for a heading level, if the level is wrapped
pub fn container_class(level: u8) -> Option<&'static str> {
    match level {
        1 => Some("topic"),
        2 => Some("sub-topic"),
        _ => None,
    }
}

/// A wrapper element and the nodes that will be moved under it
#[derive(Debug)]
struct SectionGroup {
    wrapper: Handle,
    parent: Handle,
    /// The heading followed by its collected siblings
    members: Vec<Handle>,
}

/// Deferred section grouping, applied after traversal
#[derive(Debug, Default)]
pub struct SectionPlan {
    groups: Vec<SectionGroup>,
}

impl SectionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Record a container for `heading` if its level is wrapped
    ///
    /// Does not touch the tree. Detached headings are ignored.
    pub fn record(&mut self, heading: &Handle, level: u8) {
        let Some(class) = container_class(level) else {
            return;
        };
        let Some(parent) = parent_of(heading) else {
            return;
        };

        let mut members = vec![heading.clone()];
        members.extend(
            following_siblings(heading)
                .into_iter()
                .take_while(|sibling| node_heading_level(sibling).is_none()),
        );

        self.groups.push(SectionGroup {
            wrapper: create_element("div", &[("class", class)]),
            parent,
            members,
        });
    }

    /// Move every recorded group under its wrapper
    ///
    /// The wrapper takes the heading's position in its parent; the heading
    /// and its collected siblings become the wrapper's children in their
    /// original order.
    ///
    /// # Errors
    ///
    /// - `RenderError::InternalError` if a heading is no longer a child of the
    ///   parent it had when recorded, or its members are no longer contiguous
    pub fn apply(self) -> Result<(), RenderError> {
        for group in self.groups {
            group.apply()?;
        }
        Ok(())
    }
}

impl SectionGroup {
    fn apply(self) -> Result<(), RenderError> {
        let heading = &self.members[0];

        let attached = parent_of(heading).is_some_and(|p| Rc::ptr_eq(&p, &self.parent));
        if !attached {
            return Err(invariant_violation(
                "section heading was moved before its group was applied",
            ));
        }

        let moved: Vec<Handle> = {
            let mut siblings = self.parent.children.borrow_mut();
            let start = siblings
                .iter()
                .position(|s| Rc::ptr_eq(s, heading))
                .ok_or_else(|| invariant_violation("section heading missing from its parent"))?;
            let end = start + self.members.len();

            let contiguous = end <= siblings.len()
                && siblings[start..end]
                    .iter()
                    .zip(&self.members)
                    .all(|(a, b)| Rc::ptr_eq(a, b));
            if !contiguous {
                return Err(invariant_violation("section members are no longer contiguous"));
            }

            siblings
                .splice(start..end, std::iter::once(self.wrapper.clone()))
                .collect()
        };

        self.wrapper.parent.set(Some(Rc::downgrade(&self.parent)));
        for node in &moved {
            node.parent.set(Some(Rc::downgrade(&self.wrapper)));
        }
        *self.wrapper.children.borrow_mut() = moved;

        Ok(())
    }
}

fn invariant_violation(message: &str) -> RenderError {
    log::error!("section wrapping invariant violated: {message}");
    RenderError::InternalError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{body_element, parse_fragment, serialize_body};
    use markup5ever_rcdom::RcDom;

    fn plan_body_headings(dom: &RcDom) -> SectionPlan {
        let body = body_element(dom).expect("body present");
        let mut plan = SectionPlan::new();
        let children: Vec<Handle> = body.children.borrow().clone();
        for child in &children {
            if let Some(level) = node_heading_level(child) {
                plan.record(child, level);
            }
        }
        plan
    }

    fn wrap(html: &str) -> String {
        let dom = parse_fragment(html).expect("Parse failed");
        plan_body_headings(&dom).apply().expect("Apply failed");
        serialize_body(&dom).expect("Serialize failed")
    }

    #[test]
    fn test_container_classes() {
        assert_eq!(container_class(1), Some("topic"));
        assert_eq!(container_class(2), Some("sub-topic"));
        for level in 3..=9 {
            assert_eq!(container_class(level), None);
        }
    }

    #[test]
    fn test_topic_and_sub_topic() {
        assert_eq!(
            wrap("<h1>Intro</h1><p>x</p><h2>Sub</h2><p>y</p><h1>Next</h1>"),
            "<div class=\"topic\"><h1>Intro</h1><p>x</p></div>\
             <div class=\"sub-topic\"><h2>Sub</h2><p>y</p></div>\
             <div class=\"topic\"><h1>Next</h1></div>"
        );
    }

    #[test]
    fn test_lower_levels_stop_groups_but_stay_in_place() {
        assert_eq!(
            wrap("<h1>A</h1><p>a</p><h3>C</h3><p>c</p>"),
            "<div class=\"topic\"><h1>A</h1><p>a</p></div><h3>C</h3><p>c</p>"
        );
    }

    #[test]
    fn test_unknown_heading_like_tags_do_not_stop_groups() {
        assert_eq!(
            wrap("<h2>A</h2><h10>x</h10><hx>y</hx>"),
            "<div class=\"sub-topic\"><h2>A</h2><h10>x</h10><hx>y</hx></div>"
        );
    }

    #[test]
    fn test_text_nodes_are_members() {
        assert_eq!(
            wrap("<h1>A</h1>\n<p>a</p>\n"),
            "<div class=\"topic\"><h1>A</h1>\n<p>a</p>\n</div>"
        );
    }

    #[test]
    fn test_content_before_first_heading_untouched() {
        assert_eq!(
            wrap("<p>lead</p><h2>B</h2><p>b</p>"),
            "<p>lead</p><div class=\"sub-topic\"><h2>B</h2><p>b</p></div>"
        );
    }

    #[test]
    fn test_record_does_not_mutate() {
        let dom = parse_fragment("<h1>A</h1><p>a</p>").expect("Parse failed");
        let plan = plan_body_headings(&dom);
        assert_eq!(plan.len(), 1);
        assert_eq!(
            serialize_body(&dom).expect("Serialize failed"),
            "<h1>A</h1><p>a</p>"
        );
    }

    #[test]
    fn test_parent_links_after_apply() {
        let dom = parse_fragment("<h1>A</h1><p>a</p>").expect("Parse failed");
        let body = body_element(&dom).expect("body present");
        let h1 = body.children.borrow()[0].clone();
        plan_body_headings(&dom).apply().expect("Apply failed");

        let wrapper = parent_of(&h1).expect("heading attached");
        assert!(Rc::ptr_eq(&parent_of(&wrapper).expect("wrapper attached"), &body));
        assert_eq!(wrapper.children.borrow().len(), 2);
    }

    #[test]
    fn test_moved_heading_is_invariant_violation() {
        let dom = parse_fragment("<h1>A</h1><p>a</p>").expect("Parse failed");
        let body = body_element(&dom).expect("body present");
        let h1 = body.children.borrow()[0].clone();

        let mut plan = SectionPlan::new();
        plan.record(&h1, 1);
        plan.record(&h1, 1);

        match plan.apply() {
            Err(RenderError::InternalError(msg)) => assert!(msg.contains("moved")),
            other => panic!("Expected InternalError, got: {other:?}"),
        }
    }

    #[test]
    fn test_nested_group_inside_outer_group() {
        let dom = parse_fragment("<h1>A</h1><div><h2>B</h2><p>b</p></div><p>a</p>")
            .expect("Parse failed");
        let body = body_element(&dom).expect("body present");
        let h1 = body.children.borrow()[0].clone();
        let div = body.children.borrow()[1].clone();
        let h2 = div.children.borrow()[0].clone();

        let mut plan = SectionPlan::new();
        plan.record(&h1, 1);
        plan.record(&h2, 2);
        plan.apply().expect("Apply failed");

        assert_eq!(
            serialize_body(&dom).expect("Serialize failed"),
            "<div class=\"topic\"><h1>A</h1>\
             <div><div class=\"sub-topic\"><h2>B</h2><p>b</p></div></div>\
             <p>a</p></div>"
        );
    }

    #[test]
    fn test_level_three_is_not_recorded() {
        let dom = parse_fragment("<h3>C</h3><p>c</p>").expect("Parse failed");
        assert!(plan_body_headings(&dom).is_empty());
    }
}
