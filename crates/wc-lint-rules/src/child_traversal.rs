//! Child-DOM access shared by the lifecycle traversal rules.

use tree_sitter::Node;
use wc_lint_core::guard::parent_skipping_parens;
use wc_lint_core::syntax;

/// Properties that read the element's children.
pub(crate) const CHILD_PROPERTIES: &[&str] = &[
    // ParentNode
    "childElementCount",
    "children",
    "firstElementChild",
    "lastElementChild",
    // Node
    "childNodes",
    "firstChild",
    "innerHTML",
    "innerText",
    "lastChild",
    "textContent",
];

/// Methods that traverse or mutate the element's children.
pub(crate) const CHILD_METHODS: &[&str] = &[
    // Document
    "getElementById",
    "getElementsByClassName",
    "getElementsByTagName",
    // ParentNode
    "querySelector",
    "querySelectorAll",
    // Node
    "contains",
    "hasChildNodes",
    "insertBefore",
    "removeChild",
    "replaceChild",
];

/// Kind of child access found on `this` or `this.shadowRoot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChildAccess {
    /// Read of a child property.
    Property,
    /// Call of a traversal method.
    Method,
}

impl ChildAccess {
    pub(crate) fn message_id(self) -> &'static str {
        match self {
            Self::Property => "domProp",
            Self::Method => "domMethod",
        }
    }
}

/// Classifies a member expression as a child access on `this` or
/// `this.shadowRoot`.
///
/// Members that are part of an assignment (`this.innerHTML = ...`) are not
/// accesses.
pub(crate) fn child_access(member: Node<'_>, src: &str) -> Option<ChildAccess> {
    let (object, property) = syntax::member_parts(member)?;
    if property.kind() != "property_identifier" {
        return None;
    }
    let parent = parent_skipping_parens(member)?;
    if matches!(
        parent.kind(),
        "assignment_expression" | "augmented_assignment_expression"
    ) {
        return None;
    }
    if !syntax::is_this_or_shadow_root(object, src) {
        return None;
    }

    let name = syntax::text(property, src);
    if CHILD_PROPERTIES.contains(&name) {
        return Some(ChildAccess::Property);
    }
    let is_callee = syntax::callee(parent)
        .map(syntax::unwrap_parens)
        .is_some_and(|c| c.id() == member.id());
    (is_callee && CHILD_METHODS.contains(&name)).then_some(ChildAccess::Method)
}
