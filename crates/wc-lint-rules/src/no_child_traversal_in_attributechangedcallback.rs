//! Rule to forbid child traversal in `attributeChangedCallback`.
//!
//! # Rationale
//!
//! `attributeChangedCallback` runs for attributes present in markup before
//! the element's children have been parsed. Reading them there gives
//! results that depend on parse timing.
//!
//! # Detected Patterns
//!
//! - reads of child properties such as `this.children` or
//!   `this.shadowRoot.textContent`
//! - calls such as `this.querySelector(...)`
//!
//! Assignments (`this.innerHTML = ...`) are allowed.

use crate::child_traversal::{child_access, ChildAccess};
use tree_sitter::Node;
use wc_lint_core::{
    walk, FileContext, LifecycleHook, Rule, ScopeTracker, Severity, Violation, Visitor,
};

/// Rule code for no-child-traversal-in-attributechangedcallback.
pub const CODE: &str = "WC008";

/// Rule name for no-child-traversal-in-attributechangedcallback.
pub const NAME: &str = "no-child-traversal-in-attributechangedcallback";

const DOM_METHOD: &str =
    "Traversing children in the `attributeChangedCallback` method is error prone and should be avoided";
const DOM_PROP: &str = "Accessing local DOM properties in the `attributeChangedCallback` method is error prone and should be avoided";

/// Forbids child-DOM access in `attributeChangedCallback`.
#[derive(Debug, Clone)]
pub struct NoChildTraversalInAttributeChangedCallback {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoChildTraversalInAttributeChangedCallback {
    fn default() -> Self {
        Self::new()
    }
}

impl NoChildTraversalInAttributeChangedCallback {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for NoChildTraversalInAttributeChangedCallback {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows traversal of children in the `attributeChangedCallback` method"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = AttributeChangedVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

struct AttributeChangedVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a NoChildTraversalInAttributeChangedCallback,
    violations: Vec<Violation>,
}

impl<'a> Visitor<'a> for AttributeChangedVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, scope: &ScopeTracker<'a>) {
        if node.kind() != "member_expression"
            || !scope.is_inside_component_class()
            || !scope.is_inside_hook(LifecycleHook::AttributeChanged)
        {
            return;
        }
        let Some(access) = child_access(node, self.ctx.content) else {
            return;
        };
        let message = match access {
            ChildAccess::Property => DOM_PROP,
            ChildAccess::Method => DOM_METHOD,
        };
        self.violations.push(
            Violation::new(CODE, NAME, self.rule.severity, self.ctx.location(node), message)
                .with_message_id(access.message_id()),
        );
    }
}
