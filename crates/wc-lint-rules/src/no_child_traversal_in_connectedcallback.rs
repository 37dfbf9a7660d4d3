//! Rule to forbid child traversal in `connectedCallback`.
//!
//! # Rationale
//!
//! An element upgraded while the parser is still running is connected
//! before its children exist. Code reading children in
//! `connectedCallback` works or fails depending on where the script tag
//! sits.
//!
//! # Allowed Patterns
//!
//! Access inside functions handed to `addEventListener` or a
//! `MutationObserver` runs later and is allowed:
//!
//! ```js
//! connectedCallback() {
//!   this.addEventListener('click', () => this.querySelector('button'));
//!   new MutationObserver(() => this.children).observe(this, {childList: true});
//! }
//! ```

use crate::child_traversal::{child_access, ChildAccess};
use tree_sitter::Node;
use wc_lint_core::guard::parent_skipping_parens;
use wc_lint_core::{
    syntax, walk, FileContext, LifecycleHook, Rule, ScopeTracker, Severity, Violation, Visitor,
};

/// Rule code for no-child-traversal-in-connectedcallback.
pub const CODE: &str = "WC009";

/// Rule name for no-child-traversal-in-connectedcallback.
pub const NAME: &str = "no-child-traversal-in-connectedcallback";

const DOM_METHOD: &str =
    "Traversing children in the `connectedCallback` method is error prone and should be avoided";
const DOM_PROP: &str =
    "Accessing local DOM properties in the `connectedCallback` method is error prone and should be avoided";

/// Callees whose function arguments may traverse children.
const DEFERRED_CALLEES: &[&str] = &["addEventListener", "MutationObserver"];

/// Forbids child-DOM access in `connectedCallback`.
#[derive(Debug, Clone)]
pub struct NoChildTraversalInConnectedCallback {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoChildTraversalInConnectedCallback {
    fn default() -> Self {
        Self::new()
    }
}

impl NoChildTraversalInConnectedCallback {
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

impl Rule for NoChildTraversalInConnectedCallback {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows traversal of children in the `connectedCallback` method"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = ConnectedVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

/// Returns `true` if `function` is an argument of `addEventListener(...)`
/// or `new MutationObserver(...)`.
fn is_deferred_callback(function: Node<'_>, src: &str) -> bool {
    let Some(call) = parent_skipping_parens(function)
        .filter(|p| p.kind() == "arguments")
        .and_then(|args| args.parent())
    else {
        return false;
    };
    let target = match call.kind() {
        "call_expression" => call.child_by_field_name("function"),
        "new_expression" => call.child_by_field_name("constructor"),
        _ => None,
    };
    let name = target.map(syntax::unwrap_parens).and_then(|t| match t.kind() {
        "identifier" => Some(syntax::text(t, src)),
        "member_expression" => syntax::member_property(t, src),
        _ => None,
    });
    name.is_some_and(|n| DEFERRED_CALLEES.contains(&n))
}

/// Returns `true` if `node` sits in a deferred callback within its method.
fn in_deferred_callback(node: Node<'_>, src: &str) -> bool {
    let mut current = node.parent();
    while let Some(n) = current {
        if syntax::is_class_method(n) {
            return false;
        }
        if syntax::is_function(n) && is_deferred_callback(n, src) {
            return true;
        }
        current = n.parent();
    }
    false
}

struct ConnectedVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a NoChildTraversalInConnectedCallback,
    violations: Vec<Violation>,
}

impl<'a> Visitor<'a> for ConnectedVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, scope: &ScopeTracker<'a>) {
        if node.kind() != "member_expression"
            || !scope.is_inside_component_class()
            || !scope.is_inside_hook(LifecycleHook::Connected)
        {
            return;
        }
        let src = self.ctx.content;
        let Some(access) = child_access(node, src) else {
            return;
        };
        if in_deferred_callback(node, src) {
            return;
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn check_code(code: &str) -> Vec<Violation> {
        testing::check(&NoChildTraversalInConnectedCallback::new(), code)
    }

    #[test]
    fn test_allowed_access() {
        for code in [
            "class A extends HTMLElement {\n  connectedCallback() {\n    this.innerHTML = '<p></p>';\n  }\n}",
            "class A extends HTMLElement {\n  connectedCallback() {\n    this.addEventListener('click', () => {\n      this.querySelector('button');\n    });\n  }\n}",
            "class A extends HTMLElement {\n  connectedCallback() {\n    window.addEventListener('load', function () { return this.children; });\n  }\n}",
            "class A extends HTMLElement {\n  connectedCallback() {\n    const observer = new MutationObserver(() => {\n      if (this.firstChild) {\n        this.textContent.trim();\n      }\n    });\n  }\n}",
            "class A extends HTMLElement {\n  render() {\n    this.querySelector('x');\n  }\n}",
            "class A {\n  connectedCallback() {\n    this.children;\n  }\n}",
        ] {
            assert!(check_code(code).is_empty(), "unexpected violation in {code}");
        }
    }

    #[test]
    fn test_child_access() {
        let violations = check_code(
            r"class A extends HTMLElement {
  connectedCallback() {
    this.querySelectorAll('li');
    this.shadowRoot.innerHTML.trim();
    setTimeout(() => this.lastElementChild);
  }
}",
        );
        assert_eq!(
            testing::positions(&violations),
            vec!["3:5 domMethod", "4:5 domProp", "5:22 domProp"]
        );
        assert_eq!(violations[0].message, DOM_METHOD);
    }

    #[test]
    fn test_configured_base_class() {
        let config = testing::config_with_bases(&["LitElement"]);
        let violations = testing::check_file_with_config(
            &NoChildTraversalInConnectedCallback::new(),
            "test.js",
            "class A extends LitElement {\n  connectedCallback() {\n    this.hasChildNodes();\n  }\n}",
            &config,
        );
        assert_eq!(testing::positions(&violations), vec!["3:5 domMethod"]);
    }
}
