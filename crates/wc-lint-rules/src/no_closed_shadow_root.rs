//! Rule to forbid closed shadow roots.
//!
//! Flags the `mode: 'closed'` property of any `x.attachShadow({...})` call.
//! Closed roots hide the element's internals from its own tooling and
//! tests without giving real encapsulation.

use tree_sitter::Node;
use wc_lint_core::{syntax, walk, FileContext, Rule, ScopeTracker, Severity, Violation, Visitor};

/// Rule code for no-closed-shadow-root.
pub const CODE: &str = "WC010";

/// Rule name for no-closed-shadow-root.
pub const NAME: &str = "no-closed-shadow-root";

const MESSAGE: &str = "Closed shadow roots are rarely needed and generally not recommended";

/// Forbids `attachShadow({mode: 'closed'})`.
#[derive(Debug, Clone)]
pub struct NoClosedShadowRoot {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoClosedShadowRoot {
    fn default() -> Self {
        Self::new()
    }
}

impl NoClosedShadowRoot {
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

impl Rule for NoClosedShadowRoot {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows closed shadow roots"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = ClosedRootVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

/// The `mode: 'closed'` pair of a single-argument `attachShadow` call.
fn closed_mode_property<'t>(call: Node<'t>, src: &str) -> Option<Node<'t>> {
    let is_attach = syntax::callee(call)
        .and_then(|c| syntax::member_property(c, src))
        .is_some_and(|p| p == "attachShadow");
    if !is_attach {
        return None;
    }
    let args = syntax::call_arguments(call);
    let &[options] = args.as_slice() else {
        return None;
    };
    if options.kind() != "object" {
        return None;
    }
    let mut cursor = options.walk();
    let found = options.named_children(&mut cursor).find(|pair| {
        pair.kind() == "pair"
            && pair
                .child_by_field_name("key")
                .and_then(|k| syntax::property_key_name(k, src))
                == Some("mode")
            && pair
                .child_by_field_name("value")
                .and_then(|v| syntax::string_value(v, src))
                == Some("closed")
    });
    found
}

struct ClosedRootVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a NoClosedShadowRoot,
    violations: Vec<Violation>,
}

impl<'a> Visitor<'a> for ClosedRootVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, _scope: &ScopeTracker<'a>) {
        if node.kind() != "call_expression" {
            return;
        }
        if let Some(property) = closed_mode_property(node, self.ctx.content) {
            self.violations.push(
                Violation::new(
                    CODE,
                    NAME,
                    self.rule.severity,
                    self.ctx.location(property),
                    MESSAGE,
                )
                .with_message_id("closedRoot")
                .with_suggestion(wc_lint_core::Suggestion::new("Use `mode: 'open'`")),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn check_code(code: &str) -> Vec<Violation> {
        testing::check(&NoClosedShadowRoot::new(), code)
    }

    #[test]
    fn test_open_roots() {
        for code in [
            "this.attachShadow({ mode: 'open' })",
            "this.attachShadow({ 'mode': 'open' })",
            "node.attachShadow()",
            "foo.bar.baz.attachShadow({ mode: 'open' })",
            "this.setAttribute('mode', 'closed')",
            "this.attachShadow('closed')",
            "this.attachShadow({ mode: 'closed' }, extra)",
        ] {
            assert!(check_code(code).is_empty(), "unexpected violation in {code}");
        }
    }

    #[test]
    fn test_closed_roots() {
        for (code, expected) in [
            ("this.attachShadow({ mode: 'closed' })", "1:21 closedRoot"),
            ("this.attachShadow({ 'mode': 'closed' })", "1:21 closedRoot"),
            ("foo.bar.baz.attachShadow({ mode: 'closed' })", "1:28 closedRoot"),
            (
                "function f(n) { n.attachShadow({ mode: 'closed' }); }",
                "1:34 closedRoot",
            ),
            (
                "this.attachShadow({\n        'unknown': 5,\n        'mode': 'closed',\n        'anotherunknown': 6\n      })",
                "3:9 closedRoot",
            ),
        ] {
            assert_eq!(testing::positions(&check_code(code)), vec![expected], "{code}");
        }
    }
}
