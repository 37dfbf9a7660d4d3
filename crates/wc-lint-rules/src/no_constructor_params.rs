//! Rule to forbid constructor parameters in components.
//!
//! The platform constructs elements itself (`document.createElement`,
//! parsing markup) and never passes arguments.

use tree_sitter::Node;
use wc_lint_core::{
    walk, FileContext, MethodRole, Rule, ScopeTracker, Severity, Violation, Visitor,
};

/// Rule code for no-constructor-params.
pub const CODE: &str = "WC013";

/// Rule name for no-constructor-params.
pub const NAME: &str = "no-constructor-params";

const MESSAGE: &str =
    "Constructors must be parameterless as they are created indirectly when appended to DOM.";

/// Forbids parameters on component constructors.
#[derive(Debug, Clone)]
pub struct NoConstructorParams {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoConstructorParams {
    fn default() -> Self {
        Self::new()
    }
}

impl NoConstructorParams {
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

impl Rule for NoConstructorParams {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows constructor parameters in custom elements"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = ConstructorParamsVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

fn has_parameters(method: Node<'_>) -> bool {
    method
        .child_by_field_name("parameters")
        .is_some_and(|params| {
            let mut cursor = params.walk();
            let found = params
                .named_children(&mut cursor)
                .any(|p| p.kind() != "comment");
            found
        })
}

struct ConstructorParamsVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a NoConstructorParams,
    violations: Vec<Violation>,
}

impl<'a> Visitor<'a> for ConstructorParamsVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, scope: &ScopeTracker<'a>) {
        let opens_constructor = scope
            .current_method()
            .is_some_and(|m| m.node.id() == node.id() && m.role == MethodRole::Constructor);
        if opens_constructor && scope.is_inside_component_class() && has_parameters(node) {
            self.violations.push(
                Violation::new(CODE, NAME, self.rule.severity, self.ctx.location(node), MESSAGE)
                    .with_message_id("noParams"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn check_code(code: &str) -> Vec<Violation> {
        testing::check(&NoConstructorParams::new(), code)
    }

    #[test]
    fn test_parameterless_constructors() {
        for code in [
            "class Foo {}",
            "class Foo extends Unknown {\n  constructor(arg1) {}\n}",
            "class Foo extends HTMLElement {\n  constructor() {}\n}",
            "/** @customElement */\nclass Foo extends Bar {\n  constructor() {}\n}",
            "@customElement('x-foo')\nclass Foo extends Bar {\n  constructor() {}\n}",
            "class Foo extends HTMLElement {\n  method(a, b) {}\n}",
        ] {
            assert!(check_code(code).is_empty(), "unexpected violation in {code}");
        }
    }

    #[test]
    fn test_constructor_with_parameters() {
        for (code, expected) in [
            (
                "class Foo extends HTMLElement {\n        constructor(param1) {}\n      }",
                "2:9 noParams",
            ),
            (
                "/** @customElement */\n      class Foo extends Bar {\n        constructor(param1) {}\n      }",
                "3:9 noParams",
            ),
            (
                "@customElement('x-foo')\n      class Foo extends Bar {\n        constructor(param1) {}\n      }",
                "3:9 noParams",
            ),
        ] {
            assert_eq!(testing::positions(&check_code(code)), vec![expected], "{code}");
        }
    }
}
