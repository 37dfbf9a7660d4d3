//! Rule to forbid constructors in components.
//!
//! Setup belongs in `connectedCallback`, which runs once the element is in
//! the document.

use tree_sitter::Node;
use wc_lint_core::{
    walk, FileContext, MethodRole, Rule, ScopeTracker, Severity, Violation, Visitor,
};

/// Rule code for no-constructor.
pub const CODE: &str = "WC011";

/// Rule name for no-constructor.
pub const NAME: &str = "no-constructor";

const MESSAGE: &str = "Constructors should be avoided in custom elements. \
     Consider using lifecycle methods instead (e.g. `connectedCallback`)";

/// Forbids constructors in component classes.
#[derive(Debug, Clone)]
pub struct NoConstructor {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoConstructor {
    fn default() -> Self {
        Self::new()
    }
}

impl NoConstructor {
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

impl Rule for NoConstructor {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows constructors in custom element classes"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = ConstructorVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

struct ConstructorVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a NoConstructor,
    violations: Vec<Violation>,
}

impl<'a> Visitor<'a> for ConstructorVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, scope: &ScopeTracker<'a>) {
        let opens_constructor = scope
            .current_method()
            .is_some_and(|m| m.node.id() == node.id() && m.role == MethodRole::Constructor);
        if opens_constructor && scope.is_inside_component_class() {
            self.violations.push(
                Violation::new(CODE, NAME, self.rule.severity, self.ctx.location(node), MESSAGE)
                    .with_message_id("noConstructor"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn check_code(code: &str) -> Vec<Violation> {
        testing::check(&NoConstructor::new(), code)
    }

    #[test]
    fn test_plain_classes() {
        for code in [
            "class A {\n  constructor() {\n  }\n}",
            "class A extends B {\n  constructor() {\n    super();\n  }\n}",
        ] {
            assert!(check_code(code).is_empty(), "unexpected violation in {code}");
        }
    }

    #[test]
    fn test_component_constructors() {
        for (code, expected) in [
            (
                "class A extends HTMLElement {\n        constructor() {\n          super();\n        }\n      }",
                "2:9 noConstructor",
            ),
            (
                "/**\n       * @customElement\n       */\n      class A extends Element {\n        constructor() {\n          super();\n        }\n      }",
                "5:9 noConstructor",
            ),
            (
                "@customElement('x-foo')\n      class A extends Element {\n        constructor() {\n          super();\n        }\n      }",
                "3:9 noConstructor",
            ),
        ] {
            assert_eq!(testing::positions(&check_code(code)), vec![expected], "{code}");
        }
    }

    #[test]
    fn test_configured_base_class() {
        let violations = testing::check_file_with_config(
            &NoConstructor::new(),
            "test.js",
            "class A extends Element {\n        constructor() {\n          super();\n        }\n      }",
            &testing::config_with_bases(&["Element"]),
        );
        assert_eq!(testing::positions(&violations), vec!["2:9 noConstructor"]);
    }
}
