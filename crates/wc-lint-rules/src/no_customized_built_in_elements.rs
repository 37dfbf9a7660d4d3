//! Rule to forbid customized built-in elements.
//!
//! Components extending `HTMLParagraphElement`, `HTMLButtonElement` and
//! the like are not supported by every browser.

use tree_sitter::Node;
use wc_lint_core::classify::BUILTIN_BASE;
use wc_lint_core::elements::is_builtin_element_class;
use wc_lint_core::{walk, FileContext, Rule, ScopeTracker, Severity, Violation, Visitor};

/// Rule code for no-customized-built-in-elements.
pub const CODE: &str = "WC014";

/// Rule name for no-customized-built-in-elements.
pub const NAME: &str = "no-customized-built-in-elements";

const MESSAGE: &str = "You should avoid extending built-in elements as support is not guaranteed.";

/// Forbids components extending built-in element classes.
#[derive(Debug, Clone)]
pub struct NoCustomizedBuiltInElements {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoCustomizedBuiltInElements {
    fn default() -> Self {
        Self::new()
    }
}

impl NoCustomizedBuiltInElements {
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

impl Rule for NoCustomizedBuiltInElements {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows extending of built-in elements"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = BuiltInVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

struct BuiltInVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a NoCustomizedBuiltInElements,
    violations: Vec<Violation>,
}

impl<'a> Visitor<'a> for BuiltInVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, scope: &ScopeTracker<'a>) {
        let Some(class) = scope.current_class().filter(|c| c.node.id() == node.id()) else {
            return;
        };
        if !class.is_component {
            return;
        }
        let Some(superclass) = class.superclass.as_deref() else {
            return;
        };
        if superclass != BUILTIN_BASE && is_builtin_element_class(superclass) {
            self.violations.push(
                Violation::new(CODE, NAME, self.rule.severity, self.ctx.location(node), MESSAGE)
                    .with_message_id("noBuiltIn")
                    .with_data("superclass", superclass),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn check_code(code: &str) -> Vec<Violation> {
        testing::check(&NoCustomizedBuiltInElements::new(), code)
    }

    #[test]
    fn test_autonomous_elements() {
        for code in [
            "const x = 808;",
            "class A extends HTMLElement {}",
            "class A extends B {}",
            "/** @customElement */\nclass A extends B {}",
            "/** @customElement */\nclass A extends HTMLElement {}",
            "class A extends HTMLDivElement {}",
        ] {
            assert!(check_code(code).is_empty(), "unexpected violation in {code}");
        }
    }

    #[test]
    fn test_built_in_superclasses() {
        for (code, expected) in [
            (
                "/** @customElement */ class A extends HTMLParagraphElement {}",
                "1:23 noBuiltIn",
            ),
            (
                "/** @customElement */ class A extends HTMLDivElement {}",
                "1:23 noBuiltIn",
            ),
            (
                "@customElement('x-foo') class A extends HTMLBodyElement {}",
                "1:1 noBuiltIn",
            ),
        ] {
            assert_eq!(testing::positions(&check_code(code)), vec![expected], "{code}");
        }
    }

    #[test]
    fn test_configured_base_classes() {
        let config = testing::config_with_bases(&["SomeElement"]);
        let rule = NoCustomizedBuiltInElements::new();
        let violations =
            testing::check_file_with_config(&rule, "test.js", "class A extends SomeElement {}", &config);
        assert!(violations.is_empty());

        let violations = testing::check_file_with_config(
            &rule,
            "test.js",
            "/** @customElement */ class A extends HTMLParagraphElement {}",
            &config,
        );
        assert_eq!(testing::positions(&violations), vec!["1:23 noBuiltIn"]);
    }
}
