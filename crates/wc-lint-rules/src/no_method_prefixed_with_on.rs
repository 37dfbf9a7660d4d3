//! Rule to forbid component methods whose names start with `on`.
//!
//! Such names clash with event handler properties (`onclick`,
//! `onchange`) the element already inherits.

use tree_sitter::Node;
use wc_lint_core::syntax;
use wc_lint_core::{walk, FileContext, Rule, ScopeTracker, Severity, Violation, Visitor};

/// Rule code for no-method-prefixed-with-on.
pub const CODE: &str = "WC018";

/// Rule name for no-method-prefixed-with-on.
pub const NAME: &str = "no-method-prefixed-with-on";

const MESSAGE: &str =
    "Avoid using `on` as a prefix of method names as they can easily conflict with reserved event handler names";

/// Forbids `on`-prefixed method names in components.
#[derive(Debug, Clone)]
pub struct NoMethodPrefixedWithOn {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoMethodPrefixedWithOn {
    fn default() -> Self {
        Self::new()
    }
}

impl NoMethodPrefixedWithOn {
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

impl Rule for NoMethodPrefixedWithOn {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows class methods with prefix on"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = PrefixVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

struct PrefixVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a NoMethodPrefixedWithOn,
    violations: Vec<Violation>,
}

impl<'a> Visitor<'a> for PrefixVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, scope: &ScopeTracker<'a>) {
        if !syntax::is_class_method(node) || !scope.is_inside_component_class() {
            return;
        }
        let Some(name) = syntax::member_name(node, self.ctx.content) else {
            return;
        };
        if name.starts_with("on") {
            self.violations.push(
                Violation::new(CODE, NAME, self.rule.severity, self.ctx.location(node), MESSAGE)
                    .with_message_id("noPrefix")
                    .with_data("name", name),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn check_code(code: &str) -> Vec<Violation> {
        testing::check(&NoMethodPrefixedWithOn::new(), code)
    }

    #[test]
    fn test_valid_methods() {
        for code in [
            "class A {}",
            "const x = 303;",
            "class A {\n        onFoo() {\n        }\n      }",
            "class A extends B {\n        onFoo() {\n        }\n      }",
            "class A extends HTMLElement {\n        someMethod() {\n        }\n      }",
            "class A extends HTMLElement {\n        [onSomethingButImAConst]() {\n        }\n      }",
        ] {
            assert!(check_code(code).is_empty(), "unexpected violation in {code}");
        }
    }

    #[test]
    fn test_prefixed_methods() {
        for code in [
            "class A extends HTMLElement {\n        onFoo() {\n        }\n      }",
            "class A extends HTMLElement {\n        onfoo() {\n        }\n      }",
            "class A extends HTMLElement {\n        ['onFoo']() {\n        }\n      }",
            "class A extends HTMLElement {\n        #onFoo() {\n        }\n      }",
        ] {
            assert_eq!(testing::positions(&check_code(code)), vec!["2:9 noPrefix"], "{code}");
        }
    }

    #[test]
    fn test_other_component_signals() {
        let violations = check_code(
            "/**\n       * @customElement\n       */\n      class A extends SomeElement {\n        onFoo() {\n        }\n      }",
        );
        assert_eq!(testing::positions(&violations), vec!["5:9 noPrefix"]);

        let violations = check_code(
            "@customElement('x-foo')\n      class A extends SomeElement {\n        onFoo() {\n        }\n      }",
        );
        assert_eq!(testing::positions(&violations), vec!["3:9 noPrefix"]);

        let violations = testing::check_file_with_config(
            &NoMethodPrefixedWithOn::new(),
            "test.js",
            "class A extends SomeElement {\n        onFoo() {\n        }\n      }",
            &testing::config_with_bases(&["SomeElement"]),
        );
        assert_eq!(testing::positions(&violations), vec!["2:9 noPrefix"]);
    }

    #[test]
    fn test_nested_plain_class_is_ignored() {
        let violations = check_code(
            "class A extends HTMLElement {\n  render() {\n    return class {\n      onFoo() {}\n    };\n  }\n}",
        );
        assert!(violations.is_empty());
    }
}
