//! Rule to require `customElements.define` after the class it registers.
//!
//! # Detected Patterns
//!
//! - A named component class with no later `customElements.define` call
//!   whose class argument resolves to it (`unregistered`)
//! - A class expression passed inline to `customElements.define`
//!   (`noExpressions`)
//!
//! A registration that comes before the class in traversal order does not
//! count. Registrations whose class argument cannot be resolved (calls,
//! unknown names) never mark a class as registered.

use tree_sitter::Node;
use wc_lint_core::syntax::{self, Registration};
use wc_lint_core::{walk, FileContext, Rule, ScopeTracker, Severity, Violation, Visitor};

/// Rule code for define-tag-after-class-definition.
pub const CODE: &str = "WC002";

/// Rule name for define-tag-after-class-definition.
pub const NAME: &str = "define-tag-after-class-definition";

const UNREGISTERED: &str =
    "Custom element class has not been registered with a `customElements.define` call";
const NO_EXPRESSIONS: &str = "Custom element classes should not be declared inline. \
     They should be exported as concrete class declarations.";

/// Requires every component class to be registered after its definition.
#[derive(Debug, Clone)]
pub struct DefineTagAfterClassDefinition {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for DefineTagAfterClassDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl DefineTagAfterClassDefinition {
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

impl Rule for DefineTagAfterClassDefinition {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces that the `define(...)` call happens after the associated class has been defined"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = DefineOrderVisitor {
            ctx,
            rule: self,
            unregistered: Vec::new(),
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

struct DefineOrderVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a DefineTagAfterClassDefinition,
    unregistered: Vec<Node<'a>>,
    violations: Vec<Violation>,
}

impl DefineOrderVisitor<'_> {
    fn report(&mut self, node: Node<'_>, message_id: &str, message: &str) {
        self.violations.push(
            Violation::new(CODE, NAME, self.rule.severity, self.ctx.location(node), message)
                .with_message_id(message_id),
        );
    }
}

impl<'a> Visitor<'a> for DefineOrderVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, _scope: &ScopeTracker<'a>) {
        let src = self.ctx.content;

        if syntax::is_class(node) {
            if syntax::class_name(node, src).is_some() && self.ctx.is_component(node) {
                self.unregistered.push(node);
            }
            return;
        }

        let Some(registration) = Registration::parse(node, src) else {
            return;
        };
        let Some(class) = registration.class else {
            return;
        };
        if syntax::is_class(class) {
            self.unregistered.retain(|c| c.id() != class.id());
            self.report(class, "noExpressions", NO_EXPRESSIONS);
        } else if class.kind() == "identifier" {
            let target = self.ctx.resolve(class);
            self.unregistered.retain(|c| c.id() != target.id());
        }
    }

    fn finish(&mut self) {
        for class in std::mem::take(&mut self.unregistered) {
            self.report(class, "unregistered", UNREGISTERED);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn check_code(code: &str) -> Vec<Violation> {
        testing::check(&DefineTagAfterClassDefinition::new(), code)
    }

    #[test]
    fn test_registered_classes() {
        for code in [
            "class Foo {}",
            "class Foo extends HTMLElement {}\ncustomElements.define('x-foo', Foo);",
            "class Foo extends HTMLElement {}\nconst x = 303;\ncustomElements.define('x-foo', Foo);",
            "class Foo extends HTMLElement {}\nwindow.customElements.define('x-foo', Foo);",
            "/** @customElement x-foo */\nclass Foo extends Bar {}\ncustomElements.define('x-foo', Foo);",
            "customElements.define('x-foo', Foo);",
            "const Foo = doSomeBlackBoxThing();\ncustomElements.define('x-foo', Foo);",
        ] {
            assert!(check_code(code).is_empty(), "unexpected violation in {code}");
        }
    }

    #[test]
    fn test_configured_base_class() {
        let config = testing::config_with_bases(&["Bar"]);
        let rule = DefineTagAfterClassDefinition::new();
        let violations = testing::check_file_with_config(
            &rule,
            "test.js",
            "class Foo extends Bar {}\ncustomElements.define('x-foo', Foo);",
            &config,
        );
        assert!(violations.is_empty());

        let violations =
            testing::check_file_with_config(&rule, "test.js", "class Foo extends Bar {}", &config);
        assert_eq!(testing::positions(&violations), vec!["1:1 unregistered"]);
    }

    #[test]
    fn test_unregistered_classes() {
        for code in [
            "class Foo extends HTMLElement {}",
            "class Foo extends HTMLElement {}\ncustomElements.define('x-foo', someThingElse);",
            "class Foo extends HTMLElement {}\ncustomElements.define('x-foo', someDynamicThing());",
            "class Foo extends HTMLElement {}\nsomeOtherNonsense.define('x-foo', Foo);",
        ] {
            let violations = check_code(code);
            assert_eq!(testing::positions(&violations), vec!["1:1 unregistered"], "{code}");
        }
    }

    #[test]
    fn test_registration_before_class() {
        let violations =
            check_code("customElements.define('x-foo', Foo);\n      class Foo extends HTMLElement {}");
        assert_eq!(testing::positions(&violations), vec!["2:7 unregistered"]);
    }

    #[test]
    fn test_doc_comment_component() {
        let violations = check_code("/** @customElement x-foo */\n      class Foo extends Bar {}");
        assert_eq!(testing::positions(&violations), vec!["2:7 unregistered"]);
    }

    #[test]
    fn test_inline_class_expression() {
        let violations =
            check_code("customElements.define('x-foo', class extends HTMLElement {\n});");
        assert_eq!(testing::positions(&violations), vec!["1:32 noExpressions"]);
    }
}
