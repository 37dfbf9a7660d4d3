//! Rule to require component classes to be exposed on the global object.
//!
//! # Detected Patterns
//!
//! - A named component class never assigned to `window.X` or
//!   `globalThis.X` (`expose`)
//! - `window.X = SomeClass` where `X` differs from the class name, or the
//!   class is anonymous (`sameName`)
//!
//! An assignment that precedes the class does not count as exposing it.

use tree_sitter::Node;
use wc_lint_core::syntax::{self, GLOBAL_OBJECTS};
use wc_lint_core::{walk, FileContext, Rule, ScopeTracker, Severity, Violation, Visitor};

/// Rule code for expose-class-on-global.
pub const CODE: &str = "WC003";

/// Rule name for expose-class-on-global.
pub const NAME: &str = "expose-class-on-global";

const EXPOSE: &str = "Custom element classes should be exposed on the global object (i.e. window)";
const SAME_NAME: &str = "The exposed global name should match that of the custom element class";

/// Requires component classes to be exposed on `window` under their own name.
#[derive(Debug, Clone)]
pub struct ExposeClassOnGlobal {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for ExposeClassOnGlobal {
    fn default() -> Self {
        Self::new()
    }
}

impl ExposeClassOnGlobal {
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

impl Rule for ExposeClassOnGlobal {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces that custom element classes are exposed on the global object (i.e. window)"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = ExposeVisitor {
            ctx,
            rule: self,
            unexposed: Vec::new(),
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

struct ExposeVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a ExposeClassOnGlobal,
    unexposed: Vec<Node<'a>>,
    violations: Vec<Violation>,
}

impl ExposeVisitor<'_> {
    fn report(&mut self, node: Node<'_>, message_id: &str, message: &str) {
        self.violations.push(
            Violation::new(CODE, NAME, self.rule.severity, self.ctx.location(node), message)
                .with_message_id(message_id),
        );
    }
}

/// Property name of `window.name` / `globalThis.name`.
fn global_property<'s>(left: Node<'_>, src: &'s str) -> Option<&'s str> {
    let (object, property) = syntax::member_parts(left)?;
    let is_global =
        object.kind() == "identifier" && GLOBAL_OBJECTS.contains(&syntax::text(object, src));
    (is_global && property.kind() == "property_identifier").then(|| syntax::text(property, src))
}

impl<'a> Visitor<'a> for ExposeVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, _scope: &ScopeTracker<'a>) {
        if syntax::is_class(node)
            && syntax::class_name(node, self.ctx.content).is_some()
            && self.ctx.is_component(node)
        {
            self.unexposed.push(node);
        }
    }

    fn leave(&mut self, node: Node<'a>, _scope: &ScopeTracker<'a>) {
        if node.kind() != "assignment_expression" {
            return;
        }
        let src = self.ctx.content;
        let (Some(left), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ) else {
            return;
        };
        let Some(global_name) = global_property(left, src) else {
            return;
        };

        let right = syntax::unwrap_parens(right);
        let class = if right.kind() == "identifier" {
            self.ctx.resolve(right)
        } else {
            right
        };
        if !syntax::is_class(class) {
            return;
        }

        self.unexposed.retain(|c| c.id() != class.id());
        if syntax::class_name(class, src) != Some(global_name) {
            self.report(node, "sameName", SAME_NAME);
        }
    }

    fn finish(&mut self) {
        for class in std::mem::take(&mut self.unexposed) {
            self.report(class, "expose", EXPOSE);
        }
    }
}
