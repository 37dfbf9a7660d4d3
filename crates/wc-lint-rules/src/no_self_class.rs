//! Rule to forbid a component mutating its own `class` attribute.
//!
//! The host element's classes belong to whoever uses the element.
//! Flagged inside components (or classes registered by name):
//!
//! - `this.classList.add/remove/toggle/replace(...)`
//! - `this.setAttribute('class', ...)`
//! - `this.className = ...` and `this.className += ...`

use std::collections::HashSet;
use tree_sitter::Node;
use wc_lint_core::syntax::{self, Registration};
use wc_lint_core::{walk, FileContext, Rule, ScopeTracker, Severity, Violation, Visitor};

/// Rule code for no-self-class.
pub const CODE: &str = "WC019";

/// Rule name for no-self-class.
pub const NAME: &str = "no-self-class";

const MESSAGE: &str =
    "Classes should be considered owned by the consumer of the element, meaning they should never be mutated on `this`.";

const CLASS_LIST_METHODS: &[&str] = &["add", "remove", "toggle", "replace"];

/// Forbids class mutations on `this`.
#[derive(Debug, Clone)]
pub struct NoSelfClass {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoSelfClass {
    fn default() -> Self {
        Self::new()
    }
}

impl NoSelfClass {
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

impl Rule for NoSelfClass {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows class mutations on self"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = SelfClassVisitor {
            ctx,
            rule: self,
            pending: Vec::new(),
            registered: HashSet::new(),
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

/// `this.classList.add(...)` and friends, or `this.setAttribute('class', ...)`.
fn is_banned_call(call: Node<'_>, src: &str) -> bool {
    let Some(callee) = syntax::callee(call) else {
        return false;
    };
    let Some((object, property)) = syntax::member_parts(callee) else {
        return false;
    };
    let method = syntax::text(property, src);

    if syntax::is_this_member(object, src, "classList") {
        return CLASS_LIST_METHODS.contains(&method);
    }
    object.kind() == "this"
        && method == "setAttribute"
        && syntax::call_arguments(call)
            .first()
            .and_then(|arg| syntax::string_value(*arg, src))
            == Some("class")
}

/// `this.className = ...` or `this.className += ...`.
fn is_banned_assignment(assignment: Node<'_>, src: &str) -> bool {
    assignment
        .child_by_field_name("left")
        .is_some_and(|left| syntax::is_this_member(left, src, "className"))
}

struct Candidate<'a> {
    node: Node<'a>,
    is_component: bool,
    class_name: Option<String>,
}

struct SelfClassVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a NoSelfClass,
    pending: Vec<Candidate<'a>>,
    registered: HashSet<&'a str>,
    violations: Vec<Violation>,
}

impl<'a> Visitor<'a> for SelfClassVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, scope: &ScopeTracker<'a>) {
        let src = self.ctx.content;

        if let Some(registration) = Registration::parse(node, src) {
            if let Some(class) = registration.class.filter(|c| c.kind() == "identifier") {
                self.registered.insert(self.ctx.text(class));
            }
        }

        let banned = match node.kind() {
            "call_expression" => is_banned_call(node, src),
            "assignment_expression" | "augmented_assignment_expression" => {
                is_banned_assignment(node, src)
            }
            _ => false,
        };
        if !banned {
            return;
        }
        if let Some(class) = scope.current_class() {
            self.pending.push(Candidate {
                node,
                is_component: class.is_component,
                class_name: class.name.clone(),
            });
        }
    }

    fn finish(&mut self) {
        for candidate in std::mem::take(&mut self.pending) {
            let registered = candidate
                .class_name
                .as_deref()
                .is_some_and(|n| self.registered.contains(n));
            if candidate.is_component || registered {
                self.violations.push(
                    Violation::new(
                        CODE,
                        NAME,
                        self.rule.severity,
                        self.ctx.location(candidate.node),
                        MESSAGE,
                    )
                    .with_message_id("selfClass"),
                );
            }
        }
    }
}
