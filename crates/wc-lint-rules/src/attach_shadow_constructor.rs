//! Rule to keep `attachShadow` calls in the constructor.
//!
//! # Rationale
//!
//! A shadow root can be attached only once. Attaching it anywhere but the
//! constructor means an upgraded or re-connected element may try again and
//! throw.
//!
//! # Detected Patterns
//!
//! - `this.attachShadow(...)` in any method of a component other than the
//!   constructor
//!
//! Classes registered by name through `customElements.define` count as
//! components even without another signal, so candidates are confirmed
//! once the whole file has been seen.

use std::collections::HashSet;
use tree_sitter::Node;
use wc_lint_core::syntax::{self, Registration};
use wc_lint_core::{walk, FileContext, Rule, ScopeTracker, Severity, Violation, Visitor};

/// Rule code for attach-shadow-constructor.
pub const CODE: &str = "WC001";

/// Rule name for attach-shadow-constructor.
pub const NAME: &str = "attach-shadow-constructor";

const MESSAGE: &str = "Attaching a Shadow Root should only occur in the constructor of an element.";

/// Requires shadow roots to be attached in the constructor.
#[derive(Debug, Clone)]
pub struct AttachShadowConstructor {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for AttachShadowConstructor {
    fn default() -> Self {
        Self::new()
    }
}

impl AttachShadowConstructor {
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

impl Rule for AttachShadowConstructor {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows attaching a shadow root outside the constructor"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = AttachShadowVisitor {
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

struct Candidate<'a> {
    call: Node<'a>,
    is_component: bool,
    class_name: Option<String>,
}

struct AttachShadowVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a AttachShadowConstructor,
    pending: Vec<Candidate<'a>>,
    registered: HashSet<String>,
    violations: Vec<Violation>,
}

impl<'a> Visitor<'a> for AttachShadowVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, scope: &ScopeTracker<'a>) {
        if node.kind() != "call_expression" {
            return;
        }
        let src = self.ctx.content;

        if let Some(registration) = Registration::parse(node, src) {
            if let Some(class) = registration.class.filter(|c| c.kind() == "identifier") {
                self.registered.insert(self.ctx.text(class).to_string());
            }
        }

        let is_attach = syntax::callee(node).is_some_and(|c| syntax::is_this_member(c, src, "attachShadow"));
        if !is_attach || scope.is_inside_constructor() {
            return;
        }
        if let Some(class) = scope.current_class() {
            self.pending.push(Candidate {
                call: node,
                is_component: class.is_component,
                class_name: class.name.clone(),
            });
        }
    }

    fn finish(&mut self) {
        for candidate in std::mem::take(&mut self.pending) {
            let registered = candidate
                .class_name
                .as_ref()
                .is_some_and(|n| self.registered.contains(n));
            if candidate.is_component || registered {
                self.violations.push(
                    Violation::new(
                        CODE,
                        NAME,
                        self.rule.severity,
                        self.ctx.location(candidate.call),
                        MESSAGE,
                    )
                    .with_message_id("attachShadowConstructor"),
                );
            }
        }
    }
}
