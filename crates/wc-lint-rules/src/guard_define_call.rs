//! Rule to require `customElements.define` calls to be guarded.
//!
//! # Rationale
//!
//! Defining the same tag twice throws. Scripts that may be loaded more than
//! once should check the registry first.
//!
//! # Allowed Patterns
//!
//! ```js
//! if (!customElements.get('x-foo')) {
//!   customElements.define('x-foo', Foo);
//! }
//! if (customElements.get('x-foo') === undefined) { /* ... */ }
//! try { customElements.define('x-foo', Foo); } catch {}
//! ```
//!
//! Each guarding lookup covers one later registration of the same tag.

use std::collections::HashSet;
use tree_sitter::Node;
use wc_lint_core::guard;
use wc_lint_core::syntax::{self, Registration};
use wc_lint_core::{walk, FileContext, Rule, ScopeTracker, Severity, Violation, Visitor};

/// Rule code for guard-define-call.
pub const CODE: &str = "WC005";

/// Rule name for guard-define-call.
pub const NAME: &str = "guard-define-call";

const MESSAGE: &str = "`customElements.define` call should be wrapped in an `if` which \
     asserts that the element has not already been defined.";

/// Requires registrations to be guarded by a registry lookup.
#[derive(Debug, Clone)]
pub struct GuardDefineCall {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for GuardDefineCall {
    fn default() -> Self {
        Self::new()
    }
}

impl GuardDefineCall {
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

impl Rule for GuardDefineCall {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Require `define(...)` calls to include an `if` statement"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = GuardDefineVisitor {
            ctx,
            rule: self,
            guarded_tags: HashSet::new(),
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

struct GuardDefineVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a GuardDefineCall,
    guarded_tags: HashSet<&'a str>,
    violations: Vec<Violation>,
}

impl<'a> Visitor<'a> for GuardDefineVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, _scope: &ScopeTracker<'a>) {
        if node.kind() != "call_expression" {
            return;
        }
        let src = self.ctx.content;
        let tag = syntax::call_arguments(node)
            .first()
            .and_then(|arg| syntax::string_value(*arg, src));
        let Some(tag) = tag else {
            return;
        };

        if Registration::parse(node, src).is_some() {
            if self.guarded_tags.remove(tag) || guard::is_in_try_block(node) {
                return;
            }
            self.violations.push(
                Violation::new(CODE, NAME, self.rule.severity, self.ctx.location(node), MESSAGE)
                    .with_message_id("guard")
                    .with_data("tag", tag),
            );
        } else if guard::is_lookup_guard(node, src) {
            self.guarded_tags.insert(tag);
        }
    }
}
