//! Rule to require guards around `super` lifecycle callback calls.
//!
//! # Rationale
//!
//! A component that extends another class cannot know whether the base
//! implements a given lifecycle callback. Calling `super.connectedCallback()`
//! on a base that lacks it throws.
//!
//! # Allowed Patterns
//!
//! ```js
//! connectedCallback() {
//!   if (super.connectedCallback) super.connectedCallback();
//!   super.disconnectedCallback && super.disconnectedCallback();
//! }
//! ```
//!
//! Classes extending `HTMLElement` directly are skipped: the platform base
//! is known not to implement the callbacks, so nobody calls them.

use std::collections::HashSet;
use tree_sitter::Node;
use wc_lint_core::guard;
use wc_lint_core::syntax::{self, Registration};
use wc_lint_core::{
    walk, FileContext, MethodRole, Rule, ScopeTracker, Severity, Violation, Visitor,
};

/// Rule code for guard-super-call.
pub const CODE: &str = "WC006";

/// Rule name for guard-super-call.
pub const NAME: &str = "guard-super-call";

const MESSAGE: &str =
    "Super calls to lifecycle callbacks should be guarded in case the base class does not implement them";

/// Requires `super.<callback>()` calls in lifecycle callbacks to be guarded.
#[derive(Debug, Clone)]
pub struct GuardSuperCall {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for GuardSuperCall {
    fn default() -> Self {
        Self::new()
    }
}

impl GuardSuperCall {
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

impl Rule for GuardSuperCall {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a guard before calling a super method inside a lifecycle callback"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = GuardSuperVisitor {
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

struct PendingCall<'a> {
    statement: Node<'a>,
    hook: &'static str,
    is_component: bool,
    class_name: Option<String>,
}

struct GuardSuperVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a GuardSuperCall,
    pending: Vec<PendingCall<'a>>,
    registered: HashSet<&'a str>,
    violations: Vec<Violation>,
}

impl<'a> Visitor<'a> for GuardSuperVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, scope: &ScopeTracker<'a>) {
        let src = self.ctx.content;

        if let Some(registration) = Registration::parse(node, src) {
            if let Some(class) = registration.class.filter(|c| c.kind() == "identifier") {
                self.registered.insert(self.ctx.text(class));
            }
            return;
        }

        let Some(method) = scope.current_method().filter(|m| m.node.id() == node.id()) else {
            return;
        };
        let MethodRole::Lifecycle(hook) = method.role else {
            return;
        };
        let Some(class) = scope.current_class() else {
            return;
        };
        if class.is_direct_base_subclass {
            return;
        }
        let Some(body) = node.child_by_field_name("body") else {
            return;
        };

        if let Some(statement) = guard::find_unguarded_call(body, src, hook.method_name()) {
            self.pending.push(PendingCall {
                statement,
                hook: hook.method_name(),
                is_component: class.is_component,
                class_name: class.name.clone(),
            });
        }
    }

    fn finish(&mut self) {
        for call in std::mem::take(&mut self.pending) {
            let registered = call
                .class_name
                .as_deref()
                .is_some_and(|n| self.registered.contains(n));
            if !call.is_component && !registered {
                continue;
            }
            let callee = syntax::text(call.statement, self.ctx.content).trim_end_matches(';');
            self.violations.push(
                Violation::new(
                    CODE,
                    NAME,
                    self.rule.severity,
                    self.ctx.location(call.statement),
                    MESSAGE,
                )
                .with_message_id("guardSuperCall")
                .with_data("hook", call.hook)
                .with_suggestion(wc_lint_core::Suggestion::new(format!(
                    "Wrap the call: `if (super.{}) {{ {callee}; }}`",
                    call.hook
                ))),
            );
        }
    }
}
