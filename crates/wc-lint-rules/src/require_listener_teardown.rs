//! Rule to require listeners added in `connectedCallback` to be removed in
//! `disconnectedCallback`.
//!
//! # Detected Patterns
//!
//! - `host.addEventListener('type', ...)` in `connectedCallback` with no
//!   `host.removeEventListener('type', ...)` in `disconnectedCallback` of
//!   the same class (`noTeardown`)
//! - An inline function or `.bind(...)` result passed as the handler to
//!   either call (`noArrowBind`); removing such a handler never matches
//!   the one that was added
//!
//! Only string-literal event types on tracked hosts are paired. Hosts are
//! compared by their source text.
//!
//! # Configuration
//!
//! - `hosts`: host expressions to track (default `this`, `window`,
//!   `document`)

use tree_sitter::Node;
use wc_lint_core::syntax;
use wc_lint_core::{
    walk, FileContext, LifecycleHook, Rule, RuleConfig, ScopeTracker, Severity, Violation,
    Visitor,
};

/// Rule code for require-listener-teardown.
pub const CODE: &str = "WC021";

/// Rule name for require-listener-teardown.
pub const NAME: &str = "require-listener-teardown";

const NO_TEARDOWN: &str =
    "Event listeners attached in `connectedCallback` should be torn down during `disconnectedCallback`";
const NO_ARROW_BIND: &str = "Using an inline arrow function or `bind(...)` will result in creating a new function each time you call add/removeEventListener. This will result in the original handler not being removed as expected. You should instead store a reference to the function and pass that in as your handler.";

/// Hosts tracked when no `hosts` option is given.
pub const DEFAULT_HOSTS: &[&str] = &["this", "window", "document"];

/// Requires event listeners to be torn down on disconnect.
#[derive(Debug, Clone)]
pub struct RequireListenerTeardown {
    /// Host expressions whose listeners are tracked.
    pub hosts: Vec<String>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for RequireListenerTeardown {
    fn default() -> Self {
        Self::new()
    }
}

impl RequireListenerTeardown {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hosts: DEFAULT_HOSTS.iter().map(|h| (*h).to_string()).collect(),
            severity: Severity::Error,
        }
    }

    /// Creates the rule from its configuration table.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let mut rule = Self::new();
        if let Some(hosts) = config.get_str_or_array("hosts") {
            rule.hosts = hosts;
        }
        rule
    }

    /// Replaces the tracked hosts.
    #[must_use]
    pub fn hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for RequireListenerTeardown {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires that listeners be cleaned up on DOM disconnect"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = TeardownVisitor {
            ctx,
            rule: self,
            classes: Vec::new(),
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

/// Arrow functions, function expressions and `fn.bind(...)` calls.
fn is_inline_function(node: Node<'_>, src: &str) -> bool {
    match node.kind() {
        "arrow_function" | "function_expression" | "function" => true,
        "call_expression" => syntax::callee(node)
            .and_then(|c| syntax::member_property(c, src))
            .is_some_and(|p| p == "bind"),
        _ => false,
    }
}

/// Listeners added by one class and not yet removed, keyed `host:type`.
type Pending<'a> = Vec<(String, Node<'a>)>;

struct TeardownVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a RequireListenerTeardown,
    classes: Vec<Pending<'a>>,
    violations: Vec<Violation>,
}

impl<'a> TeardownVisitor<'a> {
    /// `host:type` key of a tracked listener call, after reporting an
    /// inline handler.
    fn listener_call(&mut self, call: Node<'a>, method: &str) -> Option<String> {
        let src = self.ctx.content;
        let callee = syntax::callee(call)?;
        let (object, property) = syntax::member_parts(callee)?;
        if syntax::text(property, src) != method {
            return None;
        }
        let host = syntax::text(object, src);
        if !self.rule.hosts.iter().any(|h| h == host) {
            return None;
        }

        let args = syntax::call_arguments(call);
        if let Some(handler) = args.get(1).copied().filter(|h| is_inline_function(*h, src)) {
            self.violations.push(
                Violation::new(
                    CODE,
                    NAME,
                    self.rule.severity,
                    self.ctx.location(handler),
                    NO_ARROW_BIND,
                )
                .with_message_id("noArrowBind"),
            );
        }

        let event = args.first().and_then(|a| syntax::string_value(*a, src))?;
        Some(format!("{host}:{event}"))
    }
}

impl<'a> Visitor<'a> for TeardownVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, scope: &ScopeTracker<'a>) {
        if syntax::is_class(node) {
            self.classes.push(Vec::new());
            return;
        }
        if node.kind() != "call_expression" {
            return;
        }

        if scope.is_inside_hook(LifecycleHook::Connected) {
            let Some(key) = self.listener_call(node, "addEventListener") else {
                return;
            };
            if let Some(pending) = self.classes.last_mut() {
                match pending.iter_mut().find(|(k, _)| *k == key) {
                    Some(entry) => entry.1 = node,
                    None => pending.push((key, node)),
                }
            }
        } else if scope.is_inside_hook(LifecycleHook::Disconnected) {
            let Some(key) = self.listener_call(node, "removeEventListener") else {
                return;
            };
            if let Some(pending) = self.classes.last_mut() {
                pending.retain(|(k, _)| *k != key);
            }
        }
    }

    fn leave(&mut self, node: Node<'a>, _scope: &ScopeTracker<'a>) {
        if !syntax::is_class(node) {
            return;
        }
        let Some(pending) = self.classes.pop() else {
            return;
        };
        for (key, call) in pending {
            self.violations.push(
                Violation::new(CODE, NAME, self.rule.severity, self.ctx.location(call), NO_TEARDOWN)
                    .with_message_id("noTeardown")
                    .with_data("listener", key),
            );
        }
    }
}
