//! Rule to catch misspelled lifecycle callbacks and `observedAttributes`.
//!
//! A method name within edit distance 1 or 2 of a lifecycle callback name
//! (but not equal to it) is almost certainly a typo: the browser will
//! silently never call it. The same applies to a static getter close to
//! `observedAttributes`.

use tree_sitter::Node;
use wc_lint_core::syntax::{self, MethodKind};
use wc_lint_core::text::{levenshtein, likely_typo_of, TYPO_DISTANCE};
use wc_lint_core::{
    walk, FileContext, LifecycleHook, Rule, ScopeTracker, Severity, Suggestion, Violation, Visitor,
};

/// Rule code for no-typos.
pub const CODE: &str = "WC020";

/// Rule name for no-typos.
pub const NAME: &str = "no-typos";

const OBSERVED_ATTRIBUTES: &str = "observedAttributes";

/// Reports likely misspellings of well-known component members.
#[derive(Debug, Clone)]
pub struct NoTypos {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoTypos {
    fn default() -> Self {
        Self::new()
    }
}

impl NoTypos {
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

impl Rule for NoTypos {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Prevents common typos"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = TyposVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

struct TyposVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a NoTypos,
    violations: Vec<Violation>,
}

impl TyposVisitor<'_> {
    fn report(&mut self, key: Node<'_>, message_id: &str, kind: &str, replacement: &str) {
        let message =
            format!("{kind} name is likely a misspelling, did you mean \"{replacement}\"?");
        self.violations.push(
            Violation::new(CODE, NAME, self.rule.severity, self.ctx.location(key), message)
                .with_message_id(message_id)
                .with_data("replacement", replacement)
                .with_suggestion(Suggestion::new(format!("Rename to `{replacement}`"))),
        );
    }
}

impl<'a> Visitor<'a> for TyposVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, scope: &ScopeTracker<'a>) {
        if !syntax::is_class_method(node) || !scope.is_inside_component_class() {
            return;
        }
        let Some(key) = node
            .child_by_field_name("name")
            .filter(|k| k.kind() == "property_identifier")
        else {
            return;
        };
        let name = self.ctx.text(key);
        let is_static = syntax::is_static_member(node);

        match syntax::method_kind(node) {
            MethodKind::Method if !is_static && name != "constructor" => {
                if let Some(hook) = likely_typo_of(name, &LifecycleHook::method_names()) {
                    self.report(key, "method", "Method", hook);
                }
            }
            MethodKind::Get if is_static => {
                let distance = levenshtein(name, OBSERVED_ATTRIBUTES);
                if distance != 0 && distance < TYPO_DISTANCE {
                    self.report(key, "member", "Member", OBSERVED_ATTRIBUTES);
                }
            }
            _ => {}
        }
    }
}
