//! Rule to forbid attribute and child access in component constructors.
//!
//! # Rationale
//!
//! When `document.createElement` runs the constructor the element has no
//! attributes or children yet, and the HTML standard forbids adding them there.
//!
//! # Detected Patterns
//!
//! - attribute and child methods called on `this` or `this.shadowRoot`
//!   (`getAttribute`, `appendChild`, `querySelector`, ...)
//! - reads or writes of reflected attributes and child properties
//!   (`this.id`, `this.innerHTML`, `this.shadowRoot.children`, ...)
//! - `document.write(...)` and `document.open(...)`
//!
//! Candidates are confirmed at the end of the file: the class must be a
//! component or be registered by name.

use std::collections::HashSet;
use tree_sitter::Node;
use wc_lint_core::syntax::{self, Registration};
use wc_lint_core::{walk, FileContext, Rule, ScopeTracker, Severity, Violation, Visitor};

/// Rule code for no-constructor-attributes.
pub const CODE: &str = "WC012";

/// Rule name for no-constructor-attributes.
pub const NAME: &str = "no-constructor-attributes";

const MESSAGE: &str =
    "Attributes must not be interacted with in the constructor as the element may not be ready yet.";

const BANNED_CALLS: &[&str] = &[
    "append",
    "appendChild",
    "getAttribute",
    "getElementsByClassName",
    "getElementsByTagName",
    "hasAttribute",
    "hasAttributes",
    "insertBefore",
    "querySelector",
    "querySelectorAll",
    "removeAttribute",
    "removeChild",
    "replaceChild",
    "setAttribute",
    "toggleAttribute",
];

const BANNED_MEMBERS: &[&str] = &[
    // child nodes
    "innerHTML",
    "children",
    "childNodes",
    "firstChild",
    "lastChild",
    "attributes",
    // global reflected attributes
    "accessKey",
    "autocapitalize",
    "className",
    "classList",
    "contentEditable",
    "dataset",
    "dir",
    "draggable",
    "hidden",
    "id",
    "lang",
    "slot",
    "spellcheck",
    "style",
    "tabIndex",
    "title",
    "translate",
];

/// Forbids attribute interaction in component constructors.
#[derive(Debug, Clone)]
pub struct NoConstructorAttributes {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoConstructorAttributes {
    fn default() -> Self {
        Self::new()
    }
}

impl NoConstructorAttributes {
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

impl Rule for NoConstructorAttributes {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows interaction with attributes in constructors"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = ConstructorAttrsVisitor {
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

/// Member `this.<name>` or `this.shadowRoot.<name>` with `name` in `list`.
fn is_banned_member(member: Node<'_>, src: &str, list: &[&str]) -> bool {
    syntax::member_parts(member).is_some_and(|(object, property)| {
        property.kind() == "property_identifier"
            && syntax::is_this_or_shadow_root(object, src)
            && list.contains(&syntax::text(property, src))
    })
}

fn is_banned_call(call: Node<'_>, src: &str) -> bool {
    let Some(callee) = syntax::callee(call) else {
        return false;
    };
    is_banned_member(callee, src, BANNED_CALLS)
        || syntax::is_member(callee, src, "document", "write")
        || syntax::is_member(callee, src, "document", "open")
}

struct Candidate<'a> {
    node: Node<'a>,
    is_component: bool,
    class_name: Option<String>,
}

struct ConstructorAttrsVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a NoConstructorAttributes,
    pending: Vec<Candidate<'a>>,
    registered: HashSet<&'a str>,
    violations: Vec<Violation>,
}

impl<'a> Visitor<'a> for ConstructorAttrsVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, scope: &ScopeTracker<'a>) {
        let src = self.ctx.content;

        if let Some(registration) = Registration::parse(node, src) {
            if let Some(class) = registration.class.filter(|c| c.kind() == "identifier") {
                self.registered.insert(self.ctx.text(class));
            }
        }

        if !scope.is_inside_constructor() {
            return;
        }
        let banned = match node.kind() {
            "call_expression" => is_banned_call(node, src),
            "member_expression" => is_banned_member(node, src, BANNED_MEMBERS),
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
                    .with_message_id("constructorAttrs")
                    .with_suggestion(wc_lint_core::Suggestion::new(
                        "Move this into `connectedCallback`",
                    )),
                );
            }
        }
    }
}
