//! Rule to require a registered tag name to match its class name.
//!
//! `customElements.define('foo-bar', FooBar)` passes. Prefixes and
//! suffixes listed in the configuration are stripped from the class name
//! before it is kebab-cased, so `FooBarElement` can register `foo-bar`
//! with `suffix = "Element"`.
//!
//! # Configuration
//!
//! - `prefix`: string or list of class name prefixes to strip
//! - `suffix`: string or list of class name suffixes to strip

use tree_sitter::Node;
use wc_lint_core::syntax::{self, Registration};
use wc_lint_core::text::to_kebab_case;
use wc_lint_core::{
    walk, FileContext, Rule, RuleConfig, ScopeTracker, Severity, Suggestion, Violation, Visitor,
};

/// Rule code for tag-name-matches-class.
pub const CODE: &str = "WC022";

/// Rule name for tag-name-matches-class.
pub const NAME: &str = "tag-name-matches-class";

/// Requires tag names to be the kebab-cased class name.
#[derive(Debug, Clone)]
pub struct TagNameMatchesClass {
    /// Class name prefixes to strip.
    pub prefixes: Vec<String>,
    /// Class name suffixes to strip.
    pub suffixes: Vec<String>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for TagNameMatchesClass {
    fn default() -> Self {
        Self::new()
    }
}

impl TagNameMatchesClass {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefixes: Vec::new(),
            suffixes: Vec::new(),
            severity: Severity::Warning,
        }
    }

    /// Creates the rule from its configuration table.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let mut rule = Self::new();
        rule.prefixes = config.get_str_or_array("prefix").unwrap_or_default();
        rule.suffixes = config.get_str_or_array("suffix").unwrap_or_default();
        rule
    }

    /// Adds a prefix to strip.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    /// Adds a suffix to strip.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffixes.push(suffix.into());
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Tag name expected for a class.
    ///
    /// Every listed prefix and suffix the name carries is removed, in
    /// order, before kebab-casing.
    #[must_use]
    pub fn expected_tag(&self, class_name: &str) -> String {
        let mut name = class_name;
        for prefix in &self.prefixes {
            name = name.strip_prefix(prefix.as_str()).unwrap_or(name);
        }
        for suffix in &self.suffixes {
            name = name.strip_suffix(suffix.as_str()).unwrap_or(name);
        }
        to_kebab_case(name)
    }
}

impl Rule for TagNameMatchesClass {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces that the tag name of a custom element matches its class name"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = TagNameVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

struct TagNameVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a TagNameMatchesClass,
    violations: Vec<Violation>,
}

impl<'a> Visitor<'a> for TagNameVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, _scope: &ScopeTracker<'a>) {
        let src = self.ctx.content;
        let Some(registration) = Registration::parse(node, src) else {
            return;
        };
        let (Some(tag), Some(class)) = (registration.tag_name(src), registration.class) else {
            return;
        };
        let class_name = match class.kind() {
            "identifier" => Some(self.ctx.text(class)),
            "class" => syntax::class_name(class, src),
            _ => None,
        };
        let Some(class_name) = class_name else {
            return;
        };

        let expected = self.rule.expected_tag(class_name);
        if tag != expected {
            let message =
                format!("Custom element tag name should have been {expected} but was {tag}");
            self.violations.push(
                Violation::new(CODE, NAME, self.rule.severity, self.ctx.location(node), message)
                    .with_message_id("nameMismatch")
                    .with_data("expected", expected.as_str())
                    .with_data("actual", tag)
                    .with_suggestion(Suggestion::new(format!(
                        "Register `{class_name}` as `{expected}`"
                    ))),
            );
        }
    }
}
