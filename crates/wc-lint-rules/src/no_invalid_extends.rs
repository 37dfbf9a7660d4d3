//! Rule to check a registered component's superclass against the
//! `extends` option of its registration.
//!
//! # Detected Patterns
//!
//! - a component extending neither `HTMLElement` nor an allowed base
//!   (`invalid`)
//! - a component extending a built-in element class without
//!   `{extends: 'tag'}` (`invalidOrMissingExtends`)
//! - `{extends: 'tag'}` naming a different built-in than the superclass
//!   (`invalidExtends`)
//! - `{extends: 'tag'}` on a class that does not extend a built-in
//!   (`unknownExtends`)
//!
//! # Configuration
//!
//! - `allowed_super_names`: extra superclasses accepted besides
//!   `HTMLElement`

use tree_sitter::Node;
use wc_lint_core::classify::BUILTIN_BASE;
use wc_lint_core::elements::{builtin_class_for_tag, builtin_tag_for_class};
use wc_lint_core::syntax::{self, Registration};
use wc_lint_core::{
    walk, FileContext, Rule, RuleConfig, ScopeTracker, Severity, Violation, Visitor,
};

/// Rule code for no-invalid-extends.
pub const CODE: &str = "WC017";

/// Rule name for no-invalid-extends.
pub const NAME: &str = "no-invalid-extends";

/// Checks component inheritance against registration options.
#[derive(Debug, Clone)]
pub struct NoInvalidExtends {
    /// Superclasses accepted in addition to `HTMLElement`.
    pub allowed_super_names: Vec<String>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoInvalidExtends {
    fn default() -> Self {
        Self::new()
    }
}

impl NoInvalidExtends {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allowed_super_names: Vec::new(),
            severity: Severity::Error,
        }
    }

    /// Creates the rule from its configuration table.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let mut rule = Self::new();
        rule.allowed_super_names = config.get_str_array("allowed_super_names");
        rule
    }

    /// Adds an accepted superclass.
    #[must_use]
    pub fn allow(mut self, name: impl Into<String>) -> Self {
        self.allowed_super_names.push(name.into());
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Superclasses accepted for a registration with the given `extends`.
    fn allowed_for(&self, extends: Option<&str>) -> Vec<String> {
        if let Some(class) = extends.and_then(builtin_class_for_tag) {
            return vec![class.to_string()];
        }
        let mut allowed: Vec<String> = Vec::new();
        for name in self
            .allowed_super_names
            .iter()
            .map(String::as_str)
            .chain([BUILTIN_BASE])
        {
            if !allowed.iter().any(|a| a == name) {
                allowed.push(name.to_string());
            }
        }
        allowed
    }
}

impl Rule for NoInvalidExtends {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows invalid class inheritance for custom elements"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = ExtendsVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

/// Joins names as `A`, `A or B`, `A, B, or C`.
fn format_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    }
}

struct ExtendsVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a NoInvalidExtends,
    violations: Vec<Violation>,
}

impl ExtendsVisitor<'_> {
    fn report(&mut self, call: Node<'_>, message_id: &str, message: String, data: &[(&str, &str)]) {
        let mut violation = Violation::new(CODE, NAME, self.rule.severity, self.ctx.location(call), message)
            .with_message_id(message_id);
        for (key, value) in data {
            violation = violation.with_data(*key, *value);
        }
        self.violations.push(violation);
    }

    fn check_registration(&mut self, registration: &Registration<'_>) {
        let src = self.ctx.content;
        let Some(class_arg) = registration.class else {
            return;
        };
        let class = self.ctx.resolve(class_arg);
        if !syntax::is_class(class) || !self.ctx.is_component(class) {
            return;
        }

        let extends = registration.extends_option(src);
        let allowed = self.rule.allowed_for(extends);
        let allowed_names = format_names(&allowed);
        let call = registration.call;

        if syntax::superclass(class).is_none() {
            self.report(
                call,
                "invalid",
                format!("Custom element must extend {allowed_names}"),
                &[("allowedSuperNames", &allowed_names)],
            );
            return;
        }
        // Mixins and member expressions are not resolved.
        let Some(super_name) = syntax::superclass_name(class, src) else {
            return;
        };
        if allowed.iter().any(|a| a == super_name) {
            return;
        }

        match (extends, builtin_tag_for_class(super_name)) {
            (Some(actual), None) => self.report(
                call,
                "unknownExtends",
                format!(
                    "Custom element extends {super_name} but the definition includes \
                     {{extends: '{actual}'}}, which is an unknown built-in. \
                     You should probably remove the `extends` option."
                ),
                &[
                    ("allowedSuperNames", &allowed_names),
                    ("superName", super_name),
                    ("actualExtends", actual),
                ],
            ),
            (None, Some(expected)) => self.report(
                call,
                "invalidOrMissingExtends",
                format!(
                    "Custom element must extend {allowed_names}, or pass \
                     {{extends: '{expected}'}} as a third argument to `define`"
                ),
                &[
                    ("allowedSuperNames", &allowed_names),
                    ("expectedExtends", expected),
                ],
            ),
            (Some(actual), Some(expected)) if actual != expected => self.report(
                call,
                "invalidExtends",
                format!(
                    "Custom element extends {super_name} but the definition includes \
                     {{extends: '{actual}'}}. Either the element must extend \
                     {allowed_names} or the definition must include \
                     {{extends: '{expected}'}}."
                ),
                &[
                    ("allowedSuperNames", &allowed_names),
                    ("superName", super_name),
                    ("actualExtends", actual),
                    ("expectedExtends", expected),
                ],
            ),
            _ => self.report(
                call,
                "invalid",
                format!("Custom element must extend {allowed_names}"),
                &[("allowedSuperNames", &allowed_names)],
            ),
        }
    }
}

impl<'a> Visitor<'a> for ExtendsVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, _scope: &ScopeTracker<'a>) {
        if let Some(registration) = Registration::parse(node, self.ctx.content) {
            self.check_registration(&registration);
        }
    }
}
