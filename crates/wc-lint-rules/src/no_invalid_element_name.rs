//! Rule to validate tag names passed to `customElements.define`.
//!
//! Names the platform rejects are always reported. Names that are legal
//! but discouraged (`x-` prefixes, trailing hyphens, consecutive hyphens,
//! ...) are reported unless `loose` is set.
//!
//! # Configuration
//!
//! - `loose`: only report names that would throw (default `false`)

use tree_sitter::Node;
use wc_lint_core::elements::{validate_element_name, NameCheck};
use wc_lint_core::syntax::Registration;
use wc_lint_core::{
    walk, FileContext, Rule, RuleConfig, ScopeTracker, Severity, Violation, Visitor,
};

/// Rule code for no-invalid-element-name.
pub const CODE: &str = "WC016";

/// Rule name for no-invalid-element-name.
pub const NAME: &str = "no-invalid-element-name";

/// Validates custom element names.
#[derive(Debug, Clone)]
pub struct NoInvalidElementName {
    /// Ignore naming advice, report only invalid names.
    pub loose: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoInvalidElementName {
    fn default() -> Self {
        Self::new()
    }
}

impl NoInvalidElementName {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loose: false,
            severity: Severity::Error,
        }
    }

    /// Creates the rule from its configuration table.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        Self::new().loose(config.get_bool("loose", false))
    }

    /// Sets loose mode.
    #[must_use]
    pub fn loose(mut self, loose: bool) -> Self {
        self.loose = loose;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for NoInvalidElementName {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows invalid custom element names"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = ElementNameVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

struct ElementNameVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a NoInvalidElementName,
    violations: Vec<Violation>,
}

impl<'a> Visitor<'a> for ElementNameVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, _scope: &ScopeTracker<'a>) {
        let src = self.ctx.content;
        let Some(registration) = Registration::parse(node, src) else {
            return;
        };
        let (Some(tag), Some(name)) = (registration.tag, registration.tag_name(src)) else {
            return;
        };

        let (message_id, message) = match validate_element_name(name) {
            NameCheck::Valid => return,
            NameCheck::Warning(_) if self.rule.loose => return,
            NameCheck::Warning(message) => ("discouragedName", message),
            NameCheck::Error(message) => ("invalidName", message),
        };
        self.violations.push(
            Violation::new(CODE, NAME, self.rule.severity, self.ctx.location(tag), message)
                .with_message_id(message_id)
                .with_data("name", name),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn check_code(code: &str) -> Vec<Violation> {
        testing::check(&NoInvalidElementName::new(), code)
    }

    fn messages(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.message.as_str()).collect()
    }

    #[test]
    fn test_valid_names() {
        for code in [
            "customElements.define('my-app', class extends HTMLElement {})",
            "class MyApp extends HTMLElement {}\n      customElements.define('my-app', MyApp)",
            "customElements['define']('my-app', class extends HTMLElement {})",
            "customElements.define(tagName, class extends HTMLElement {})",
        ] {
            assert!(check_code(code).is_empty(), "unexpected violation in {code}");
        }
    }

    #[test]
    fn test_loose_mode_allows_discouraged_names() {
        let rule = NoInvalidElementName::new().loose(true);
        for name in ["polymer-app", "x-app", "ng-app", "xml-app", "my-app-", "my--app"] {
            let code = format!("customElements.define('{name}', class extends HTMLElement {{}})");
            assert!(testing::check(&rule, &code).is_empty(), "{name}");
        }
        let violations = testing::check(
            &rule,
            "customElements.define('app', class extends HTMLElement {})",
        );
        assert_eq!(testing::positions(&violations), vec!["1:23 invalidName"]);
    }

    #[test]
    fn test_invalid_names() {
        let violations = check_code(
            "class MyApp extends HTMLElement {}\n      customElements.define('my-App', MyApp)",
        );
        assert_eq!(testing::positions(&violations), vec!["2:29 invalidName"]);
        assert_eq!(
            messages(&violations),
            vec!["Custom element names must not contain uppercase ASCII characters."]
        );

        for (name, message) in [
            ("app", "Custom element names must contain a hyphen. Example: unicorn-cake"),
            ("1-app", "Custom element names must not start with a digit."),
            ("-app", "Custom element names must not start with a hyphen."),
            ("my-app!", "Invalid element name."),
        ] {
            let code = format!("customElements.define('{name}', class extends HTMLElement {{}})");
            let violations = check_code(&code);
            assert_eq!(testing::positions(&violations), vec!["1:23 invalidName"], "{name}");
            assert_eq!(messages(&violations), vec![message]);
        }
    }

    #[test]
    fn test_discouraged_names() {
        for (name, message) in [
            (
                "x-app",
                "Custom element names should not start with `x-`.\nSee: http://webcomponents.github.io/articles/how-should-i-name-my-element/",
            ),
            ("xml-app", "Custom element names should not start with `xml`."),
            ("my-app-", "Custom element names should not end with a hyphen."),
            ("my--app", "Custom element names should not contain consecutive hyphens."),
        ] {
            let code = format!("customElements.define('{name}', class extends HTMLElement {{}})");
            let violations = check_code(&code);
            assert_eq!(testing::positions(&violations), vec!["1:23 discouragedName"], "{name}");
            assert_eq!(messages(&violations), vec![message]);
        }
    }

    #[test]
    fn test_reserved_name_snapshot() {
        let violations =
            check_code("customElements.define('font-face', class extends HTMLElement {})");
        insta::assert_snapshot!(&violations[0].message, @r"
        The supplied element name is reserved and can't be used.
        See: https://html.spec.whatwg.org/multipage/scripting.html#valid-custom-element-name
        ");
    }
}
