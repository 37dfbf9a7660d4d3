//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::types::{Severity, Violation};

/// A per-file lint rule over the JavaScript/TypeScript syntax tree.
///
/// Rules receive the per-file context, which carries the parsed tree, the
/// scope index and the shared component classifier. Most rules implement
/// [`crate::Visitor`] and drive it with [`crate::walk`].
///
/// # Example
///
/// ```ignore
/// use wc_lint_core::{walk, FileContext, Rule, ScopeTracker, Violation, Visitor};
/// use tree_sitter::Node;
///
/// pub struct NoConstructor;
///
/// impl Rule for NoConstructor {
///     fn name(&self) -> &'static str { "no-constructor" }
///     fn code(&self) -> &'static str { "WC011" }
///
///     fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
///         let mut visitor = ConstructorVisitor::new(ctx);
///         walk(ctx, &mut visitor);
///         visitor.violations
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "no-self-class").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "WC019").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether this rule requires a reason when using allow directives.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    /// Override this to customize the requirement.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Checks a single file and returns any violations found.
    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::source::{Dialect, SourceFile};
    use std::path::Path;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
            vec![Violation::new(
                self.code(),
                self.name(),
                self.default_severity(),
                ctx.location(ctx.root()),
                "Test violation",
            )]
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Error);
        assert!(rule.requires_allow_reason());
    }

    #[test]
    fn test_rule_check_reports_location() {
        let file = SourceFile::parse("foo();", Dialect::Script).expect("parse");
        let config = Config::default();
        let ctx = FileContext::new(Path::new("a.js"), &file, Path::new(""), &config);
        let violations = TestRule.check(&ctx);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 1);
    }
}
