//! Rule to limit the number of components defined in one file.
//!
//! # Configuration
//!
//! - `max`: maximum number of component classes per file (default 1)
//!
//! Every component class past the limit is reported.

use tree_sitter::Node;
use wc_lint_core::{
    syntax, walk, ConfigError, FileContext, Rule, RuleConfig, ScopeTracker, Severity, Violation,
    Visitor,
};

/// Rule code for max-elements-per-file.
pub const CODE: &str = "WC007";

/// Rule name for max-elements-per-file.
pub const NAME: &str = "max-elements-per-file";

/// Limits the number of component classes per file.
#[derive(Debug, Clone)]
pub struct MaxElementsPerFile {
    /// Maximum number of components.
    pub max: usize,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for MaxElementsPerFile {
    fn default() -> Self {
        Self::new()
    }
}

impl MaxElementsPerFile {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max: 1,
            severity: Severity::Warning,
        }
    }

    /// Creates the rule from its configuration table.
    ///
    /// # Errors
    ///
    /// Returns an error if `max` is less than 1.
    pub fn from_config(config: &RuleConfig) -> Result<Self, ConfigError> {
        let max = config.get_int("max", 1);
        let max = usize::try_from(max)
            .ok()
            .filter(|m| *m >= 1)
            .ok_or_else(|| ConfigError::InvalidOption {
                rule: NAME.to_string(),
                key: "max".to_string(),
                message: format!("expected an integer of at least 1, got {max}"),
            })?;
        Ok(Self::new().max(max))
    }

    /// Sets the maximum.
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for MaxElementsPerFile {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces a maximum number of elements per file"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = CountVisitor {
            ctx,
            rule: self,
            count: 0,
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

struct CountVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a MaxElementsPerFile,
    count: usize,
    violations: Vec<Violation>,
}

impl<'a> Visitor<'a> for CountVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, scope: &ScopeTracker<'a>) {
        if !syntax::is_class(node) || !scope.is_inside_component_class() {
            return;
        }
        self.count += 1;
        if self.count <= self.rule.max {
            return;
        }
        let message = format!(
            "Only {} element(s) should be defined per individual file",
            self.rule.max
        );
        self.violations.push(
            Violation::new(CODE, NAME, self.rule.severity, self.ctx.location(node), message)
                .with_message_id("tooMany")
                .with_data("count", self.rule.max.to_string()),
        );
    }
}
