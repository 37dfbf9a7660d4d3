//! Core analyzer for orchestrating lint execution.

use crate::config::{Config, RuleConfig};
use crate::context::FileContext;
use crate::rule::{Rule, RuleBox};
use crate::source::{Dialect, ParseError, SourceFile};
use crate::types::{LintResult, Location, Severity, Suggestion, Violation};
use crate::utils::allowance::{check_allow_with_reason, AllowCheck};

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Error walking the directory tree.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory (or single file) to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules to the analyzer.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds an include glob pattern.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether files with syntax errors abort the run (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined or a
    /// glob pattern is invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        // Merge patterns from config
        let mut exclude_patterns = self.exclude_patterns;
        let mut include_patterns = self.include_patterns;
        if let Some(ref config) = self.config {
            exclude_patterns.extend(config.analyzer.exclude.clone());
            include_patterns.extend(config.analyzer.include.clone());
        }

        // Add default excludes if none specified
        if exclude_patterns.is_empty() {
            exclude_patterns.extend(crate::config::AnalyzerConfig::default().exclude);
        }

        for pattern in exclude_patterns.iter().chain(&include_patterns) {
            glob::Pattern::new(pattern)?;
        }

        Ok(Analyzer {
            root,
            rules: self.rules,
            exclude_patterns,
            include_patterns,
            config: self.config.unwrap_or_default(),
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, or if a file
    /// has syntax errors and `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            match self.analyze_source(file_path, &content) {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("Failed to parse {}: {}", path.display(), message);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, message });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes one file's contents and returns its violations.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] if the file cannot be parsed, or if
    /// it has syntax errors and `fail_on_parse_error` is set.
    pub fn analyze_source(&self, path: &Path, content: &str) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let dialect = Dialect::from_path(path).unwrap_or(Dialect::Script);
        let source = SourceFile::parse(content, dialect).map_err(|e: ParseError| {
            AnalyzerError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        if source.has_errors() {
            if self.fail_on_parse_error {
                return Err(AnalyzerError::Parse {
                    path: path.to_path_buf(),
                    message: "source contains syntax errors".to_string(),
                });
            }
            warn!("{} contains syntax errors; checking what parsed", path.display());
        }

        let ctx = FileContext::new(path, &source, self.base_dir(), &self.config);
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx);
            let rule_violations = self.apply_severity_override(rule.name(), rule_violations);
            violations.extend(Self::apply_allow_directives(
                rule.as_ref(),
                content,
                rule_violations,
            ));
        }

        Ok(violations)
    }

    fn base_dir(&self) -> &Path {
        if self.root.is_file() {
            self.root.parent().unwrap_or(&self.root)
        } else {
            &self.root
        }
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Drops violations covered by `wc-lint: allow(...)` comments.
    ///
    /// A directive without a reason on a rule that requires one is
    /// replaced by a warning about the missing reason.
    fn apply_allow_directives(
        rule: &dyn Rule,
        content: &str,
        violations: Vec<Violation>,
    ) -> Vec<Violation> {
        let mut kept = Vec::with_capacity(violations.len());
        let mut reported_lines = HashSet::new();

        for v in violations {
            match check_allow_with_reason(content, v.location.line, rule.name(), rule.code()) {
                AllowCheck::Denied => kept.push(v),
                AllowCheck::Allowed { reason, line } => {
                    debug!(
                        "{} allowed at {}:{}",
                        rule.name(),
                        v.location.file.display(),
                        v.location.line
                    );
                    if rule.requires_allow_reason()
                        && reason.is_none()
                        && reported_lines.insert(line)
                    {
                        kept.push(
                            Violation::new(
                                rule.code(),
                                rule.name(),
                                Severity::Warning,
                                Location::new(v.location.file.clone(), line, 1),
                                format!(
                                    "Allow directive for '{}' is missing required reason",
                                    rule.name()
                                ),
                            )
                            .with_message_id("missingAllowReason")
                            .with_suggestion(Suggestion::new(
                                "Add reason=\"...\" to explain why this exception is necessary",
                            )),
                        );
                    }
                }
            }
        }

        kept
    }

    /// Discovers all JavaScript and TypeScript files to analyze.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || Dialect::from_path(path).is_none() {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            if !self.is_included(path) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn relative<'p>(&self, path: &'p Path) -> std::borrow::Cow<'p, str> {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        let rel_str = self.relative(path);

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) || glob_pattern.matches(&rel_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/node_modules/**"
            let normalized_pattern = pattern.replace("**", "");
            if normalized_pattern.len() > 1 && path_str.contains(&normalized_pattern) {
                return true;
            }
        }

        false
    }

    /// Checks include patterns; everything is included when none are set.
    fn is_included(&self, path: &Path) -> bool {
        if self.include_patterns.is_empty() {
            return true;
        }
        let rel_str = self.relative(path);
        self.include_patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern).is_ok_and(|p| p.matches(&rel_str))
        })
    }

    /// Gets the rule configuration for a specific rule.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.config.rules.get(rule_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traverse::{walk, ScopeTracker, Visitor};
    use tree_sitter::Node;

    /// Flags every `this.className` write inside a component.
    struct ClassNameRule;

    struct ClassNameVisitor<'a> {
        ctx: &'a FileContext<'a>,
        violations: Vec<Violation>,
    }

    impl<'a> Visitor<'a> for ClassNameVisitor<'a> {
        fn enter(&mut self, node: Node<'a>, scope: &ScopeTracker<'a>) {
            if node.kind() == "assignment_expression" && scope.is_inside_component_class() {
                self.violations.push(Violation::new(
                    "T001",
                    "class-name",
                    Severity::Error,
                    self.ctx.location(node),
                    "className write",
                ));
            }
        }
    }

    impl Rule for ClassNameRule {
        fn name(&self) -> &'static str {
            "class-name"
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
            let mut visitor = ClassNameVisitor {
                ctx,
                violations: Vec::new(),
            };
            walk(ctx, &mut visitor);
            visitor.violations
        }
    }

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/node_modules/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.root().exists());
    }

    #[test]
    fn test_invalid_glob_is_rejected() {
        let result = Analyzer::builder().root(".").exclude("[").build();
        assert!(matches!(result, Err(AnalyzerError::Glob(_))));
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root("/foo")
            .exclude("**/node_modules/**")
            .exclude("**/dist/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/foo/node_modules/lit/index.js")));
        assert!(analyzer.should_exclude(Path::new("/foo/dist/bundle.js")));
        assert!(!analyzer.should_exclude(Path::new("/foo/src/my-element.js")));
    }

    #[test]
    fn test_allow_directive_and_missing_reason() {
        let analyzer = Analyzer::builder()
            .root("/project")
            .rule(ClassNameRule)
            .build()
            .expect("build");
        let content = "class A extends HTMLElement {\n  m() {\n    // wc-lint: allow(class-name) reason=\"legacy\"\n    this.className = 'a';\n    // wc-lint: allow(class-name)\n    this.className = 'b';\n    this.className = 'c';\n  }\n}";
        let violations = analyzer
            .analyze_source(Path::new("/project/a.js"), content)
            .expect("analyze");

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert_eq!(violations[0].location.line, 5);
        assert!(violations[0].message.contains("missing required reason"));
        assert_eq!(violations[1].location.line, 7);
        assert_eq!(violations[1].location.file, PathBuf::from("a.js"));
    }

    #[test]
    fn test_severity_override_and_disabled_rule() {
        let content = "class A extends HTMLElement { m() { this.className = 'a'; } }";

        let config = Config::parse("[rules.class-name]\nseverity = \"info\"\n").expect("config");
        let analyzer = Analyzer::builder()
            .root("/project")
            .config(config)
            .rule(ClassNameRule)
            .build()
            .expect("build");
        let violations = analyzer
            .analyze_source(Path::new("/project/a.js"), content)
            .expect("analyze");
        assert_eq!(violations[0].severity, Severity::Info);

        let config = Config::parse("[rules.class-name]\nenabled = false\n").expect("config");
        let analyzer = Analyzer::builder()
            .root("/project")
            .config(config)
            .rule(ClassNameRule)
            .build()
            .expect("build");
        let violations = analyzer
            .analyze_source(Path::new("/project/a.js"), content)
            .expect("analyze");
        assert!(violations.is_empty());
    }

    #[test]
    fn test_syntax_errors_are_tolerated_unless_configured() {
        let content = "class A extends HTMLElement { m() { this.className = 'a'; }";
        let analyzer = Analyzer::builder()
            .root("/project")
            .rule(ClassNameRule)
            .build()
            .expect("build");
        assert!(analyzer
            .analyze_source(Path::new("/project/a.js"), content)
            .is_ok());

        let analyzer = Analyzer::builder()
            .root("/project")
            .fail_on_parse_error(true)
            .rule(ClassNameRule)
            .build()
            .expect("build");
        assert!(matches!(
            analyzer.analyze_source(Path::new("/project/a.js"), content),
            Err(AnalyzerError::Parse { .. })
        ));
    }
}
