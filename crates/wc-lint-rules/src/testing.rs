//! Helpers for rule unit tests.

use std::path::Path;
use wc_lint_core::{Config, Dialect, FileContext, Rule, SourceFile, Violation};

/// Runs `rule` over a snippet as if it were the file at `path`.
pub fn check_file_with_config(
    rule: &dyn Rule,
    path: &str,
    code: &str,
    config: &Config,
) -> Vec<Violation> {
    let path = Path::new(path);
    let dialect = Dialect::from_path(path).unwrap_or(Dialect::Script);
    let file = SourceFile::parse(code, dialect).expect("snippet should parse");
    assert!(!file.has_errors(), "snippet has syntax errors:\n{code}");
    let ctx = FileContext::new(path, &file, Path::new(""), config);
    rule.check(&ctx)
}

/// Runs `rule` over a snippet as if it were the file at `path`.
pub fn check_file(rule: &dyn Rule, path: &str, code: &str) -> Vec<Violation> {
    check_file_with_config(rule, path, code, &Config::default())
}

/// Runs `rule` over a JavaScript snippet.
pub fn check(rule: &dyn Rule, code: &str) -> Vec<Violation> {
    check_file(rule, "test.js", code)
}

/// Configuration that recognizes extra component base classes.
pub fn config_with_bases(bases: &[&str]) -> Config {
    let mut config = Config::default();
    config.settings.element_base_classes = bases.iter().map(|b| (*b).to_string()).collect();
    config
}

/// `line:column message_id` per violation, for compact assertions.
pub fn positions(violations: &[Violation]) -> Vec<String> {
    violations
        .iter()
        .map(|v| format!("{}:{} {}", v.location.line, v.location.column, v.message_id))
        .collect()
}
