//! Rule to require a file's name to match the component class it contains.
//!
//! # Configuration
//!
//! - `transform`: casing(s) applied to the class name, one of `none`,
//!   `snake`, `kebab`, `pascal`, `camel` (default `["kebab", "camel"]`)
//! - `prefix` / `suffix`: string or list stripped from the class name
//!   before comparing
//! - `match_directory`: also strip prefixes formed by the file's directory
//!   names
//!
//! # Example
//!
//! With the defaults, `class SomeElement extends HTMLElement {}` belongs in
//! `some-element.js` or `someElement.js`.

use std::path::Component;
use tree_sitter::Node;
use wc_lint_core::text::Case;
use wc_lint_core::{
    syntax, walk, ConfigError, FileContext, Rule, RuleConfig, ScopeTracker, Severity, Violation,
    Visitor,
};

/// Rule code for file-name-matches-element.
pub const CODE: &str = "WC004";

/// Rule name for file-name-matches-element.
pub const NAME: &str = "file-name-matches-element";

/// Requires file names to match the component class name.
#[derive(Debug, Clone)]
pub struct FileNameMatchesElement {
    /// Casings accepted for the file name.
    pub transforms: Vec<Case>,
    /// Prefixes stripped from class names.
    pub prefixes: Vec<String>,
    /// Suffixes stripped from class names.
    pub suffixes: Vec<String>,
    /// Whether directory names act as additional prefixes.
    pub match_directory: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for FileNameMatchesElement {
    fn default() -> Self {
        Self::new()
    }
}

impl FileNameMatchesElement {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transforms: vec![Case::Kebab, Case::Camel],
            prefixes: Vec::new(),
            suffixes: Vec::new(),
            match_directory: false,
            severity: Severity::Warning,
        }
    }

    /// Creates the rule from its configuration table.
    ///
    /// # Errors
    ///
    /// Returns an error if `transform` names an unknown casing.
    pub fn from_config(config: &RuleConfig) -> Result<Self, ConfigError> {
        let mut rule = Self::new();
        if let Some(transforms) = config.get_str_or_array("transform") {
            rule.transforms = transforms
                .iter()
                .map(|t| t.parse::<Case>())
                .collect::<Result<_, _>>()
                .map_err(|message| ConfigError::InvalidOption {
                    rule: NAME.to_string(),
                    key: "transform".to_string(),
                    message,
                })?;
        }
        rule.prefixes = config.get_str_or_array("prefix").unwrap_or_default();
        rule.suffixes = config.get_str_or_array("suffix").unwrap_or_default();
        rule.match_directory = config.get_bool("match_directory", false);
        Ok(rule)
    }

    /// Sets the accepted casings.
    #[must_use]
    pub fn transforms(mut self, transforms: &[Case]) -> Self {
        self.transforms = transforms.to_vec();
        self
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

    /// Sets whether directory names act as prefixes.
    #[must_use]
    pub fn match_directory(mut self, match_directory: bool) -> Self {
        self.match_directory = match_directory;
        self
    }

    /// File names accepted for `class_name`, in preference order.
    fn allowed_file_names(&self, class_name: &str, ctx: &FileContext<'_>) -> Vec<String> {
        let mut prefixes = self.prefixes.clone();
        if self.match_directory {
            prefixes.extend(directory_prefixes(ctx));
        }

        let mut names = vec![class_name.to_string()];
        for name in strip_affixes(class_name, &prefixes, &self.suffixes) {
            push_unique(&mut names, name);
        }

        let mut allowed = Vec::new();
        for name in &names {
            for transform in &self.transforms {
                push_unique(&mut allowed, transform.apply(name));
            }
        }
        allowed
    }
}

fn push_unique(list: &mut Vec<String>, item: String) {
    if !list.contains(&item) {
        list.push(item);
    }
}

/// Case-insensitive prefix strip, returning the remainder of `name`.
fn strip_prefix_ci<'n>(name: &'n str, prefix: &str) -> Option<&'n str> {
    let target = prefix.to_lowercase();
    let mut folded = String::new();
    for (i, c) in name.char_indices() {
        if folded == target {
            return Some(&name[i..]);
        }
        folded.extend(c.to_lowercase());
        if !target.starts_with(&folded) {
            return None;
        }
    }
    (folded == target).then_some("")
}

/// Case-insensitive suffix strip, returning the remainder of `name`.
fn strip_suffix_ci<'n>(name: &'n str, suffix: &str) -> Option<&'n str> {
    let target = suffix.to_lowercase();
    let mut folded = String::new();
    for (i, c) in name.char_indices().rev() {
        if folded == target {
            return Some(&name[..i + c.len_utf8()]);
        }
        folded.insert_str(0, &c.to_lowercase().to_string());
        if !target.ends_with(&folded) {
            return None;
        }
    }
    (folded == target).then_some("")
}

/// Names derived from `name` by removing a prefix, a suffix, or both.
fn strip_affixes(name: &str, prefixes: &[String], suffixes: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    for prefix in prefixes {
        if let Some(rest) = strip_prefix_ci(name, prefix) {
            out.push(rest.to_string());
            out.extend(
                suffixes
                    .iter()
                    .filter_map(|s| strip_suffix_ci(rest, s))
                    .map(str::to_string),
            );
        }
    }
    for suffix in suffixes {
        if let Some(rest) = strip_suffix_ci(name, suffix) {
            out.push(rest.to_string());
            out.extend(
                prefixes
                    .iter()
                    .filter_map(|p| strip_prefix_ci(rest, p))
                    .map(str::to_string),
            );
        }
    }
    out
}

/// `foo/bar/x.js` yields the prefixes `foobar` and `bar`.
fn directory_prefixes(ctx: &FileContext<'_>) -> Vec<String> {
    let parts: Vec<String> = ctx
        .relative_path
        .parent()
        .map(|dir| {
            dir.components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part.to_string_lossy().to_lowercase()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();
    (0..parts.len()).map(|i| parts[i..].concat()).collect()
}

impl Rule for FileNameMatchesElement {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces that the filename of a file containing an element matches that of its class name"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = FileNameVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

struct FileNameVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a FileNameMatchesElement,
    violations: Vec<Violation>,
}

impl<'a> Visitor<'a> for FileNameVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, _scope: &ScopeTracker<'a>) {
        if !syntax::is_class(node) || !self.ctx.is_component(node) {
            return;
        }
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let Some(actual) = self.ctx.file_stem() else {
            return;
        };

        let allowed = self
            .rule
            .allowed_file_names(self.ctx.text(name_node), self.ctx);
        if allowed.is_empty() || allowed.iter().any(|a| a == actual) {
            return;
        }

        let expected = allowed.join("\" or \"");
        self.violations.push(
            Violation::new(
                CODE,
                NAME,
                self.rule.severity,
                self.ctx.location(name_node),
                format!("File name should be \"{expected}\" but was \"{actual}\""),
            )
            .with_message_id("fileMismatch")
            .with_data("expected", expected)
            .with_data("actual", actual),
        );
    }
}
