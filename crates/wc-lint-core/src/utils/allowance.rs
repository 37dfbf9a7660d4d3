//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! // wc-lint: allow(no-constructor-attributes) reason="upgraded from markup"
//! /* wc-lint: allow(guard-super-call) */
//! ```
//!
//! A directive applies to the line it is on and to the line below it.

use std::collections::HashSet;

/// Prefix that introduces a directive inside a comment.
pub const DIRECTIVE_PREFIX: &str = "wc-lint:";

/// Result of checking for allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
        /// Line the directive is on (1-indexed).
        line: usize,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason, .. } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
pub struct AllowDirective {
    /// Rule names or codes that are allowed.
    pub rules: HashSet<String>,
    /// Optional reason for the allowance.
    pub reason: Option<String>,
}

impl AllowDirective {
    fn covers(&self, rule_name: &str, rule_code: &str) -> bool {
        self.rules.contains(rule_name) || self.rules.contains(rule_code) || self.rules.contains("all")
    }
}

/// Checks source code for an allowance directive covering `line`.
///
/// The rule may be named by its name (`no-self-class`) or its code
/// (`WC019`); `all` covers every rule.
#[must_use]
pub fn check_allow_with_reason(
    content: &str,
    line: usize,
    rule_name: &str,
    rule_code: &str,
) -> AllowCheck {
    let lines: Vec<&str> = content.lines().collect();

    for check_line in [line.saturating_sub(1), line] {
        if check_line == 0 || check_line > lines.len() {
            continue;
        }

        let line_content = lines[check_line - 1];
        if let Some(directive) = parse_allow_directive(line_content) {
            if directive.covers(rule_name, rule_code) {
                return AllowCheck::Allowed {
                    reason: directive.reason,
                    line: check_line,
                };
            }
        }
    }

    AllowCheck::Denied
}

/// Parses an allowance directive from a source line.
///
/// The directive may trail code on the same line.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let comment_content = if let Some(pos) = line.find("//") {
        line[pos + 2..].trim()
    } else if let Some(pos) = line.find("/*") {
        let rest = &line[pos + 2..];
        rest.split("*/").next().unwrap_or(rest).trim()
    } else {
        return None;
    };

    let directive = comment_content.strip_prefix(DIRECTIVE_PREFIX)?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules_str = &allow_content[..paren_end];

    let rules: HashSet<String> = rules_str
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest.strip_prefix("reason=").and_then(|reason_part| {
        let quoted = reason_part.trim().strip_prefix('"')?;
        let end = quoted.find('"')?;
        Some(quoted[..end].to_string())
    });

    Some(AllowDirective { rules, reason })
}
