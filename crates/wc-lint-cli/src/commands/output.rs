//! Shared output formatting for lint results.

use anyhow::Result;
use miette::{NamedSource, Report};
use std::collections::HashMap;
use std::path::Path;
use wc_lint_core::{LintResult, Severity, ViolationDiagnostic};

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `base` is the directory violation paths are relative to.
pub fn print(result: &LintResult, format: OutputFormat, base: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result, base),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        println!(
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        println!("  {}: {}", severity_indicator, violation.message);
        if let Some(suggestion) = &violation.suggestion {
            println!("  = help: {}", suggestion.message);
        }
        println!();
    }
    print_summary(result);
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{}", violation.format());
    }
}

fn print_pretty(result: &LintResult, base: &Path) {
    let mut sources: HashMap<&Path, Option<String>> = HashMap::new();

    for violation in &result.violations {
        let file = violation.location.file.as_path();
        let content = sources
            .entry(file)
            .or_insert_with(|| match std::fs::read_to_string(base.join(file)) {
                Ok(content) => Some(content),
                Err(e) => {
                    tracing::warn!("Cannot read {} for display: {}", file.display(), e);
                    None
                }
            })
            .clone();

        let report = Report::new(ViolationDiagnostic::from(violation));
        let report = match content {
            Some(content) => report.with_source_code(NamedSource::new(
                file.display().to_string(),
                content,
            )),
            None => report,
        };
        println!("{report:?}");
    }
    print_summary(result);
}
