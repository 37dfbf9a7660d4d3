//! Check command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use wc_lint_core::{Analyzer, Config};
use wc_lint_rules::{configured_rules, select_rules};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
///
/// Returns `false` when error-severity violations were found.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<&str>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<bool> {
    let config = load_config(source)?;

    let rules = match rules_filter {
        Some(filter) => {
            let keys: Vec<&str> = filter
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .collect();
            select_rules(&keys, &config)
        }
        None => configured_rules(&config),
    }
    .context("Invalid rule configuration")?;

    let analyzer = Analyzer::builder()
        .root(path)
        .excludes(exclude)
        .rules(rules)
        .config(config)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let result = analyzer.analyze().context("Analysis failed")?;

    let base = if analyzer.root().is_file() {
        analyzer.root().parent().unwrap_or(analyzer.root())
    } else {
        analyzer.root()
    };
    super::output::print(&result, format, base)?;

    Ok(!result.has_errors())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        tracing::debug!("No configuration file found, using defaults");
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}
