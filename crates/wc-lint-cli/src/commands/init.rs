//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# wc-lint configuration

# Rule preset: recommended | best-practice | all
preset = "recommended"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
]

# Respect .gitignore files
respect_gitignore = true

[settings]
# Base classes whose subclasses count as custom elements, besides HTMLElement
# element_base_classes = ["LitElement"]

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

# [rules.max-elements-per-file]
# enabled = true
# severity = "warning"
# max = 1

# [rules.file-name-matches-element]
# enabled = true
# transform = ["kebab", "camel"]
# suffix = ["Element"]

# [rules.no-invalid-element-name]
# loose = false

# [rules.require-listener-teardown]
# hosts = ["this", "window", "document"]
"#;

/// File written by `wc-lint init`.
pub const CONFIG_FILE: &str = "wc-lint.toml";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: wc-lint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wc_lint_core::Config;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert!(config.rules.is_empty());
        assert!(wc_lint_rules::configured_rules(&config).is_ok());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "preset = \"all\"\n").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "preset = \"all\"\n");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
