//! Configuration types for wc-lint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for wc-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use ("recommended", "best-practice" or "all").
    #[serde(default)]
    pub preset: Option<String>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Settings shared by all rules.
    #[serde(default)]
    pub settings: Settings,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<crate::Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Gets the options table of a rule, if configured.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }
}

/// Settings shared by every rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Extra base classes whose subclasses are components, on top of
    /// `HTMLElement` (e.g. `LitElement`).
    #[serde(default)]
    pub element_base_classes: Vec<String>,
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Glob patterns to include (if empty, every JavaScript and TypeScript
    /// file).
    #[serde(default)]
    pub include: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: vec![
                "**/node_modules/**".to_string(),
                "**/dist/**".to_string(),
            ],
            include: Vec::new(),
            respect_gitignore: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets an option value as a specific type.
    #[must_use]
    pub fn get_option<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.options
            .get(key)
            .and_then(|v| v.clone().try_into().ok())
    }

    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets an integer option with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .unwrap_or(default)
    }

    /// Gets a string option with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
    }

    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.options
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Gets an option given either as one string or as a string array.
    ///
    /// Returns `None` when the key is absent.
    #[must_use]
    pub fn get_str_or_array(&self, key: &str) -> Option<Vec<String>> {
        match self.options.get(key)? {
            toml::Value::String(s) => Some(vec![s.clone()]),
            toml::Value::Array(_) => Some(self.get_str_array(key)),
            _ => None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// The `preset` key names no known preset.
    #[error("Unknown preset `{name}` (expected recommended, best-practice or all)")]
    UnknownPreset {
        /// Preset name as written.
        name: String,
    },

    /// A rule option has a value the rule cannot use.
    #[error("Invalid option `{key}` for rule {rule}: {message}")]
    InvalidOption {
        /// Rule name.
        rule: String,
        /// Option key.
        key: String,
        /// What is wrong with the value.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.rules.is_empty());
        assert!(config.settings.element_base_classes.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "best-practice"

[analyzer]
root = "./src"
exclude = ["**/generated/**"]

[settings]
element_base_classes = ["LitElement", "FASTElement"]

[rules.max-elements-per-file]
enabled = true
severity = "warning"
max = 2

[rules.file-name-matches-element]
transform = "snake"
suffix = ["-element", "-el"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("best-practice"));
        assert_eq!(config.analyzer.root, PathBuf::from("./src"));
        assert_eq!(
            config.settings.element_base_classes,
            vec!["LitElement", "FASTElement"]
        );
        assert!(config.is_rule_enabled("max-elements-per-file"));
        assert_eq!(
            config.rule_severity("max-elements-per-file"),
            Some(crate::Severity::Warning)
        );

        let rule_config = config.rule("max-elements-per-file").expect("rule config");
        assert_eq!(rule_config.get_int("max", 1), 2);

        let naming = config.rule("file-name-matches-element").expect("rule config");
        assert_eq!(
            naming.get_str_or_array("transform"),
            Some(vec!["snake".to_string()])
        );
        assert_eq!(
            naming.get_str_or_array("suffix"),
            Some(vec!["-element".to_string(), "-el".to_string()])
        );
        assert_eq!(naming.get_str_or_array("prefix"), None);
    }

    #[test]
    fn test_disabled_rule() {
        let config = Config::parse("[rules.no-constructor]\nenabled = false\n").expect("parse");
        assert!(!config.is_rule_enabled("no-constructor"));
        assert!(config.is_rule_enabled("no-self-class"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::parse("preset = ").expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
