//! Rule catalogue and presets.
//!
//! Every rule is listed once in [`CATALOG`] with a builder that reads its
//! `[rules.<name>]` table. Presets are lists of rule names.

use std::str::FromStr;

use wc_lint_core::{Config, ConfigError, RuleBox, RuleConfig};

use crate::{
    attach_shadow_constructor, define_tag_after_class_definition, expose_class_on_global,
    file_name_matches_element, guard_define_call, guard_super_call, max_elements_per_file,
    no_child_traversal_in_attributechangedcallback, no_child_traversal_in_connectedcallback,
    no_closed_shadow_root, no_constructor, no_constructor_attributes, no_constructor_params,
    no_customized_built_in_elements, no_exports_with_element, no_invalid_element_name,
    no_invalid_extends, no_method_prefixed_with_on, no_self_class, no_typos,
    require_listener_teardown, tag_name_matches_class,
};
use crate::{
    AttachShadowConstructor, DefineTagAfterClassDefinition, ExposeClassOnGlobal,
    FileNameMatchesElement, GuardDefineCall, GuardSuperCall, MaxElementsPerFile,
    NoChildTraversalInAttributeChangedCallback, NoChildTraversalInConnectedCallback,
    NoClosedShadowRoot, NoConstructor, NoConstructorAttributes, NoConstructorParams,
    NoCustomizedBuiltInElements, NoExportsWithElement, NoInvalidElementName, NoInvalidExtends,
    NoMethodPrefixedWithOn, NoSelfClass, NoTypos, RequireListenerTeardown, TagNameMatchesClass,
};

/// Builds a rule from its (possibly empty) configuration table.
pub type RuleBuilder = fn(&RuleConfig) -> Result<RuleBox, ConfigError>;

/// A catalogue entry.
#[derive(Clone, Copy)]
pub struct RuleEntry {
    /// Rule code (`WC001`).
    pub code: &'static str,
    /// Rule name (`attach-shadow-constructor`).
    pub name: &'static str,
    /// Builder reading the rule's options.
    pub build: RuleBuilder,
}

impl std::fmt::Debug for RuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEntry")
            .field("code", &self.code)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl RuleEntry {
    /// Whether `key` is this rule's name or code (codes are case-insensitive).
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.name == key || self.code.eq_ignore_ascii_case(key)
    }

    /// Builds the rule with default options.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in rules; the signature follows [`RuleBuilder`].
    pub fn build_default(&self) -> Result<RuleBox, ConfigError> {
        (self.build)(&RuleConfig::default())
    }
}

fn boxed<R: wc_lint_core::Rule + 'static>(rule: R) -> Result<RuleBox, ConfigError> {
    Ok(Box::new(rule))
}

/// Every built-in rule, in code order.
pub const CATALOG: &[RuleEntry] = &[
    RuleEntry {
        code: attach_shadow_constructor::CODE,
        name: attach_shadow_constructor::NAME,
        build: |_| boxed(AttachShadowConstructor::new()),
    },
    RuleEntry {
        code: define_tag_after_class_definition::CODE,
        name: define_tag_after_class_definition::NAME,
        build: |_| boxed(DefineTagAfterClassDefinition::new()),
    },
    RuleEntry {
        code: expose_class_on_global::CODE,
        name: expose_class_on_global::NAME,
        build: |_| boxed(ExposeClassOnGlobal::new()),
    },
    RuleEntry {
        code: file_name_matches_element::CODE,
        name: file_name_matches_element::NAME,
        build: |c| boxed(FileNameMatchesElement::from_config(c)?),
    },
    RuleEntry {
        code: guard_define_call::CODE,
        name: guard_define_call::NAME,
        build: |_| boxed(GuardDefineCall::new()),
    },
    RuleEntry {
        code: guard_super_call::CODE,
        name: guard_super_call::NAME,
        build: |_| boxed(GuardSuperCall::new()),
    },
    RuleEntry {
        code: max_elements_per_file::CODE,
        name: max_elements_per_file::NAME,
        build: |c| boxed(MaxElementsPerFile::from_config(c)?),
    },
    RuleEntry {
        code: no_child_traversal_in_attributechangedcallback::CODE,
        name: no_child_traversal_in_attributechangedcallback::NAME,
        build: |_| boxed(NoChildTraversalInAttributeChangedCallback::new()),
    },
    RuleEntry {
        code: no_child_traversal_in_connectedcallback::CODE,
        name: no_child_traversal_in_connectedcallback::NAME,
        build: |_| boxed(NoChildTraversalInConnectedCallback::new()),
    },
    RuleEntry {
        code: no_closed_shadow_root::CODE,
        name: no_closed_shadow_root::NAME,
        build: |_| boxed(NoClosedShadowRoot::new()),
    },
    RuleEntry {
        code: no_constructor::CODE,
        name: no_constructor::NAME,
        build: |_| boxed(NoConstructor::new()),
    },
    RuleEntry {
        code: no_constructor_attributes::CODE,
        name: no_constructor_attributes::NAME,
        build: |_| boxed(NoConstructorAttributes::new()),
    },
    RuleEntry {
        code: no_constructor_params::CODE,
        name: no_constructor_params::NAME,
        build: |_| boxed(NoConstructorParams::new()),
    },
    RuleEntry {
        code: no_customized_built_in_elements::CODE,
        name: no_customized_built_in_elements::NAME,
        build: |_| boxed(NoCustomizedBuiltInElements::new()),
    },
    RuleEntry {
        code: no_exports_with_element::CODE,
        name: no_exports_with_element::NAME,
        build: |_| boxed(NoExportsWithElement::new()),
    },
    RuleEntry {
        code: no_invalid_element_name::CODE,
        name: no_invalid_element_name::NAME,
        build: |c| boxed(NoInvalidElementName::from_config(c)),
    },
    RuleEntry {
        code: no_invalid_extends::CODE,
        name: no_invalid_extends::NAME,
        build: |c| boxed(NoInvalidExtends::from_config(c)),
    },
    RuleEntry {
        code: no_method_prefixed_with_on::CODE,
        name: no_method_prefixed_with_on::NAME,
        build: |_| boxed(NoMethodPrefixedWithOn::new()),
    },
    RuleEntry {
        code: no_self_class::CODE,
        name: no_self_class::NAME,
        build: |_| boxed(NoSelfClass::new()),
    },
    RuleEntry {
        code: no_typos::CODE,
        name: no_typos::NAME,
        build: |_| boxed(NoTypos::new()),
    },
    RuleEntry {
        code: require_listener_teardown::CODE,
        name: require_listener_teardown::NAME,
        build: |c| boxed(RequireListenerTeardown::from_config(c)),
    },
    RuleEntry {
        code: tag_name_matches_class::CODE,
        name: tag_name_matches_class::NAME,
        build: |c| boxed(TagNameMatchesClass::from_config(c)),
    },
];

/// Looks a rule up by name or code.
#[must_use]
pub fn find_rule(key: &str) -> Option<&'static RuleEntry> {
    CATALOG.iter().find(|entry| entry.matches(key))
}

const RECOMMENDED: &[&str] = &[
    no_constructor_attributes::NAME,
    no_invalid_element_name::NAME,
    no_self_class::NAME,
];

const BEST_PRACTICE: &[&str] = &[
    no_constructor_attributes::NAME,
    no_invalid_element_name::NAME,
    no_self_class::NAME,
    attach_shadow_constructor::NAME,
    guard_super_call::NAME,
    no_closed_shadow_root::NAME,
    no_typos::NAME,
];

/// Named rule selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Rules that catch outright mistakes.
    #[default]
    Recommended,
    /// Recommended plus rules encoding common best practices.
    BestPractice,
    /// Every rule.
    All,
}

impl Preset {
    /// Preset name as written in configuration.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::BestPractice => "best-practice",
            Self::All => "all",
        }
    }

    /// Names of the rules in this preset.
    #[must_use]
    pub fn rule_names(self) -> Vec<&'static str> {
        match self {
            Self::Recommended => RECOMMENDED.to_vec(),
            Self::BestPractice => BEST_PRACTICE.to_vec(),
            Self::All => CATALOG.iter().map(|entry| entry.name).collect(),
        }
    }

    /// The rules of this preset with default options.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        self.rule_names()
            .into_iter()
            .filter_map(find_rule)
            .filter_map(|entry| entry.build_default().ok())
            .collect()
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommended" => Ok(Self::Recommended),
            "best-practice" => Ok(Self::BestPractice),
            "all" => Ok(Self::All),
            other => Err(ConfigError::UnknownPreset {
                name: other.to_string(),
            }),
        }
    }
}

/// Returns the recommended set of rules.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    Preset::Recommended.rules()
}

/// Returns the best-practice set of rules.
#[must_use]
pub fn best_practice_rules() -> Vec<RuleBox> {
    Preset::BestPractice.rules()
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    Preset::All.rules()
}

/// Builds the rules a configuration selects.
///
/// Starts from the configured preset (recommended when unset), adds rules
/// whose table says `enabled = true`, drops those saying `enabled = false`,
/// and builds each with its options table. Unknown rule names are logged
/// and ignored.
///
/// # Errors
///
/// Returns an error for an unknown preset or an invalid rule option.
pub fn configured_rules(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    let preset = config
        .preset
        .as_deref()
        .map(str::parse::<Preset>)
        .transpose()?
        .unwrap_or_default();

    let mut names = preset.rule_names();
    let mut configured: Vec<_> = config.rules.iter().collect();
    configured.sort_by(|a, b| a.0.cmp(b.0));
    for (name, rule_config) in configured {
        let Some(entry) = find_rule(name) else {
            tracing::warn!(rule = %name, "Unknown rule in configuration");
            continue;
        };
        if rule_config.enabled == Some(true) && !names.contains(&entry.name) {
            names.push(entry.name);
        }
    }

    build_named(&names, config)
}

/// Builds the rules named (or coded) in `keys`, reading options from `config`.
///
/// Unknown keys are logged and skipped; a rule listed twice is built once.
///
/// # Errors
///
/// Returns an error if a rule option is invalid.
pub fn select_rules(keys: &[&str], config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    let mut names: Vec<&'static str> = Vec::new();
    for key in keys {
        match find_rule(key) {
            Some(entry) if !names.contains(&entry.name) => names.push(entry.name),
            Some(_) => {}
            None => tracing::warn!(rule = %key, "Unknown rule"),
        }
    }
    build_named(&names, config)
}

fn build_named(names: &[&'static str], config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    let default_config = RuleConfig::default();
    let mut rules = Vec::with_capacity(names.len());
    for entry in CATALOG.iter().filter(|entry| names.contains(&entry.name)) {
        if !config.is_rule_enabled(entry.name) {
            tracing::debug!(rule = entry.name, "Rule disabled by configuration");
            continue;
        }
        let rule_config = config.rule(entry.name).unwrap_or(&default_config);
        rules.push((entry.build)(rule_config)?);
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_catalog_is_complete_and_ordered() {
        assert_eq!(CATALOG.len(), 22);
        for (i, entry) in CATALOG.iter().enumerate() {
            assert_eq!(entry.code, format!("WC{:03}", i + 1));
            let rule = entry.build_default().expect("default build");
            assert_eq!(rule.name(), entry.name);
            assert_eq!(rule.code(), entry.code);
        }
    }

    #[test]
    fn test_find_rule_by_name_or_code() {
        assert_eq!(find_rule("no-typos").map(|e| e.code), Some("WC020"));
        assert_eq!(find_rule("WC020").map(|e| e.name), Some("no-typos"));
        assert_eq!(find_rule("wc020").map(|e| e.name), Some("no-typos"));
        assert!(find_rule("no-such-rule").is_none());
    }

    #[test]
    fn test_presets() {
        assert_eq!(
            names(&Preset::Recommended.rules()),
            vec!["no-constructor-attributes", "no-invalid-element-name", "no-self-class"]
        );
        assert_eq!(
            names(&Preset::BestPractice.rules()),
            vec![
                "attach-shadow-constructor",
                "guard-super-call",
                "no-closed-shadow-root",
                "no-constructor-attributes",
                "no-invalid-element-name",
                "no-self-class",
                "no-typos",
            ]
        );
        assert_eq!(Preset::All.rules().len(), 22);
        assert_eq!("best-practice".parse::<Preset>().ok(), Some(Preset::BestPractice));
        assert!(matches!(
            "strict".parse::<Preset>(),
            Err(ConfigError::UnknownPreset { .. })
        ));
    }

    #[test]
    fn test_configured_rules() {
        let config = Config::parse(
            r#"
preset = "recommended"

[rules.no-self-class]
enabled = false

[rules.max-elements-per-file]
enabled = true
max = 2

[rules.not-a-rule]
enabled = true
"#,
        )
        .expect("config");
        let rules = configured_rules(&config).expect("rules");
        assert_eq!(
            names(&rules),
            vec!["max-elements-per-file", "no-constructor-attributes", "no-invalid-element-name"]
        );
    }

    #[test]
    fn test_configured_rules_reports_invalid_options() {
        let config = Config::parse("preset = \"all\"\n[rules.max-elements-per-file]\nmax = 0\n")
            .expect("config");
        assert!(matches!(
            configured_rules(&config),
            Err(ConfigError::InvalidOption { .. })
        ));

        let config = Config::parse("preset = \"strict\"\n").expect("config");
        assert!(configured_rules(&config).is_err());
    }

    #[test]
    fn test_select_rules() {
        let rules = select_rules(&["WC022", "no-typos", "WC020", "bogus"], &Config::default())
            .expect("rules");
        assert_eq!(names(&rules), vec!["no-typos", "tag-name-matches-class"]);
    }
}
