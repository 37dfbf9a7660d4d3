//! # wc-lint-rules
//!
//! Built-in lint rules for custom element (web component) sources.
//!
//! Every rule is a [`Rule`] implementation driven by the single traversal
//! in `wc_lint_core::walk`, and most only fire inside classes the
//! component classifier recognizes.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | WC001 | `attach-shadow-constructor` | `attachShadow` only in the constructor |
//! | WC002 | `define-tag-after-class-definition` | Register classes after defining them |
//! | WC003 | `expose-class-on-global` | Expose components on `window` |
//! | WC004 | `file-name-matches-element` | File name follows the class name |
//! | WC005 | `guard-define-call` | Guard `customElements.define` with `get` |
//! | WC006 | `guard-super-call` | Guard `super` lifecycle calls |
//! | WC007 | `max-elements-per-file` | Limit components per file |
//! | WC008 | `no-child-traversal-in-attributechangedcallback` | No child DOM access in `attributeChangedCallback` |
//! | WC009 | `no-child-traversal-in-connectedcallback` | No child DOM access in `connectedCallback` |
//! | WC010 | `no-closed-shadow-root` | No closed shadow roots |
//! | WC011 | `no-constructor` | No constructors |
//! | WC012 | `no-constructor-attributes` | No attribute access in constructors |
//! | WC013 | `no-constructor-params` | Parameterless constructors |
//! | WC014 | `no-customized-built-in-elements` | No extending built-in elements |
//! | WC015 | `no-exports-with-element` | No extra exports next to a component |
//! | WC016 | `no-invalid-element-name` | Valid custom element names |
//! | WC017 | `no-invalid-extends` | Superclass agrees with `{extends}` |
//! | WC018 | `no-method-prefixed-with-on` | No `on`-prefixed methods |
//! | WC019 | `no-self-class` | No class mutations on `this` |
//! | WC020 | `no-typos` | No misspelled lifecycle members |
//! | WC021 | `require-listener-teardown` | Remove listeners on disconnect |
//! | WC022 | `tag-name-matches-class` | Tag name follows the class name |
//!
//! ## Usage
//!
//! ```ignore
//! use wc_lint_core::Analyzer;
//! use wc_lint_rules::{GuardSuperCall, NoConstructorAttributes};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .rule(NoConstructorAttributes::new())
//!     .rule(GuardSuperCall::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod attach_shadow_constructor;
mod child_traversal;
mod define_tag_after_class_definition;
mod expose_class_on_global;
mod file_name_matches_element;
mod guard_define_call;
mod guard_super_call;
mod max_elements_per_file;
mod no_child_traversal_in_attributechangedcallback;
mod no_child_traversal_in_connectedcallback;
mod no_closed_shadow_root;
mod no_constructor;
mod no_constructor_attributes;
mod no_constructor_params;
mod no_customized_built_in_elements;
mod no_exports_with_element;
mod no_invalid_element_name;
mod no_invalid_extends;
mod no_method_prefixed_with_on;
mod no_self_class;
mod no_typos;
mod presets;
mod require_listener_teardown;
mod tag_name_matches_class;
#[cfg(test)]
mod testing;

pub use attach_shadow_constructor::AttachShadowConstructor;
pub use define_tag_after_class_definition::DefineTagAfterClassDefinition;
pub use expose_class_on_global::ExposeClassOnGlobal;
pub use file_name_matches_element::FileNameMatchesElement;
pub use guard_define_call::GuardDefineCall;
pub use guard_super_call::GuardSuperCall;
pub use max_elements_per_file::MaxElementsPerFile;
pub use no_child_traversal_in_attributechangedcallback::NoChildTraversalInAttributeChangedCallback;
pub use no_child_traversal_in_connectedcallback::NoChildTraversalInConnectedCallback;
pub use no_closed_shadow_root::NoClosedShadowRoot;
pub use no_constructor::NoConstructor;
pub use no_constructor_attributes::NoConstructorAttributes;
pub use no_constructor_params::NoConstructorParams;
pub use no_customized_built_in_elements::NoCustomizedBuiltInElements;
pub use no_exports_with_element::NoExportsWithElement;
pub use no_invalid_element_name::NoInvalidElementName;
pub use no_invalid_extends::NoInvalidExtends;
pub use no_method_prefixed_with_on::NoMethodPrefixedWithOn;
pub use no_self_class::NoSelfClass;
pub use no_typos::NoTypos;
pub use presets::{
    all_rules, best_practice_rules, configured_rules, find_rule, recommended_rules, select_rules,
    Preset, RuleBuilder, RuleEntry, CATALOG,
};
pub use require_listener_teardown::RequireListenerTeardown;
pub use tag_name_matches_class::TagNameMatchesClass;

/// Re-export core types for convenience.
pub use wc_lint_core::{Rule, Severity, Violation};
