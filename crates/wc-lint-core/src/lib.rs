//! # wc-lint-core
//!
//! Core framework for linting custom elements based on `tree-sitter`
//! syntax trees of JavaScript and TypeScript sources.
//!
//! This crate provides the shared analysis kernel rules are written
//! against. It includes:
//!
//! - [`SourceFile`] for parsing a file in either dialect
//! - [`ComponentClassifier`] for deciding which classes are custom elements
//! - [`ScopeIndex`] for resolving identifiers to their declarations
//! - [`walk`] and [`ScopeTracker`] for traversal with class and method frames
//! - [`guard`] matchers for guarded super calls and registrations
//! - [`text`] helpers for typo detection and case conversion
//! - [`elements`] tables of built-in elements and custom element name rules
//! - [`Rule`] trait and [`Analyzer`] for orchestrating lint execution
//!
//! ## Example
//!
//! ```ignore
//! use wc_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! for v in &result.violations {
//!     println!("{v}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod rule;
mod types;

pub mod classify;
pub mod elements;
pub mod guard;
pub mod scope;
pub mod source;
pub mod syntax;
pub mod text;
pub mod traverse;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use classify::ComponentClassifier;
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig, Settings};
pub use context::FileContext;
pub use rule::{Rule, RuleBox};
pub use scope::ScopeIndex;
pub use source::{Dialect, ParseError, SourceFile};
pub use traverse::{
    walk, ClassFrame, LifecycleHook, MethodFrame, MethodRole, ScopeTracker, Visitor,
};
pub use types::{
    Label, LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic,
};
pub use utils::allowance::AllowCheck;
