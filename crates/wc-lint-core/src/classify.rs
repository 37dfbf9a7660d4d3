//! Component classification.
//!
//! A class is a component when any of these holds:
//!
//! - its superclass is a bare identifier naming a recognized base class
//!   (`HTMLElement` plus any configured extras),
//! - it is immediately preceded by a `/** ... */` comment containing
//!   `@customElement`,
//! - it carries a `@customElement` decorator (called or bare).

use crate::syntax;
use std::cell::RefCell;
use std::collections::HashMap;
use tree_sitter::Node;

/// Built-in base class every custom element ultimately extends.
pub const BUILTIN_BASE: &str = "HTMLElement";

/// Doc comment tag marking a class as a component.
pub const DOC_TAG: &str = "@customElement";

/// Decorator name marking a class as a component.
pub const DECORATOR: &str = "customElement";

/// Memoizing component classifier for one file.
///
/// Verdicts are cached by node identity. The set of base names is fixed at
/// construction, so a cached verdict never goes stale within the lifetime
/// of the classifier.
#[derive(Debug)]
pub struct ComponentClassifier {
    base_classes: Vec<String>,
    memo: RefCell<HashMap<usize, bool>>,
}

impl Default for ComponentClassifier {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>())
    }
}

impl ComponentClassifier {
    /// Creates a classifier recognizing `HTMLElement` plus `extra_bases`.
    pub fn new<I, S>(extra_bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut base_classes = vec![BUILTIN_BASE.to_string()];
        for base in extra_bases {
            let base = base.into();
            if !base_classes.contains(&base) {
                base_classes.push(base);
            }
        }
        Self {
            base_classes,
            memo: RefCell::new(HashMap::new()),
        }
    }

    /// Recognized base class names.
    #[must_use]
    pub fn base_classes(&self) -> &[String] {
        &self.base_classes
    }

    /// Returns `true` if `node` is a class recognized as a component.
    ///
    /// Non-class nodes are never components.
    #[must_use]
    pub fn is_component(&self, node: Node<'_>, src: &str) -> bool {
        if !syntax::is_class(node) {
            return false;
        }
        if let Some(&verdict) = self.memo.borrow().get(&node.id()) {
            return verdict;
        }
        let verdict = self.classify(node, src);
        self.memo.borrow_mut().insert(node.id(), verdict);
        verdict
    }

    /// Returns `true` if the class extends `HTMLElement` directly.
    ///
    /// Configured extra bases do not count.
    #[must_use]
    pub fn is_direct_base_subclass(node: Node<'_>, src: &str) -> bool {
        syntax::is_class(node) && syntax::superclass_name(node, src) == Some(BUILTIN_BASE)
    }

    /// Number of verdicts cached so far.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.memo.borrow().len()
    }

    fn classify(&self, node: Node<'_>, src: &str) -> bool {
        let by_base = syntax::superclass_name(node, src)
            .is_some_and(|name| self.base_classes.iter().any(|b| b == name));
        if by_base {
            return true;
        }

        let by_doc = syntax::leading_doc_comment(node, src)
            .is_some_and(|c| syntax::text(c, src).contains(DOC_TAG));
        if by_doc {
            return true;
        }

        syntax::decorators(node)
            .into_iter()
            .any(|d| syntax::decorator_name(d, src) == Some(DECORATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Dialect, SourceFile};

    fn first_class(file: &SourceFile) -> Node<'_> {
        fn find(node: Node<'_>) -> Option<Node<'_>> {
            if syntax::is_class(node) {
                return Some(node);
            }
            let mut cursor = node.walk();
            let children: Vec<_> = node.named_children(&mut cursor).collect();
            children.into_iter().find_map(find)
        }
        find(file.root()).expect("class")
    }

    fn classify(src: &str, extra: &[&str]) -> bool {
        let file = SourceFile::parse(src, Dialect::Script).expect("parse");
        let classifier = ComponentClassifier::new(extra.iter().copied());
        classifier.is_component(first_class(&file), file.content())
    }

    #[test]
    fn extends_builtin_base() {
        assert!(classify("class A extends HTMLElement {}", &[]));
        assert!(classify("const A = class extends HTMLElement {};", &[]));
        assert!(!classify("class A extends Foo {}", &[]));
        assert!(!classify("class A {}", &[]));
    }

    #[test]
    fn extra_base_classes() {
        assert!(!classify("class A extends LitElement {}", &[]));
        assert!(classify("class A extends LitElement {}", &["LitElement"]));

        let classifier = ComponentClassifier::new(["LitElement", "HTMLElement", "LitElement"]);
        assert_eq!(classifier.base_classes(), ["HTMLElement", "LitElement"]);
    }

    #[test]
    fn mixin_superclass_falls_back_to_other_signals() {
        assert!(!classify("class A extends Mixin(HTMLElement) {}", &[]));
        assert!(!classify("class A extends window.HTMLElement {}", &[]));
        assert!(classify(
            "/** @customElement */\nclass A extends Mixin(HTMLElement) {}",
            &[]
        ));
    }

    #[test]
    fn doc_comment_tag() {
        assert!(classify("/**\n * @customElement\n */\nclass A extends Foo {}", &[]));
        assert!(!classify("/* @customElement */\nclass A extends Foo {}", &[]));
        assert!(!classify("/** @element */\nclass A extends Foo {}", &[]));
        assert!(classify(
            "/** @customElement */\nexport default class extends Foo {}",
            &[]
        ));
    }

    #[test]
    fn decorator_signal() {
        assert!(classify("@customElement('x-a')\nclass A extends Foo {}", &[]));
        assert!(classify("@customElement\nclass A {}", &[]));
        assert!(classify("@customElement('x-a')\nexport class A extends Foo {}", &[]));
        assert!(!classify("@component('x-a')\nclass A extends Foo {}", &[]));
    }

    #[test]
    fn verdict_is_memoized() {
        let file = SourceFile::parse("class A extends HTMLElement {}", Dialect::Script)
            .expect("parse");
        let classifier = ComponentClassifier::default();
        let class = first_class(&file);
        let first = classifier.is_component(class, file.content());
        let second = classifier.is_component(class, file.content());
        assert_eq!(first, second);
        assert_eq!(classifier.cached(), 1);
    }

    #[test]
    fn expanding_base_set_keeps_components() {
        let sources = [
            "class A extends HTMLElement {}",
            "class A extends LitElement {}",
            "/** @customElement */ class A extends B {}",
            "class A extends C {}",
        ];
        for src in sources {
            if classify(src, &[]) {
                assert!(classify(src, &["LitElement", "C"]), "{src}");
            }
        }
    }

    #[test]
    fn direct_base_subclass() {
        let file = SourceFile::parse(
            "/** @customElement */ class A extends Base {}",
            Dialect::Script,
        )
        .expect("parse");
        let class = first_class(&file);
        assert!(!ComponentClassifier::is_direct_base_subclass(class, file.content()));

        let file = SourceFile::parse("class A extends HTMLElement {}", Dialect::Script)
            .expect("parse");
        let class = first_class(&file);
        assert!(ComponentClassifier::is_direct_base_subclass(class, file.content()));
    }
}
