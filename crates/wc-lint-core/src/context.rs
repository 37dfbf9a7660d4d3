//! Per-file analysis context.

use crate::classify::ComponentClassifier;
use crate::config::Config;
use crate::scope::ScopeIndex;
use crate::source::SourceFile;
use crate::syntax;
use crate::types::Location;
use std::path::{Path, PathBuf};
use tree_sitter::Node;

/// Context provided to per-file rules.
///
/// Holds the parsed file together with everything derived from it that
/// several rules share: the scope index for reference resolution and the
/// memoizing component classifier. One context lives exactly as long as
/// the analysis of one file.
#[derive(Debug)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Parsed syntax tree.
    pub source: &'a SourceFile,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
    /// Resolved configuration.
    pub config: &'a Config,
    scope: ScopeIndex<'a>,
    classifier: ComponentClassifier,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, source: &'a SourceFile, root: &Path, config: &'a Config) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        let content = source.content();
        let classifier =
            ComponentClassifier::new(config.settings.element_base_classes.iter().cloned());

        Self {
            path,
            content,
            source,
            relative_path,
            config,
            scope: ScopeIndex::build(source.root(), content),
            classifier,
        }
    }

    /// Root `program` node.
    #[must_use]
    pub fn root(&self) -> Node<'a> {
        self.source.root()
    }

    /// Text covered by `node`.
    #[must_use]
    pub fn text(&self, node: Node<'_>) -> &'a str {
        syntax::text(node, self.content)
    }

    /// Component classifier shared by all rules on this file.
    #[must_use]
    pub fn classifier(&self) -> &ComponentClassifier {
        &self.classifier
    }

    /// Returns `true` if `node` is a class classified as a component.
    #[must_use]
    pub fn is_component(&self, node: Node<'_>) -> bool {
        self.classifier.is_component(node, self.content)
    }

    /// Resolves an identifier to its declaration; see [`ScopeIndex::resolve`].
    #[must_use]
    pub fn resolve(&self, node: Node<'a>) -> Node<'a> {
        self.scope.resolve(node, self.content)
    }

    /// Scope index of the file.
    #[must_use]
    pub fn scope(&self) -> &ScopeIndex<'a> {
        &self.scope
    }

    /// Location of `node` for reporting.
    #[must_use]
    pub fn location(&self, node: Node<'_>) -> Location {
        Location::from_node(self.relative_path.clone(), node, self.content)
    }

    /// File name without extension.
    #[must_use]
    pub fn file_stem(&self) -> Option<&str> {
        self.path.file_stem().and_then(|s| s.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::source::Dialect;

    #[test]
    fn relative_path_is_stripped() {
        let file = SourceFile::parse("", Dialect::Script).expect("parse");
        let config = Config::default();
        let ctx = FileContext::new(
            Path::new("/work/src/my-el.js"),
            &file,
            Path::new("/work"),
            &config,
        );
        assert_eq!(ctx.relative_path, PathBuf::from("src/my-el.js"));
        assert_eq!(ctx.file_stem(), Some("my-el"));
    }

    #[test]
    fn configured_base_classes_reach_classifier() {
        let file = SourceFile::parse("class A extends LitElement {}", Dialect::Script)
            .expect("parse");
        let config = Config {
            settings: Settings {
                element_base_classes: vec!["LitElement".to_string()],
            },
            ..Config::default()
        };
        let ctx = FileContext::new(Path::new("a.js"), &file, Path::new(""), &config);
        let class = ctx.root().named_child(0).expect("class");
        assert!(ctx.is_component(class));
    }

    #[test]
    fn location_uses_relative_path() {
        let file = SourceFile::parse("\n  foo();", Dialect::Script).expect("parse");
        let config = Config::default();
        let ctx = FileContext::new(Path::new("/p/x.js"), &file, Path::new("/p"), &config);
        let stmt = ctx.root().named_child(0).expect("stmt");
        let loc = ctx.location(stmt);
        assert_eq!((loc.line, loc.column), (2, 3));
        assert_eq!(loc.file, PathBuf::from("x.js"));
        assert_eq!(loc.offset, 3);
    }

    #[test]
    fn location_column_counts_utf16_units() {
        let file = SourceFile::parse("const s = 'héllo😀'; foo();", Dialect::Script).expect("parse");
        let config = Config::default();
        let ctx = FileContext::new(Path::new("a.js"), &file, Path::new(""), &config);
        let call = ctx.root().named_child(1).expect("second statement");
        let loc = ctx.location(call);
        assert_eq!(loc.column, 22);
        assert_eq!(loc.offset, 24);
    }
}
