//! Parsed source files.
//!
//! A [`SourceFile`] owns the tree-sitter [`Tree`] together with the text it
//! was parsed from. Rules only ever read nodes out of it.

use std::path::Path;
use tree_sitter::{Language, Node, Parser, Tree};

/// Grammar dialect used to parse a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Plain scripts and modules (`.js`, `.mjs`, `.cjs`, `.ts`, `.mts`, `.cts`).
    Script,
    /// Sources that may contain JSX (`.jsx`, `.tsx`).
    Jsx,
}

impl Dialect {
    /// File extensions the analyzer picks up, without the leading dot.
    pub const EXTENSIONS: &'static [&'static str] =
        &["js", "mjs", "cjs", "jsx", "ts", "mts", "cts", "tsx"];

    /// Picks the dialect from a file extension.
    ///
    /// Returns `None` for files the linter does not understand.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext {
            "js" | "mjs" | "cjs" | "ts" | "mts" | "cts" => Some(Self::Script),
            "jsx" | "tsx" => Some(Self::Jsx),
            _ => None,
        }
    }

    fn language(self) -> Language {
        match self {
            Self::Script => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Jsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Errors produced while turning text into a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The grammar could not be loaded into the parser.
    #[error("language error: {0}")]
    Language(String),

    /// The parser gave up without producing a tree.
    #[error("parse failed")]
    ParseFailed,
}

/// A parsed source file.
pub struct SourceFile {
    content: String,
    tree: Tree,
    dialect: Dialect,
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("dialect", &self.dialect)
            .field("len", &self.content.len())
            .finish_non_exhaustive()
    }
}

impl SourceFile {
    /// Parses `content` with the grammar for `dialect`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or the parser
    /// produces no tree. Syntax errors inside the text are not an error:
    /// tree-sitter recovers and the rules see whatever it could parse.
    pub fn parse(content: impl Into<String>, dialect: Dialect) -> Result<Self, ParseError> {
        let content = content.into();
        let mut parser = Parser::new();
        parser
            .set_language(&dialect.language())
            .map_err(|e| ParseError::Language(e.to_string()))?;
        let tree = parser
            .parse(content.as_bytes(), None)
            .ok_or(ParseError::ParseFailed)?;

        Ok(Self {
            content,
            tree,
            dialect,
        })
    }

    /// Source text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Grammar dialect the file was parsed with.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Root `program` node.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Returns `true` if the parser had to recover from syntax errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Text covered by `node`.
    #[must_use]
    pub fn text(&self, node: Node<'_>) -> &str {
        self.content
            .get(node.start_byte()..node.end_byte())
            .unwrap_or("")
    }
}
