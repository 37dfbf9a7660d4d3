//! Same-file lexical scopes and reference resolution.
//!
//! The index is built in one pass over the tree. Bindings are registered
//! for their whole scope regardless of source position, so a reference
//! that appears before its declaration still resolves.

use crate::syntax;
use std::collections::HashMap;
use tree_sitter::Node;

#[derive(Debug, Default)]
struct Scope<'t> {
    bindings: HashMap<String, Vec<Node<'t>>>,
}

/// Lexical scopes of one file.
#[derive(Debug, Default)]
pub struct ScopeIndex<'t> {
    scopes: Vec<Scope<'t>>,
    by_node: HashMap<usize, usize>,
}

impl<'t> ScopeIndex<'t> {
    /// Builds the scope index for a program tree.
    #[must_use]
    pub fn build(root: Node<'t>, src: &str) -> Self {
        let mut index = Self::default();
        let program = index.open(root);
        index.visit(root, src, program, program);
        index
    }

    /// Number of scopes in the file.
    #[must_use]
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Resolves `node` to its declaration.
    ///
    /// Identifiers resolve to the nearest enclosing binding when exactly
    /// one declaration exists in that scope. The declaration node is the
    /// class or function for declarations, the initializer for variable
    /// declarators that have one, and the declarator, parameter or import
    /// specifier otherwise. Anything else, including unresolvable and
    /// ambiguous identifiers, comes back unchanged.
    #[must_use]
    pub fn resolve(&self, node: Node<'t>, src: &str) -> Node<'t> {
        if node.kind() != "identifier" {
            return node;
        }
        let name = syntax::text(node, src);
        let mut current = Some(node);
        while let Some(n) = current {
            if let Some(&scope) = self.by_node.get(&n.id()) {
                match self.scopes[scope].bindings.get(name).map(Vec::as_slice) {
                    Some([single]) => return *single,
                    Some([_, _, ..]) => return node,
                    _ => {}
                }
            }
            current = n.parent();
        }
        node
    }

    fn open(&mut self, node: Node<'t>) -> usize {
        let id = self.scopes.len();
        self.scopes.push(Scope::default());
        self.by_node.insert(node.id(), id);
        id
    }

    fn bind(&mut self, scope: usize, name: &str, target: Node<'t>) {
        self.scopes[scope]
            .bindings
            .entry(name.to_string())
            .or_default()
            .push(target);
    }

    fn bind_pattern(&mut self, scope: usize, pattern: Node<'t>, src: &str, target: Node<'t>) {
        match pattern.kind() {
            "identifier" | "shorthand_property_identifier_pattern" => {
                self.bind(scope, syntax::text(pattern, src), target);
            }
            "pair_pattern" => {
                if let Some(value) = pattern.child_by_field_name("value") {
                    self.bind_pattern(scope, value, src, target);
                }
            }
            "assignment_pattern" | "object_assignment_pattern" => {
                if let Some(left) = pattern.child_by_field_name("left") {
                    self.bind_pattern(scope, left, src, target);
                }
            }
            "required_parameter" | "optional_parameter" => {
                if let Some(inner) = pattern.child_by_field_name("pattern") {
                    self.bind_pattern(scope, inner, src, target);
                }
            }
            "object_pattern" | "array_pattern" | "rest_pattern" => {
                let mut cursor = pattern.walk();
                let children: Vec<_> = pattern.named_children(&mut cursor).collect();
                for child in children {
                    self.bind_pattern(scope, child, src, target);
                }
            }
            _ => {}
        }
    }

    fn bind_parameters(&mut self, scope: usize, function: Node<'t>, src: &str) {
        if let Some(single) = function.child_by_field_name("parameter") {
            self.bind_pattern(scope, single, src, single);
        }
        let Some(params) = function.child_by_field_name("parameters") else {
            return;
        };
        let mut cursor = params.walk();
        let children: Vec<_> = params.named_children(&mut cursor).collect();
        for param in children {
            self.bind_pattern(scope, param, src, param);
        }
    }

    fn bind_import(&mut self, import: Node<'t>, src: &str, program: usize) {
        let mut stack = vec![import];
        while let Some(node) = stack.pop() {
            match node.kind() {
                "import_specifier" => {
                    let local = node
                        .child_by_field_name("alias")
                        .or_else(|| node.child_by_field_name("name"));
                    if let Some(local) = local {
                        self.bind(program, syntax::text(local, src), node);
                    }
                }
                "identifier" => {
                    // Default import or `* as ns`.
                    let parent = node.parent().map(|p| p.kind());
                    if matches!(parent, Some("import_clause" | "namespace_import")) {
                        self.bind(program, syntax::text(node, src), node);
                    }
                }
                "string" => {}
                _ => {
                    let mut cursor = node.walk();
                    stack.extend(node.named_children(&mut cursor));
                }
            }
        }
    }

    fn visit(&mut self, node: Node<'t>, src: &str, scope: usize, function_scope: usize) {
        let (mut scope, mut function_scope) = (scope, function_scope);

        match node.kind() {
            "class_declaration" | "abstract_class_declaration" => {
                if let Some(name) = syntax::class_name(node, src) {
                    self.bind(scope, name, node);
                }
            }
            "function_declaration" | "generator_function_declaration" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.bind(scope, syntax::text(name, src), node);
                }
            }
            "variable_declarator" => {
                let hoisted = node
                    .parent()
                    .is_some_and(|p| p.kind() == "variable_declaration");
                let target_scope = if hoisted { function_scope } else { scope };
                if let Some(name) = node.child_by_field_name("name") {
                    let target = node
                        .child_by_field_name("value")
                        .map_or(node, syntax::unwrap_parens);
                    if name.kind() == "identifier" {
                        self.bind(target_scope, syntax::text(name, src), target);
                    } else {
                        self.bind_pattern(target_scope, name, src, node);
                    }
                }
            }
            "import_statement" => {
                self.bind_import(node, src, 0);
                return;
            }
            _ => {}
        }

        if syntax::is_function(node) {
            scope = self.open(node);
            function_scope = scope;
            if matches!(node.kind(), "function_expression" | "function" | "generator_function") {
                if let Some(name) = node.child_by_field_name("name") {
                    self.bind(scope, syntax::text(name, src), node);
                }
            }
            self.bind_parameters(scope, node, src);
        } else if matches!(
            node.kind(),
            "statement_block" | "for_statement" | "for_in_statement" | "catch_clause" | "switch_body"
        ) && !self.by_node.contains_key(&node.id())
        {
            scope = self.open(node);
            match node.kind() {
                "catch_clause" => {
                    if let Some(param) = node.child_by_field_name("parameter") {
                        self.bind_pattern(scope, param, src, param);
                    }
                }
                "for_in_statement" => {
                    if let (Some(kind), Some(left)) = (
                        node.child_by_field_name("kind"),
                        node.child_by_field_name("left"),
                    ) {
                        let target_scope = if syntax::text(kind, src) == "var" {
                            function_scope
                        } else {
                            scope
                        };
                        self.bind_pattern(target_scope, left, src, node);
                    }
                }
                _ => {}
            }
        }

        let mut cursor = node.walk();
        let children: Vec<_> = node.named_children(&mut cursor).collect();
        for child in children {
            self.visit(child, src, scope, function_scope);
        }
    }
}
