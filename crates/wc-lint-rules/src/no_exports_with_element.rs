//! Rule to forbid additional exports from a module defining a component.
//!
//! Classes extending `Event` are allowed alongside the element since they
//! usually describe events it dispatches.

use std::collections::HashSet;
use tree_sitter::Node;
use wc_lint_core::syntax;
use wc_lint_core::{walk, FileContext, Rule, ScopeTracker, Severity, Violation, Visitor};

/// Rule code for no-exports-with-element.
pub const CODE: &str = "WC015";

/// Rule name for no-exports-with-element.
pub const NAME: &str = "no-exports-with-element";

const MESSAGE: &str = "No additional exports should be defined when exporting a custom element";

const EVENT_BASE: &str = "Event";

/// Forbids exporting anything but components and events from a component module.
#[derive(Debug, Clone)]
pub struct NoExportsWithElement {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoExportsWithElement {
    fn default() -> Self {
        Self::new()
    }
}

impl NoExportsWithElement {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for NoExportsWithElement {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallows exports alongside custom element exports"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext<'_>) -> Vec<Violation> {
        let mut visitor = ExportsVisitor {
            ctx,
            rule: self,
            has_element: false,
            exported: Vec::new(),
            seen: HashSet::new(),
            violations: Vec::new(),
        };
        walk(ctx, &mut visitor);
        visitor.violations
    }
}

struct ExportsVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a NoExportsWithElement,
    has_element: bool,
    exported: Vec<Node<'a>>,
    seen: HashSet<usize>,
    violations: Vec<Violation>,
}

impl<'a> ExportsVisitor<'a> {
    fn export(&mut self, node: Node<'a>) {
        if self.seen.insert(node.id()) {
            self.exported.push(node);
        }
    }

    fn collect(&mut self, export: Node<'a>) {
        if let Some(declaration) = export.child_by_field_name("declaration") {
            match declaration.kind() {
                "lexical_declaration" | "variable_declaration" => {
                    let mut cursor = declaration.walk();
                    let values: Vec<_> = declaration
                        .named_children(&mut cursor)
                        .filter(|d| d.kind() == "variable_declarator")
                        .filter_map(|d| d.child_by_field_name("value"))
                        .collect();
                    for value in values {
                        self.export(value);
                    }
                }
                "function_declaration" | "generator_function_declaration" => {
                    self.export(declaration);
                }
                _ if syntax::is_class(declaration) => self.export(declaration),
                _ => {}
            }
            return;
        }

        if let Some(value) = export.child_by_field_name("value") {
            let value = syntax::unwrap_parens(value);
            let value = if value.kind() == "assignment_expression" {
                value.child_by_field_name("right").unwrap_or(value)
            } else {
                value
            };
            self.export(value);
            return;
        }

        let mut cursor = export.walk();
        let clauses: Vec<_> = export
            .named_children(&mut cursor)
            .filter(|c| c.kind() == "export_clause")
            .collect();
        for clause in clauses {
            let mut cursor = clause.walk();
            let locals: Vec<_> = clause
                .named_children(&mut cursor)
                .filter(|s| s.kind() == "export_specifier")
                .filter_map(|s| s.child_by_field_name("name"))
                .collect();
            for local in locals {
                self.export(local);
            }
        }
    }

    /// Whether an exported declaration may live next to a component.
    fn is_allowed(&self, node: Node<'_>) -> bool {
        syntax::is_class(node)
            && (self.ctx.is_component(node)
                || syntax::superclass_name(node, self.ctx.content) == Some(EVENT_BASE))
    }
}

/// Reported node for a resolved reference: the declarator owning an initializer.
fn report_target<'t>(reference: Node<'t>, resolved: Node<'t>) -> Node<'t> {
    if reference.id() == resolved.id() {
        return resolved;
    }
    match resolved.parent() {
        Some(parent)
            if parent.kind() == "variable_declarator"
                && parent.child_by_field_name("value").map(|v| v.id()) == Some(resolved.id()) =>
        {
            parent
        }
        _ => resolved,
    }
}

impl<'a> Visitor<'a> for ExportsVisitor<'a> {
    fn enter(&mut self, node: Node<'a>, _scope: &ScopeTracker<'a>) {
        if syntax::is_class(node) && self.ctx.is_component(node) {
            self.has_element = true;
        } else if node.kind() == "export_statement" {
            self.collect(node);
        }
    }

    fn finish(&mut self) {
        if !self.has_element {
            return;
        }
        for reference in std::mem::take(&mut self.exported) {
            let resolved = self.ctx.resolve(reference);
            if self.is_allowed(resolved) {
                continue;
            }
            let target = report_target(reference, resolved);
            self.violations.push(
                Violation::new(CODE, NAME, self.rule.severity, self.ctx.location(target), MESSAGE)
                    .with_message_id("noExports"),
            );
        }
    }
}
