//! Structural predicates over the JavaScript/TypeScript syntax tree.
//!
//! Every function here is a pure pattern match on node kinds and field
//! names. Nothing resolves identifiers; see [`crate::scope`] for that.

use tree_sitter::Node;

/// Name of the global registry object.
pub const REGISTRY: &str = "customElements";

/// Global objects the registry may be accessed through.
pub const GLOBAL_OBJECTS: &[&str] = &["window", "globalThis"];

/// Text covered by `node`.
#[must_use]
pub fn text<'s>(node: Node<'_>, src: &'s str) -> &'s str {
    node.utf8_text(src.as_bytes()).unwrap_or("")
}

/// Returns `true` for class declarations and class expressions.
#[must_use]
pub fn is_class(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "class_declaration" | "abstract_class_declaration" | "class"
    )
}

/// Returns `true` for any construct that introduces a function body.
#[must_use]
pub fn is_function(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "function_declaration"
            | "function_expression"
            | "function"
            | "generator_function"
            | "generator_function_declaration"
            | "arrow_function"
            | "method_definition"
    )
}

/// Class name, absent for anonymous class expressions.
#[must_use]
pub fn class_name<'s>(class: Node<'_>, src: &'s str) -> Option<&'s str> {
    class.child_by_field_name("name").map(|n| text(n, src))
}

/// Class body node.
#[must_use]
pub fn class_body(class: Node<'_>) -> Option<Node<'_>> {
    class.child_by_field_name("body")
}

/// Superclass expression of a class, whatever its shape.
#[must_use]
pub fn superclass(class: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = class.walk();
    let heritage = class
        .children(&mut cursor)
        .find(|c| c.kind() == "class_heritage")?;

    let mut cursor = heritage.walk();
    let mut children = heritage.named_children(&mut cursor);
    let first = children.find(|c| c.kind() != "comment")?;
    if first.kind() == "extends_clause" {
        first.child_by_field_name("value")
    } else if first.kind() == "implements_clause" {
        None
    } else {
        Some(first)
    }
}

/// Superclass name, only when the superclass is a bare identifier.
///
/// Mixin applications (`extends Mixin(Base)`) and member expressions
/// (`extends ns.Base`) are not resolved.
#[must_use]
pub fn superclass_name<'s>(class: Node<'_>, src: &'s str) -> Option<&'s str> {
    let sup = superclass(class)?;
    (sup.kind() == "identifier").then(|| text(sup, src))
}

/// Statement that carries leading comments and decorators for `class`.
///
/// For `export class A {}` that is the export statement. For
/// `const A = class {}` it is the declaration statement.
#[must_use]
pub fn class_anchor(class: Node<'_>) -> Node<'_> {
    let mut anchor = class;
    if class.kind() == "class" {
        let mut current = class;
        while let Some(parent) = current.parent() {
            match parent.kind() {
                "variable_declarator" | "lexical_declaration" | "variable_declaration"
                | "assignment_expression" | "expression_statement" | "export_statement"
                | "parenthesized_expression" => {
                    anchor = parent;
                    current = parent;
                }
                _ => break,
            }
        }
        return anchor;
    }
    if let Some(parent) = class.parent() {
        if parent.kind() == "export_statement" {
            anchor = parent;
        }
    }
    anchor
}

/// Doc comment (`/** ... */`) immediately preceding a class.
///
/// The comment must end on the line before the class starts, or on the
/// same line.
#[must_use]
pub fn leading_doc_comment<'t>(class: Node<'t>, src: &str) -> Option<Node<'t>> {
    let anchor = class_anchor(class);
    let prev = anchor.prev_sibling()?;
    if prev.kind() != "comment" || !text(prev, src).starts_with("/**") {
        return None;
    }
    (prev.end_position().row + 1 >= anchor.start_position().row).then_some(prev)
}

/// Decorators attached to a class, including those on an enclosing export.
#[must_use]
pub fn decorators<'t>(class: Node<'t>) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    let mut collect = |node: Node<'t>| {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "decorator" {
                out.push(child);
            }
        }
    };
    collect(class);
    if let Some(parent) = class.parent() {
        if parent.kind() == "export_statement" {
            collect(parent);
        }
    }
    out.sort_by_key(Node::start_byte);
    out
}

/// Name a decorator is invoked by.
///
/// `@foo` and `@foo(...)` give `foo`; `@ns.foo` and `@ns.foo(...)` give `foo`.
#[must_use]
pub fn decorator_name<'s>(decorator: Node<'_>, src: &'s str) -> Option<&'s str> {
    let mut cursor = decorator.walk();
    let expr = decorator
        .named_children(&mut cursor)
        .find(|c| c.kind() != "comment")?;
    let callee = if expr.kind() == "call_expression" {
        expr.child_by_field_name("function")?
    } else {
        expr
    };
    match callee.kind() {
        "identifier" => Some(text(callee, src)),
        "member_expression" => callee
            .child_by_field_name("property")
            .map(|p| text(p, src)),
        _ => None,
    }
}

/// Returns `true` if a class member carries the `static` keyword.
#[must_use]
pub fn is_static_member(member: Node<'_>) -> bool {
    let mut cursor = member.walk();
    let found = member.children(&mut cursor).any(|c| c.kind() == "static");
    found
}

/// Accessor kind of a method definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// Plain method.
    Method,
    /// `get` accessor.
    Get,
    /// `set` accessor.
    Set,
}

/// Accessor kind of a `method_definition`.
#[must_use]
pub fn method_kind(method: Node<'_>) -> MethodKind {
    let mut cursor = method.walk();
    for child in method.children(&mut cursor) {
        match child.kind() {
            "get" => return MethodKind::Get,
            "set" => return MethodKind::Set,
            _ => {}
        }
    }
    MethodKind::Method
}

/// Returns `true` if `method` is a method of a class body (not an
/// object-literal method).
#[must_use]
pub fn is_class_method(method: Node<'_>) -> bool {
    method.kind() == "method_definition"
        && method.parent().is_some_and(|p| p.kind() == "class_body")
}

/// Static name of a class member or object property key.
///
/// Identifiers give their text and private names drop the leading `#`;
/// string and number keys give their value. Computed keys only have a
/// static name when they wrap a string literal (`['onClick']`).
#[must_use]
pub fn member_name<'s>(member: Node<'_>, src: &'s str) -> Option<&'s str> {
    let key = member
        .child_by_field_name("name")
        .or_else(|| member.child_by_field_name("key"))
        .or_else(|| member.child_by_field_name("property"))?;
    property_key_name(key, src)
}

/// Static name of a property key node.
#[must_use]
pub fn property_key_name<'s>(key: Node<'_>, src: &'s str) -> Option<&'s str> {
    match key.kind() {
        "property_identifier" | "identifier" | "number" => Some(text(key, src)),
        "private_property_identifier" => text(key, src).strip_prefix('#'),
        "string" => string_value(key, src),
        "computed_property_name" => {
            let inner = unwrap_parens(key.named_child(0)?);
            string_value(inner, src)
        }
        _ => None,
    }
}

/// Returns `true` for the class constructor method.
#[must_use]
pub fn is_constructor(method: Node<'_>, src: &str) -> bool {
    is_class_method(method)
        && !is_static_member(method)
        && method_kind(method) == MethodKind::Method
        && method
            .child_by_field_name("name")
            .is_some_and(|n| n.kind() == "property_identifier" && text(n, src) == "constructor")
}

/// Value of a plain string literal, without quotes.
#[must_use]
pub fn string_value<'s>(node: Node<'_>, src: &'s str) -> Option<&'s str> {
    if node.kind() != "string" {
        return None;
    }
    let raw = text(node, src);
    if raw.len() < 2 {
        return None;
    }
    raw.get(1..raw.len() - 1)
}

/// Value of a string literal or a template literal without substitutions.
#[must_use]
pub fn static_string<'s>(node: Node<'_>, src: &'s str) -> Option<&'s str> {
    if node.kind() != "template_string" {
        return string_value(node, src);
    }
    let mut cursor = node.walk();
    if node
        .named_children(&mut cursor)
        .any(|c| c.kind() == "template_substitution")
    {
        return None;
    }
    let raw = text(node, src);
    raw.strip_prefix('`')?.strip_suffix('`')
}

/// Strips any number of enclosing parentheses.
#[must_use]
pub fn unwrap_parens(mut node: Node<'_>) -> Node<'_> {
    while node.kind() == "parenthesized_expression" {
        let mut cursor = node.walk();
        let inner = node
            .named_children(&mut cursor)
            .find(|c| c.kind() != "comment");
        match inner {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// Condition of an `if` statement with parentheses removed.
#[must_use]
pub fn if_condition(stmt: Node<'_>) -> Option<Node<'_>> {
    stmt.child_by_field_name("condition").map(unwrap_parens)
}

/// Object and property of a non-computed member access.
#[must_use]
pub fn member_parts(node: Node<'_>) -> Option<(Node<'_>, Node<'_>)> {
    if node.kind() != "member_expression" {
        return None;
    }
    Some((
        node.child_by_field_name("object")?,
        node.child_by_field_name("property")?,
    ))
}

/// Property name of a non-computed member access.
#[must_use]
pub fn member_property<'s>(node: Node<'_>, src: &'s str) -> Option<&'s str> {
    member_parts(node).map(|(_, prop)| text(prop, src))
}

/// Returns `true` if `node` is `object.property` with both given names.
#[must_use]
pub fn is_member(node: Node<'_>, src: &str, object: &str, property: &str) -> bool {
    member_parts(node).is_some_and(|(obj, prop)| {
        obj.kind() == "identifier" && text(obj, src) == object && text(prop, src) == property
    })
}

/// Callee of a call expression.
#[must_use]
pub fn callee(call: Node<'_>) -> Option<Node<'_>> {
    (call.kind() == "call_expression")
        .then(|| call.child_by_field_name("function"))
        .flatten()
}

/// Arguments of a call or `new` expression, comments skipped.
#[must_use]
pub fn call_arguments(call: Node<'_>) -> Vec<Node<'_>> {
    let Some(args) = call.child_by_field_name("arguments") else {
        return Vec::new();
    };
    let mut cursor = args.walk();
    let out = args
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect();
    out
}

/// Returns `true` for a reference to the custom element registry:
/// `customElements`, `window.customElements` or `globalThis.customElements`.
#[must_use]
pub fn is_registry_reference(node: Node<'_>, src: &str) -> bool {
    match node.kind() {
        "identifier" => text(node, src) == REGISTRY,
        "member_expression" => GLOBAL_OBJECTS
            .iter()
            .any(|global| is_member(node, src, global, REGISTRY)),
        _ => false,
    }
}

fn is_registry_call(node: Node<'_>, src: &str, method: &str) -> bool {
    callee(node)
        .and_then(member_parts)
        .is_some_and(|(obj, prop)| is_registry_reference(obj, src) && text(prop, src) == method)
}

/// Returns `true` for `customElements.define(...)`.
#[must_use]
pub fn is_registration_call(node: Node<'_>, src: &str) -> bool {
    is_registry_call(node, src, "define")
}

/// Returns `true` for `customElements.get(...)`.
#[must_use]
pub fn is_lookup_call(node: Node<'_>, src: &str) -> bool {
    is_registry_call(node, src, "get")
}

/// Parsed shape of a `customElements.define(...)` call.
#[derive(Debug, Clone, Copy)]
pub struct Registration<'t> {
    /// The call expression.
    pub call: Node<'t>,
    /// Tag name argument.
    pub tag: Option<Node<'t>>,
    /// Class argument.
    pub class: Option<Node<'t>>,
    /// Options argument.
    pub options: Option<Node<'t>>,
}

impl<'t> Registration<'t> {
    /// Reads a registration call; `None` if `call` is not one.
    #[must_use]
    pub fn parse(call: Node<'t>, src: &str) -> Option<Self> {
        if !is_registration_call(call, src) {
            return None;
        }
        let args = call_arguments(call);
        Some(Self {
            call,
            tag: args.first().copied(),
            class: args.get(1).copied(),
            options: args.get(2).copied(),
        })
    }

    /// Tag name, when given as a string literal.
    #[must_use]
    pub fn tag_name<'s>(&self, src: &'s str) -> Option<&'s str> {
        self.tag.and_then(|t| string_value(t, src))
    }

    /// Value of the `extends` key in the options object, if literal.
    #[must_use]
    pub fn extends_option<'s>(&self, src: &'s str) -> Option<&'s str> {
        let options = self.options?;
        object_property(options, src, "extends").and_then(|v| static_string(v, src))
    }
}

/// Value of a static key in an object literal.
#[must_use]
pub fn object_property<'t>(object: Node<'t>, src: &str, key: &str) -> Option<Node<'t>> {
    if object.kind() != "object" {
        return None;
    }
    let mut cursor = object.walk();
    let pair = object.named_children(&mut cursor).find(|c| {
        c.kind() == "pair"
            && c.child_by_field_name("key")
                .and_then(|k| property_key_name(k, src))
                == Some(key)
    })?;
    pair.child_by_field_name("value")
}

/// Returns `true` for `this` or `this.shadowRoot`.
#[must_use]
pub fn is_this_or_shadow_root(node: Node<'_>, src: &str) -> bool {
    node.kind() == "this"
        || member_parts(node).is_some_and(|(obj, prop)| {
            obj.kind() == "this" && text(prop, src) == "shadowRoot"
        })
}

/// Returns `true` for a member access on `this`.
#[must_use]
pub fn is_this_member(node: Node<'_>, src: &str, property: &str) -> bool {
    member_parts(node)
        .is_some_and(|(obj, prop)| obj.kind() == "this" && text(prop, src) == property)
}

/// Property name of `super.name`.
#[must_use]
pub fn super_member<'s>(node: Node<'_>, src: &'s str) -> Option<&'s str> {
    let (obj, prop) = member_parts(node)?;
    (obj.kind() == "super").then(|| text(prop, src))
}

/// Returns `true` if `stmt` is exactly `super.<name>(...);`.
///
/// Optional calls (`super.name?.()`) do not match.
#[must_use]
pub fn is_super_call_statement(stmt: Node<'_>, src: &str, name: &str) -> bool {
    if stmt.kind() != "expression_statement" {
        return false;
    }
    let Some(expr) = stmt.named_child(0) else {
        return false;
    };
    !is_optional_call(expr) && callee(expr).and_then(|c| super_member(c, src)) == Some(name)
}

/// Returns `true` for `f?.()`, where the `?.` token sits between callee
/// and arguments.
#[must_use]
pub fn is_optional_call(call: Node<'_>) -> bool {
    if call.kind() != "call_expression" {
        return false;
    }
    let mut cursor = call.walk();
    let optional = call
        .children(&mut cursor)
        .any(|c| matches!(c.kind(), "?." | "optional_chain"));
    optional
}

/// Nearest ancestor matching `pred`, excluding `node` itself.
#[must_use]
pub fn ancestor<'t>(node: Node<'t>, mut pred: impl FnMut(Node<'t>) -> bool) -> Option<Node<'t>> {
    let mut current = node.parent();
    while let Some(n) = current {
        if pred(n) {
            return Some(n);
        }
        current = n.parent();
    }
    None
}

/// Nearest enclosing class.
#[must_use]
pub fn enclosing_class(node: Node<'_>) -> Option<Node<'_>> {
    ancestor(node, is_class)
}
