//! Shape matchers for guarded calls.
//!
//! Two families live here:
//!
//! - [`find_unguarded_call`] looks for `super.hook()` statements that are
//!   not behind an `if (super.hook)` check.
//! - [`is_lookup_guard`] and [`is_in_try_block`] decide whether a
//!   registration call is protected by a preceding registry lookup or a
//!   `try` block.
//!
//! Both are shape based. Idioms they do not know about count as unguarded.

use crate::syntax;
use tree_sitter::Node;

/// Finds the first call to `super.<member>()` in `stmt` that is not
/// guarded by `if (super.<member>)`.
///
/// Recognized shapes:
///
/// - a bare `super.member();` statement is unguarded;
/// - an `if` whose test is not `super.member` is searched in its
///   consequent only;
/// - a block is searched statement by statement, earliest match wins.
///
/// Every other statement (including `super.member && super.member()`) is
/// treated as guarded.
#[must_use]
pub fn find_unguarded_call<'a>(stmt: Node<'a>, src: &str, member: &str) -> Option<Node<'a>> {
    match stmt.kind() {
        "expression_statement" => {
            syntax::is_super_call_statement(stmt, src, member).then_some(stmt)
        }
        "if_statement" => {
            let guarded = syntax::if_condition(stmt)
                .and_then(|test| syntax::super_member(test, src))
                == Some(member);
            if guarded {
                return None;
            }
            let consequence = stmt.child_by_field_name("consequence")?;
            find_unguarded_call(consequence, src, member)
        }
        "statement_block" => {
            let mut cursor = stmt.walk();
            let children: Vec<_> = stmt.named_children(&mut cursor).collect();
            children
                .into_iter()
                .find_map(|child| find_unguarded_call(child, src, member))
        }
        _ => None,
    }
}

/// Parent of `node`, skipping parentheses.
#[must_use]
pub fn parent_skipping_parens(node: Node<'_>) -> Option<Node<'_>> {
    let mut parent = node.parent()?;
    while parent.kind() == "parenthesized_expression" {
        parent = parent.parent()?;
    }
    Some(parent)
}

fn operator<'s>(node: Node<'_>, src: &'s str) -> Option<&'s str> {
    node.child_by_field_name("operator").map(|op| syntax::text(op, src))
}

fn is_logical(node: Node<'_>, src: &str) -> bool {
    node.kind() == "binary_expression"
        && matches!(operator(node, src), Some("&&" | "||" | "??"))
}

fn is_not(node: Node<'_>, src: &str) -> bool {
    node.kind() == "unary_expression" && operator(node, src) == Some("!")
}

/// Returns `true` if `node` sits in the test of some enclosing `if` whose
/// test is a unary or binary expression.
fn in_compound_if_test(node: Node<'_>) -> bool {
    let mut child = node;
    let mut current = node.parent();
    while let Some(n) = current {
        if n.kind() == "if_statement" {
            let in_test = n
                .child_by_field_name("condition")
                .filter(|c| c.id() == child.id())
                .map(syntax::unwrap_parens);
            if in_test.is_some_and(|t| matches!(t.kind(), "unary_expression" | "binary_expression")) {
                return true;
            }
        }
        child = n;
        current = n.parent();
    }
    false
}

/// Returns `true` if the lookup call `call` guards a later registration of
/// the same tag.
///
/// The lookup must sit inside the test of an `if` whose test is a unary or
/// binary expression. When negated, an odd number of stacked `!`
/// operators counts as a guard and an even number does not. Otherwise
/// any position except a direct operand of `&&`, `||` or `??` counts.
#[must_use]
pub fn is_lookup_guard(call: Node<'_>, src: &str) -> bool {
    if !syntax::is_lookup_call(call, src) || !in_compound_if_test(call) {
        return false;
    }
    let Some(parent) = parent_skipping_parens(call) else {
        return false;
    };
    if is_not(parent, src) {
        let mut negations = 0usize;
        let mut current = Some(parent);
        while let Some(n) = current.filter(|n| is_not(*n, src)) {
            negations += 1;
            current = parent_skipping_parens(n);
        }
        return negations % 2 == 1;
    }
    !is_logical(parent, src)
}

/// Returns `true` if the call is a statement directly inside a `try` block.
#[must_use]
pub fn is_in_try_block(call: Node<'_>) -> bool {
    let Some(stmt) = call.parent().filter(|p| p.kind() == "expression_statement") else {
        return false;
    };
    let Some(block) = stmt.parent().filter(|p| p.kind() == "statement_block") else {
        return false;
    };
    block.parent().is_some_and(|t| {
        t.kind() == "try_statement"
            && t.child_by_field_name("body").is_some_and(|b| b.id() == block.id())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Dialect, SourceFile};

    fn method_body(file: &SourceFile) -> Node<'_> {
        fn find(node: Node<'_>) -> Option<Node<'_>> {
            if node.kind() == "method_definition" {
                return node.child_by_field_name("body");
            }
            let mut cursor = node.walk();
            let children: Vec<_> = node.named_children(&mut cursor).collect();
            children.into_iter().find_map(find)
        }
        find(file.root()).expect("method body")
    }

    fn unguarded(body: &str) -> Option<String> {
        let src = format!("class A extends B {{ connectedCallback() {{ {body} }} }}");
        let file = SourceFile::parse(src, Dialect::Script).expect("parse");
        let body = method_body(&file);
        find_unguarded_call(body, file.content(), "connectedCallback")
            .map(|n| syntax::text(n, file.content()).to_string())
    }

    #[test]
    fn bare_super_call_is_unguarded() {
        assert_eq!(
            unguarded("super.connectedCallback();").as_deref(),
            Some("super.connectedCallback();")
        );
    }

    #[test]
    fn if_guard_on_same_member() {
        assert_eq!(
            unguarded("if (super.connectedCallback) { super.connectedCallback(); }"),
            None
        );
        assert_eq!(
            unguarded("if (super.connectedCallback) super.connectedCallback();"),
            None
        );
    }

    #[test]
    fn unrelated_condition_does_not_guard() {
        assert!(unguarded("if (this.ready) { super.connectedCallback(); }").is_some());
        assert!(
            unguarded("if (super.disconnectedCallback) { super.connectedCallback(); }").is_some()
        );
    }

    #[test]
    fn logical_guard_and_other_hooks() {
        assert_eq!(
            unguarded("super.connectedCallback && super.connectedCallback();"),
            None
        );
        assert_eq!(unguarded("super.disconnectedCallback();"), None);
        assert_eq!(unguarded("this.render();"), None);
    }

    #[test]
    fn earliest_violation_wins() {
        let found = unguarded("foo();\n{ super.connectedCallback(); }\nsuper.connectedCallback();")
            .expect("violation");
        assert_eq!(found, "super.connectedCallback();");
    }

    #[test]
    fn unrecognized_idioms_are_not_searched() {
        assert_eq!(unguarded("try { super.connectedCallback(); } catch {}"), None);
        assert_eq!(unguarded("super.connectedCallback?.();"), None);
    }

    fn lookup_guards(src: &str) -> bool {
        let file = SourceFile::parse(src, Dialect::Script).expect("parse");
        let mut stack = vec![file.root()];
        while let Some(node) = stack.pop() {
            if syntax::is_lookup_call(node, file.content()) {
                return is_lookup_guard(node, file.content());
            }
            let mut cursor = node.walk();
            stack.extend(node.named_children(&mut cursor));
        }
        panic!("no lookup call in {src}");
    }

    #[test]
    fn odd_negation_guards() {
        assert!(lookup_guards("if (!customElements.get('x-foo')) {}"));
        assert!(!lookup_guards("if (!!customElements.get('x-foo')) {}"));
        assert!(lookup_guards("if (!!!customElements.get('x-foo')) {}"));
        assert!(lookup_guards("if (!(customElements.get('x-foo'))) {}"));
    }

    #[test]
    fn comparisons_guard() {
        assert!(lookup_guards("if (customElements.get('x-foo') === undefined) {}"));
        assert!(lookup_guards("if (undefined == window.customElements.get('x-foo')) {}"));
    }

    #[test]
    fn logical_operands_and_plain_tests_do_not_guard() {
        assert!(!lookup_guards("if (customElements.get('x-foo') || ready) {}"));
        assert!(!lookup_guards("if (customElements.get('x-foo')) {}"));
        assert!(!lookup_guards("const known = !customElements.get('x-foo');"));
        assert!(lookup_guards("if (!customElements.get('x-foo') && ready) {}"));
    }

    #[test]
    fn try_block_detection() {
        let file = SourceFile::parse(
            "try { customElements.define('x-a', A); } catch (e) { customElements.define('x-b', B); }",
            Dialect::Script,
        )
        .expect("parse");
        let mut calls = Vec::new();
        let mut stack = vec![file.root()];
        while let Some(node) = stack.pop() {
            if syntax::is_registration_call(node, file.content()) {
                calls.push(node);
            }
            let mut cursor = node.walk();
            stack.extend(node.named_children(&mut cursor));
        }
        calls.sort_by_key(Node::start_byte);
        assert!(is_in_try_block(calls[0]));
        assert!(!is_in_try_block(calls[1]));
    }
}
