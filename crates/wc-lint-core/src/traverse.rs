//! Depth-first traversal with class and method scope tracking.
//!
//! [`walk`] visits every named node once, pre-order on [`Visitor::enter`]
//! and post-order on [`Visitor::leave`]. Before a class or class method is
//! entered a frame is pushed onto the [`ScopeTracker`], and it is popped
//! after the node is left, so visitors can ask where they are without
//! walking ancestors themselves.
//!
//! Only class and method boundaries push frames. A function nested inside
//! `connectedCallback` is still inside `connectedCallback`.

use crate::classify::ComponentClassifier;
use crate::context::FileContext;
use crate::syntax::{self, MethodKind};
use tree_sitter::Node;

/// Lifecycle callbacks the platform invokes on custom elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleHook {
    /// `connectedCallback`
    Connected,
    /// `disconnectedCallback`
    Disconnected,
    /// `adoptedCallback`
    Adopted,
    /// `attributeChangedCallback`
    AttributeChanged,
}

impl LifecycleHook {
    /// All hooks, in their canonical order.
    pub const ALL: [Self; 4] = [
        Self::Connected,
        Self::Disconnected,
        Self::Adopted,
        Self::AttributeChanged,
    ];

    /// Method name of the hook.
    #[must_use]
    pub fn method_name(self) -> &'static str {
        match self {
            Self::Connected => "connectedCallback",
            Self::Disconnected => "disconnectedCallback",
            Self::Adopted => "adoptedCallback",
            Self::AttributeChanged => "attributeChangedCallback",
        }
    }

    /// Looks up a hook by method name.
    #[must_use]
    pub fn from_method_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.method_name() == name)
    }

    /// Method names of all hooks.
    #[must_use]
    pub fn method_names() -> [&'static str; 4] {
        Self::ALL.map(Self::method_name)
    }
}

/// Role a class method plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodRole {
    /// The class constructor.
    Constructor,
    /// One of the lifecycle callbacks.
    Lifecycle(LifecycleHook),
    /// Any other method or accessor.
    Other,
}

/// A class being traversed.
#[derive(Debug, Clone)]
pub struct ClassFrame<'a> {
    /// Class declaration or expression.
    pub node: Node<'a>,
    /// Class name, if any.
    pub name: Option<String>,
    /// Superclass name, only when it is a bare identifier.
    pub superclass: Option<String>,
    /// Classification verdict.
    pub is_component: bool,
    /// Whether the class extends `HTMLElement` directly.
    pub is_direct_base_subclass: bool,
}

/// A class method being traversed.
#[derive(Debug, Clone)]
pub struct MethodFrame<'a> {
    /// The `method_definition` node.
    pub node: Node<'a>,
    /// Static method name, if any.
    pub name: Option<String>,
    /// Role of the method.
    pub role: MethodRole,
    /// Whether the method is `static`.
    pub is_static: bool,
}

/// Entry on the scope stack.
#[derive(Debug, Clone)]
pub enum Frame<'a> {
    /// Inside a class.
    Class(ClassFrame<'a>),
    /// Inside a class method.
    Method(MethodFrame<'a>),
}

impl<'a> Frame<'a> {
    fn node(&self) -> Node<'a> {
        match self {
            Self::Class(c) => c.node,
            Self::Method(m) => m.node,
        }
    }
}

/// Stack of class and method frames.
#[derive(Debug, Default)]
pub struct ScopeTracker<'a> {
    frames: Vec<Frame<'a>>,
}

impl<'a> ScopeTracker<'a> {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open frames.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` when outside every class.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Innermost class.
    #[must_use]
    pub fn current_class(&self) -> Option<&ClassFrame<'a>> {
        self.frames.iter().rev().find_map(|f| match f {
            Frame::Class(c) => Some(c),
            Frame::Method(_) => None,
        })
    }

    /// Method of the innermost class the traversal is in.
    ///
    /// `None` in a class body outside any method, and in a class nested
    /// inside a method until one of its own methods is entered.
    #[must_use]
    pub fn current_method(&self) -> Option<&MethodFrame<'a>> {
        match self.frames.last()? {
            Frame::Method(m) => Some(m),
            Frame::Class(_) => None,
        }
    }

    /// Returns `true` inside a class classified as a component.
    #[must_use]
    pub fn is_inside_component_class(&self) -> bool {
        self.current_class().is_some_and(|c| c.is_component)
    }

    /// Returns `true` inside the constructor of the innermost class.
    #[must_use]
    pub fn is_inside_constructor(&self) -> bool {
        self.current_method()
            .is_some_and(|m| m.role == MethodRole::Constructor)
    }

    /// Returns `true` inside the constructor of a component class.
    #[must_use]
    pub fn is_inside_component_constructor(&self) -> bool {
        self.is_inside_component_class() && self.is_inside_constructor()
    }

    /// Returns `true` inside the given lifecycle callback.
    #[must_use]
    pub fn is_inside_hook(&self, hook: LifecycleHook) -> bool {
        self.current_method()
            .is_some_and(|m| m.role == MethodRole::Lifecycle(hook))
    }

    /// Pushes a frame if `node` opens a class or class method.
    ///
    /// Returns `true` if a frame was pushed.
    pub fn enter(&mut self, node: Node<'a>, src: &str, classifier: &ComponentClassifier) -> bool {
        if syntax::is_class(node) {
            self.frames.push(Frame::Class(ClassFrame {
                node,
                name: syntax::class_name(node, src).map(str::to_string),
                superclass: syntax::superclass_name(node, src).map(str::to_string),
                is_component: classifier.is_component(node, src),
                is_direct_base_subclass: ComponentClassifier::is_direct_base_subclass(node, src),
            }));
            return true;
        }
        if syntax::is_class_method(node) {
            let name = syntax::member_name(node, src).map(str::to_string);
            let is_static = syntax::is_static_member(node);
            let role = if syntax::is_constructor(node, src) {
                MethodRole::Constructor
            } else if !is_static && syntax::method_kind(node) == MethodKind::Method {
                // Only instance methods are hooks; statics and accessors stay `Other`.
                name.as_deref()
                    .and_then(LifecycleHook::from_method_name)
                    .map_or(MethodRole::Other, MethodRole::Lifecycle)
            } else {
                MethodRole::Other
            };
            self.frames.push(Frame::Method(MethodFrame {
                node,
                name,
                role,
                is_static,
            }));
            return true;
        }
        false
    }

    /// Pops the frame opened by `node`, if it is on top.
    pub fn exit(&mut self, node: Node<'a>) {
        if self.frames.last().is_some_and(|f| f.node().id() == node.id()) {
            self.frames.pop();
        } else {
            debug_assert!(
                !syntax::is_class(node) && !syntax::is_class_method(node),
                "scope frames left out of order at {:?}",
                node.start_position()
            );
        }
    }
}

/// Callbacks driven by [`walk`].
pub trait Visitor<'a> {
    /// Called before the children of `node` are visited.
    fn enter(&mut self, node: Node<'a>, scope: &ScopeTracker<'a>) {
        let _ = (node, scope);
    }

    /// Called after the children of `node` are visited.
    fn leave(&mut self, node: Node<'a>, scope: &ScopeTracker<'a>) {
        let _ = (node, scope);
    }

    /// Called once after the whole program has been left.
    fn finish(&mut self) {}
}

/// Walks the file's syntax tree depth-first, driving `visitor`.
pub fn walk<'a, V: Visitor<'a>>(ctx: &'a FileContext<'a>, visitor: &mut V) {
    let src = ctx.content;
    let classifier = ctx.classifier();
    let mut tracker = ScopeTracker::new();
    let mut cursor = ctx.source.root().walk();

    'outer: loop {
        let node = cursor.node();
        if node.is_named() {
            tracker.enter(node, src, classifier);
            visitor.enter(node, &tracker);
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            let node = cursor.node();
            if node.is_named() {
                visitor.leave(node, &tracker);
                tracker.exit(node);
            }
            if cursor.goto_next_sibling() {
                continue 'outer;
            }
            if !cursor.goto_parent() {
                break 'outer;
            }
        }
    }

    debug_assert!(tracker.is_empty(), "scope frames left open after traversal");
    visitor.finish();
}
