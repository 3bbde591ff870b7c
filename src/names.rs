//! Name resolution over AST nodes
//!
//! Every collector in this crate identifies nodes by their canonical textual
//! name: a name expression by its identifier, an attribute access by its
//! attribute, a call by its callee, a definition by its declared name. Nodes
//! outside that projection table have no name, which is reported as `None`
//! and filtered out by callers rather than treated as an error.

use rustpython_ast::{Arg, Expr, ExprAttribute, Stmt};

/// A borrowed reference to any AST node the name projection understands.
///
/// The tree is owned by the caller and never mutated here.
#[derive(Clone, Copy)]
pub enum NodeRef<'a> {
    Expr(&'a Expr),
    Stmt(&'a Stmt),
    Arg(&'a Arg),
}

impl<'a> From<&'a Expr> for NodeRef<'a> {
    fn from(expr: &'a Expr) -> Self {
        NodeRef::Expr(expr)
    }
}

impl<'a> From<&'a Stmt> for NodeRef<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        NodeRef::Stmt(stmt)
    }
}

impl<'a> From<&'a Arg> for NodeRef<'a> {
    fn from(arg: &'a Arg) -> Self {
        NodeRef::Arg(arg)
    }
}

/// Resolve the canonical name of a node.
///
/// Projects the node to its named sub-part, kind by kind, until a plain
/// string is reached. Subscripts and calls project through their value and
/// callee, so `foo[0]` and `foo()` both resolve to `foo`. Returns `None` as
/// soon as an unrecognized kind is reached.
pub fn node_name(node: NodeRef<'_>) -> Option<&str> {
    let mut current = node;

    loop {
        match current {
            NodeRef::Expr(expr) => match expr {
                Expr::Name(name) => return Some(name.id.as_str()),
                Expr::Attribute(attr) => return Some(attr.attr.as_str()),
                Expr::Call(call) => current = NodeRef::Expr(&call.func),
                Expr::Subscript(sub) => current = NodeRef::Expr(&sub.value),
                _ => return None,
            },
            NodeRef::Stmt(stmt) => match stmt {
                Stmt::FunctionDef(func) => return Some(func.name.as_str()),
                Stmt::AsyncFunctionDef(func) => return Some(func.name.as_str()),
                Stmt::ClassDef(class) => return Some(class.name.as_str()),
                _ => return None,
            },
            NodeRef::Arg(arg) => return Some(arg.arg.as_str()),
        }
    }
}

/// Resolve the name of an expression node.
pub fn expr_name(expr: &Expr) -> Option<&str> {
    node_name(NodeRef::Expr(expr))
}

/// Return the base name of an attribute access, but only when the base is a
/// plain name reference. `self.x` gives `self`; `self.y.z` and `foo().z`
/// give `None`, since their bases are not plain names.
pub fn attribute_base_name(attr: &ExprAttribute) -> Option<&str> {
    match &*attr.value {
        Expr::Name(name) => Some(name.id.as_str()),
        _ => None,
    }
}
