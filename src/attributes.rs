//! Instance variable collection and name aggregation
//!
//! An instance variable usage is an attribute access rooted at the bound
//! name (`self.x`) that is not itself invoked as a call. `self.foo()` shows
//! up in the tree both as a call and as an attribute access on `self`, so
//! attribute accesses whose name matches any resolved callee name in the
//! same subtree are discarded.
//!
//! The call filter is name-based, not position-based: when the same name is
//! both read and called in one scope (`self.x` and `self.x()`), the read is
//! dropped along with the call. Known precision limitation, kept as-is.
//!
//! Unlike the single-level member collection in [`crate::members`], every
//! traversal here is full-depth: nested functions, comprehensions, and inner
//! classes are all visible.

use std::collections::HashSet;

use rustpython_ast::{Expr, Mod, Stmt, StmtClassDef};

use crate::members::{class_variables, Method};
use crate::names::{attribute_base_name, expr_name};
use crate::walk::{walk_expr, walk_module, walk_stmt, Visitor};

/// One-pass collector for self-rooted attribute accesses and callee names.
struct AttributeCollector<'a, 'b> {
    bound_name: &'b str,
    attributes: Vec<&'a Expr>,
    call_names: HashSet<&'a str>,
}

impl<'a, 'b> AttributeCollector<'a, 'b> {
    fn new(bound_name: &'b str) -> Self {
        Self {
            bound_name,
            attributes: Vec::new(),
            call_names: HashSet::new(),
        }
    }

    /// Drop attribute accesses that are also invoked as calls.
    fn finish(self) -> Vec<&'a Expr> {
        let call_names = self.call_names;
        self.attributes
            .into_iter()
            .filter(|expr| match expr {
                Expr::Attribute(attr) => !call_names.contains(attr.attr.as_str()),
                _ => true,
            })
            .collect()
    }
}

impl<'a, 'b> Visitor<'a> for AttributeCollector<'a, 'b> {
    fn visit_expr(&mut self, expr: &'a Expr) {
        match expr {
            Expr::Attribute(attr) => {
                // The base must be a plain name reference; chained or
                // computed bases are not instance accesses of this object.
                if attribute_base_name(attr) == Some(self.bound_name) {
                    self.attributes.push(expr);
                }
            }
            Expr::Call(_) => {
                if let Some(name) = expr_name(expr) {
                    self.call_names.insert(name);
                }
            }
            _ => {}
        }
    }
}

/// Instance variable usages anywhere inside one method.
pub fn method_instance_variables<'a>(method: Method<'a>, bound_name: &str) -> Vec<&'a Expr> {
    let mut collector = AttributeCollector::new(bound_name);
    walk_stmt(&mut collector, method.as_stmt());
    collector.finish()
}

/// Instance variable usages anywhere inside a class body.
///
/// The class is a single traversal root, so every usage counts no matter
/// which method it appears in. The call filter consequently applies across
/// the whole class, not per method.
pub fn class_instance_variables<'a>(class: &'a StmtClassDef, bound_name: &str) -> Vec<&'a Expr> {
    let mut collector = AttributeCollector::new(bound_name);
    for decorator in &class.decorator_list {
        walk_expr(&mut collector, decorator);
    }
    for base in &class.bases {
        walk_expr(&mut collector, base);
    }
    for keyword in &class.keywords {
        walk_expr(&mut collector, &keyword.value);
    }
    for stmt in &class.body {
        walk_stmt(&mut collector, stmt);
    }
    collector.finish()
}

/// Names of the instance variables one method uses.
pub fn method_variable_names(method: Method<'_>, bound_name: &str) -> HashSet<String> {
    method_instance_variables(method, bound_name)
        .into_iter()
        .filter_map(expr_name)
        .map(str::to_owned)
        .collect()
}

/// Class-variable declarations plus instance-variable usages, as nodes.
///
/// Tuple targets from the declaration side survive here; they fall out in
/// [`all_class_variable_names`] when name resolution returns absence.
pub fn all_class_variables<'a>(class: &'a StmtClassDef, bound_name: &str) -> Vec<&'a Expr> {
    let mut variables = class_variables(class);
    variables.extend(class_instance_variables(class, bound_name));
    variables
}

/// Names of everything the class declares or uses as a variable.
pub fn all_class_variable_names(class: &StmtClassDef, bound_name: &str) -> HashSet<String> {
    all_class_variables(class, bound_name)
        .into_iter()
        .filter_map(expr_name)
        .map(str::to_owned)
        .collect()
}

/// Collector for class definitions at any depth.
struct ClassCollector<'a> {
    classes: Vec<&'a StmtClassDef>,
}

impl<'a> Visitor<'a> for ClassCollector<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        if let Stmt::ClassDef(class) = stmt {
            self.classes.push(class);
        }
    }
}

/// Every class definition in a module, including classes nested inside
/// functions or other classes.
pub fn module_classes<'a>(module: &'a Mod) -> Vec<&'a StmtClassDef> {
    let mut collector = ClassCollector {
        classes: Vec::new(),
    };
    walk_module(&mut collector, module);
    collector.classes
}
