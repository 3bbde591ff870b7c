//! Class member collection and method classification
//!
//! Member collection is intentionally shallow: only the immediate statements
//! of a class body are inspected, so methods of nested classes and variables
//! assigned inside methods are not visible here. Full-depth discovery lives
//! in [`crate::attributes`].

use rustpython_ast::{Arg, Arguments, Expr, Stmt, StmtAsyncFunctionDef, StmtClassDef,
    StmtFunctionDef};
use rustpython_ast::text_size::TextRange;

use crate::names::{expr_name, node_name, NodeRef};

/// Conventional first-parameter name marking a method as instance-bound.
pub const BOUND_METHOD_ARGUMENT_NAME: &str = "self";

/// A method definition found in a class body, sync or async.
#[derive(Clone, Copy)]
pub struct Method<'a> {
    stmt: &'a Stmt,
    def: MethodDef<'a>,
}

#[derive(Clone, Copy)]
enum MethodDef<'a> {
    Function(&'a StmtFunctionDef),
    AsyncFunction(&'a StmtAsyncFunctionDef),
}

impl<'a> Method<'a> {
    /// Wrap a statement if it is a function definition.
    pub fn from_stmt(stmt: &'a Stmt) -> Option<Self> {
        match stmt {
            Stmt::FunctionDef(func) => Some(Self {
                stmt,
                def: MethodDef::Function(func),
            }),
            Stmt::AsyncFunctionDef(func) => Some(Self {
                stmt,
                def: MethodDef::AsyncFunction(func),
            }),
            _ => None,
        }
    }

    pub fn name(&self) -> &'a str {
        match self.def {
            MethodDef::Function(func) => func.name.as_str(),
            MethodDef::AsyncFunction(func) => func.name.as_str(),
        }
    }

    pub fn args(&self) -> &'a Arguments {
        match self.def {
            MethodDef::Function(func) => &func.args,
            MethodDef::AsyncFunction(func) => &func.args,
        }
    }

    pub fn decorator_list(&self) -> &'a [Expr] {
        match self.def {
            MethodDef::Function(func) => &func.decorator_list,
            MethodDef::AsyncFunction(func) => &func.decorator_list,
        }
    }

    pub fn range(&self) -> TextRange {
        match self.def {
            MethodDef::Function(func) => func.range,
            MethodDef::AsyncFunction(func) => func.range,
        }
    }

    /// The statement this method was found as, usable as a traversal root.
    pub fn as_stmt(&self) -> &'a Stmt {
        self.stmt
    }
}

/// Return the methods of a class, in source order.
///
/// Only immediate children of the class body count; functions nested inside
/// methods or inner classes are out of scope.
pub fn class_methods<'a>(class: &'a StmtClassDef) -> Vec<Method<'a>> {
    class.body.iter().filter_map(Method::from_stmt).collect()
}

/// Return the assignment targets declared directly in a class body.
///
/// `a = b = 1` yields both targets. Tuple targets are returned as-is; they
/// resolve to no name and drop out when callers build name sets.
pub fn class_variables<'a>(class: &'a StmtClassDef) -> Vec<&'a Expr> {
    class
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Assign(assign) => Some(assign.targets.iter()),
            _ => None,
        })
        .flatten()
        .collect()
}

/// Whether a method carries a decorator with the given name.
///
/// Decorator expressions that resolve to no name (factories over complex
/// bases and the like) are silently skipped.
pub fn has_decorator(method: Method<'_>, decorator: &str) -> bool {
    method
        .decorator_list()
        .iter()
        .filter_map(expr_name)
        .any(|name| name == decorator)
}

pub fn is_classmethod(method: Method<'_>) -> bool {
    has_decorator(method, "classmethod")
}

pub fn is_staticmethod(method: Method<'_>) -> bool {
    has_decorator(method, "staticmethod")
}

/// Whether a method's first formal parameter matches the bound name.
///
/// Purely a naming-convention check; nothing verifies actual binding
/// semantics. Positional-only parameters come before regular ones in the
/// signature, so they are checked first.
pub fn is_bound(method: Method<'_>, bound_name: &str) -> bool {
    let first_arg = first_parameter(method.args());

    match first_arg.and_then(|arg| node_name(NodeRef::Arg(arg))) {
        Some(name) => name == bound_name,
        None => false,
    }
}

fn first_parameter<'a>(args: &'a Arguments) -> Option<&'a Arg> {
    args.posonlyargs
        .first()
        .or_else(|| args.args.first())
        .map(|arg| &arg.def)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustpython_ast::Mod;
    use rustpython_parser::{parse, Mode};

    fn parse_class(source: &str) -> Mod {
        parse(source, Mode::Module, "<test>").unwrap()
    }

    fn class_of(ast: &Mod) -> &StmtClassDef {
        match ast {
            Mod::Module(module) => match &module.body[0] {
                Stmt::ClassDef(class) => class,
                _ => panic!("expected class definition"),
            },
            _ => panic!("expected module"),
        }
    }

    #[test]
    fn test_class_methods_in_source_order() {
        let ast = parse_class(
            r#"
class Widget:
    version = 1

    def first(self):
        pass

    async def second(self):
        pass

    class Inner:
        def hidden(self):
            pass
"#,
        );
        let methods = class_methods(class_of(&ast));
        let names: Vec<_> = methods.iter().map(|m| m.name()).collect();

        // The nested class is opaque at this level.
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_class_variables_with_multiple_targets() {
        let ast = parse_class(
            r#"
class Widget:
    a = 1
    b = c = 2

    def method(self):
        local = 3
"#,
        );
        let targets = class_variables(class_of(&ast));
        let names: Vec<_> = targets.iter().filter_map(|t| expr_name(t)).collect();

        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_tuple_targets_resolve_to_absence() {
        let ast = parse_class("class Widget:\n    a, b = 1, 2\n");
        let targets = class_variables(class_of(&ast));

        assert_eq!(targets.len(), 1);
        assert_eq!(expr_name(targets[0]), None);
    }

    #[test]
    fn test_decorator_detection_is_name_exact() {
        let ast = parse_class(
            r#"
class Widget:
    @classmethod
    def build(cls):
        pass

    @staticmethod
    def helper():
        pass

    @(primary or fallback)
    def odd(self):
        pass
"#,
        );
        let methods = class_methods(class_of(&ast));

        assert!(is_classmethod(methods[0]));
        assert!(!is_staticmethod(methods[0]));

        assert!(is_staticmethod(methods[1]));
        assert!(!is_classmethod(methods[1]));

        // Unresolvable decorator expression counts as neither.
        assert!(!is_classmethod(methods[2]));
        assert!(!is_staticmethod(methods[2]));
    }

    #[test]
    fn test_is_bound() {
        let ast = parse_class(
            r#"
class Widget:
    def bound(self, x):
        pass

    def unbound(other, x):
        pass

    def no_args():
        pass
"#,
        );
        let methods = class_methods(class_of(&ast));

        assert!(is_bound(methods[0], BOUND_METHOD_ARGUMENT_NAME));
        assert!(!is_bound(methods[1], BOUND_METHOD_ARGUMENT_NAME));
        assert!(is_bound(methods[1], "other"));
        assert!(!is_bound(methods[2], BOUND_METHOD_ARGUMENT_NAME));
        assert!(!is_bound(methods[2], "anything"));
    }

    #[test]
    fn test_is_bound_sees_positional_only_parameters() {
        let ast = parse_class(
            r#"
class Widget:
    def bound(self, /, x):
        pass
"#,
        );
        let methods = class_methods(class_of(&ast));

        assert!(is_bound(methods[0], BOUND_METHOD_ARGUMENT_NAME));
    }
}
