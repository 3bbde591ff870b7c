//! Depth-first traversal over rustpython AST trees
//!
//! The collectors need to see every statement and expression in a subtree,
//! at arbitrary depth, including inside nested functions and classes. This
//! module centralizes that recursion so each collector only implements the
//! [`Visitor`] callbacks it cares about.
//!
//! Traversal is pre-order: a node is reported before its children. Trees are
//! finite and acyclic, so the walk terminates unconditionally and never
//! revisits a node.

use rustpython_ast::{Arguments, Expr, ExceptHandler, Mod, Pattern, Stmt};

/// Callbacks invoked once per node during a walk.
///
/// The lifetime ties collected references to the input tree, which stays
/// borrowed and unmodified for the whole traversal.
pub trait Visitor<'a> {
    fn visit_stmt(&mut self, _stmt: &'a Stmt) {}
    fn visit_expr(&mut self, _expr: &'a Expr) {}
}

/// Walk every statement of a module.
pub fn walk_module<'a, V: Visitor<'a>>(visitor: &mut V, module: &'a Mod) {
    if let Mod::Module(module) = module {
        for stmt in &module.body {
            walk_stmt(visitor, stmt);
        }
    }
}

/// Walk a statement and everything beneath it.
pub fn walk_stmt<'a, V: Visitor<'a>>(visitor: &mut V, stmt: &'a Stmt) {
    visitor.visit_stmt(stmt);

    match stmt {
        Stmt::FunctionDef(func) => {
            for decorator in &func.decorator_list {
                walk_expr(visitor, decorator);
            }
            walk_arguments(visitor, &func.args);
            if let Some(returns) = &func.returns {
                walk_expr(visitor, returns);
            }
            for stmt in &func.body {
                walk_stmt(visitor, stmt);
            }
        }
        Stmt::AsyncFunctionDef(func) => {
            for decorator in &func.decorator_list {
                walk_expr(visitor, decorator);
            }
            walk_arguments(visitor, &func.args);
            if let Some(returns) = &func.returns {
                walk_expr(visitor, returns);
            }
            for stmt in &func.body {
                walk_stmt(visitor, stmt);
            }
        }
        Stmt::ClassDef(class) => {
            for decorator in &class.decorator_list {
                walk_expr(visitor, decorator);
            }
            for base in &class.bases {
                walk_expr(visitor, base);
            }
            for keyword in &class.keywords {
                walk_expr(visitor, &keyword.value);
            }
            for stmt in &class.body {
                walk_stmt(visitor, stmt);
            }
        }
        Stmt::Return(ret) => {
            if let Some(value) = &ret.value {
                walk_expr(visitor, value);
            }
        }
        Stmt::Delete(del) => {
            for target in &del.targets {
                walk_expr(visitor, target);
            }
        }
        Stmt::Assign(assign) => {
            for target in &assign.targets {
                walk_expr(visitor, target);
            }
            walk_expr(visitor, &assign.value);
        }
        Stmt::AugAssign(aug) => {
            walk_expr(visitor, &aug.target);
            walk_expr(visitor, &aug.value);
        }
        Stmt::AnnAssign(ann) => {
            walk_expr(visitor, &ann.target);
            walk_expr(visitor, &ann.annotation);
            if let Some(value) = &ann.value {
                walk_expr(visitor, value);
            }
        }
        Stmt::For(for_stmt) => {
            walk_expr(visitor, &for_stmt.target);
            walk_expr(visitor, &for_stmt.iter);
            for stmt in &for_stmt.body {
                walk_stmt(visitor, stmt);
            }
            for stmt in &for_stmt.orelse {
                walk_stmt(visitor, stmt);
            }
        }
        Stmt::AsyncFor(for_stmt) => {
            walk_expr(visitor, &for_stmt.target);
            walk_expr(visitor, &for_stmt.iter);
            for stmt in &for_stmt.body {
                walk_stmt(visitor, stmt);
            }
            for stmt in &for_stmt.orelse {
                walk_stmt(visitor, stmt);
            }
        }
        Stmt::While(while_stmt) => {
            walk_expr(visitor, &while_stmt.test);
            for stmt in &while_stmt.body {
                walk_stmt(visitor, stmt);
            }
            for stmt in &while_stmt.orelse {
                walk_stmt(visitor, stmt);
            }
        }
        Stmt::If(if_stmt) => {
            walk_expr(visitor, &if_stmt.test);
            for stmt in &if_stmt.body {
                walk_stmt(visitor, stmt);
            }
            for stmt in &if_stmt.orelse {
                walk_stmt(visitor, stmt);
            }
        }
        Stmt::With(with_stmt) => {
            for item in &with_stmt.items {
                walk_expr(visitor, &item.context_expr);
                if let Some(optional_vars) = &item.optional_vars {
                    walk_expr(visitor, optional_vars);
                }
            }
            for stmt in &with_stmt.body {
                walk_stmt(visitor, stmt);
            }
        }
        Stmt::AsyncWith(with_stmt) => {
            for item in &with_stmt.items {
                walk_expr(visitor, &item.context_expr);
                if let Some(optional_vars) = &item.optional_vars {
                    walk_expr(visitor, optional_vars);
                }
            }
            for stmt in &with_stmt.body {
                walk_stmt(visitor, stmt);
            }
        }
        Stmt::Match(match_stmt) => {
            walk_expr(visitor, &match_stmt.subject);
            for case in &match_stmt.cases {
                walk_pattern(visitor, &case.pattern);
                if let Some(guard) = &case.guard {
                    walk_expr(visitor, guard);
                }
                for stmt in &case.body {
                    walk_stmt(visitor, stmt);
                }
            }
        }
        Stmt::Raise(raise_stmt) => {
            if let Some(exc) = &raise_stmt.exc {
                walk_expr(visitor, exc);
            }
            if let Some(cause) = &raise_stmt.cause {
                walk_expr(visitor, cause);
            }
        }
        Stmt::Try(try_stmt) => {
            for stmt in &try_stmt.body {
                walk_stmt(visitor, stmt);
            }
            for handler in &try_stmt.handlers {
                walk_except_handler(visitor, handler);
            }
            for stmt in &try_stmt.orelse {
                walk_stmt(visitor, stmt);
            }
            for stmt in &try_stmt.finalbody {
                walk_stmt(visitor, stmt);
            }
        }
        Stmt::TryStar(try_stmt) => {
            for stmt in &try_stmt.body {
                walk_stmt(visitor, stmt);
            }
            for handler in &try_stmt.handlers {
                walk_except_handler(visitor, handler);
            }
            for stmt in &try_stmt.orelse {
                walk_stmt(visitor, stmt);
            }
            for stmt in &try_stmt.finalbody {
                walk_stmt(visitor, stmt);
            }
        }
        Stmt::Assert(assert_stmt) => {
            walk_expr(visitor, &assert_stmt.test);
            if let Some(msg) = &assert_stmt.msg {
                walk_expr(visitor, msg);
            }
        }
        Stmt::Expr(expr_stmt) => {
            walk_expr(visitor, &expr_stmt.value);
        }
        // Import, Global, Nonlocal, Pass, Break, Continue carry no
        // expressions to descend into.
        _ => {}
    }
}

/// Walk an expression and everything beneath it.
pub fn walk_expr<'a, V: Visitor<'a>>(visitor: &mut V, expr: &'a Expr) {
    visitor.visit_expr(expr);

    match expr {
        Expr::BoolOp(boolop) => {
            for value in &boolop.values {
                walk_expr(visitor, value);
            }
        }
        Expr::NamedExpr(named) => {
            walk_expr(visitor, &named.target);
            walk_expr(visitor, &named.value);
        }
        Expr::BinOp(binop) => {
            walk_expr(visitor, &binop.left);
            walk_expr(visitor, &binop.right);
        }
        Expr::UnaryOp(unop) => {
            walk_expr(visitor, &unop.operand);
        }
        Expr::Lambda(lambda) => {
            walk_arguments(visitor, &lambda.args);
            walk_expr(visitor, &lambda.body);
        }
        Expr::IfExp(ifexp) => {
            walk_expr(visitor, &ifexp.test);
            walk_expr(visitor, &ifexp.body);
            walk_expr(visitor, &ifexp.orelse);
        }
        Expr::Dict(dict) => {
            for key in dict.keys.iter().flatten() {
                walk_expr(visitor, key);
            }
            for value in &dict.values {
                walk_expr(visitor, value);
            }
        }
        Expr::Set(set) => {
            for elt in &set.elts {
                walk_expr(visitor, elt);
            }
        }
        Expr::ListComp(comp) => {
            walk_expr(visitor, &comp.elt);
            for generator in &comp.generators {
                walk_expr(visitor, &generator.target);
                walk_expr(visitor, &generator.iter);
                for if_clause in &generator.ifs {
                    walk_expr(visitor, if_clause);
                }
            }
        }
        Expr::SetComp(comp) => {
            walk_expr(visitor, &comp.elt);
            for generator in &comp.generators {
                walk_expr(visitor, &generator.target);
                walk_expr(visitor, &generator.iter);
                for if_clause in &generator.ifs {
                    walk_expr(visitor, if_clause);
                }
            }
        }
        Expr::DictComp(comp) => {
            walk_expr(visitor, &comp.key);
            walk_expr(visitor, &comp.value);
            for generator in &comp.generators {
                walk_expr(visitor, &generator.target);
                walk_expr(visitor, &generator.iter);
                for if_clause in &generator.ifs {
                    walk_expr(visitor, if_clause);
                }
            }
        }
        Expr::GeneratorExp(comp) => {
            walk_expr(visitor, &comp.elt);
            for generator in &comp.generators {
                walk_expr(visitor, &generator.target);
                walk_expr(visitor, &generator.iter);
                for if_clause in &generator.ifs {
                    walk_expr(visitor, if_clause);
                }
            }
        }
        Expr::Await(await_expr) => {
            walk_expr(visitor, &await_expr.value);
        }
        Expr::Yield(yield_expr) => {
            if let Some(value) = &yield_expr.value {
                walk_expr(visitor, value);
            }
        }
        Expr::YieldFrom(yield_from) => {
            walk_expr(visitor, &yield_from.value);
        }
        Expr::Compare(compare) => {
            walk_expr(visitor, &compare.left);
            for comparator in &compare.comparators {
                walk_expr(visitor, comparator);
            }
        }
        Expr::Call(call) => {
            walk_expr(visitor, &call.func);
            for arg in &call.args {
                walk_expr(visitor, arg);
            }
            for keyword in &call.keywords {
                walk_expr(visitor, &keyword.value);
            }
        }
        Expr::FormattedValue(fval) => {
            walk_expr(visitor, &fval.value);
            if let Some(format_spec) = &fval.format_spec {
                walk_expr(visitor, format_spec);
            }
        }
        Expr::JoinedStr(jstr) => {
            for value in &jstr.values {
                walk_expr(visitor, value);
            }
        }
        Expr::Attribute(attr) => {
            walk_expr(visitor, &attr.value);
        }
        Expr::Subscript(sub) => {
            walk_expr(visitor, &sub.value);
            walk_expr(visitor, &sub.slice);
        }
        Expr::Starred(starred) => {
            walk_expr(visitor, &starred.value);
        }
        Expr::List(list) => {
            for elt in &list.elts {
                walk_expr(visitor, elt);
            }
        }
        Expr::Tuple(tuple) => {
            for elt in &tuple.elts {
                walk_expr(visitor, elt);
            }
        }
        Expr::Slice(slice) => {
            if let Some(lower) = &slice.lower {
                walk_expr(visitor, lower);
            }
            if let Some(upper) = &slice.upper {
                walk_expr(visitor, upper);
            }
            if let Some(step) = &slice.step {
                walk_expr(visitor, step);
            }
        }
        // Name and Constant are leaves.
        _ => {}
    }
}

fn walk_arguments<'a, V: Visitor<'a>>(visitor: &mut V, args: &'a Arguments) {
    for arg in args
        .posonlyargs
        .iter()
        .chain(&args.args)
        .chain(&args.kwonlyargs)
    {
        if let Some(annotation) = &arg.def.annotation {
            walk_expr(visitor, annotation);
        }
        if let Some(default) = &arg.default {
            walk_expr(visitor, default);
        }
    }
    if let Some(vararg) = &args.vararg {
        if let Some(annotation) = &vararg.annotation {
            walk_expr(visitor, annotation);
        }
    }
    if let Some(kwarg) = &args.kwarg {
        if let Some(annotation) = &kwarg.annotation {
            walk_expr(visitor, annotation);
        }
    }
}

fn walk_except_handler<'a, V: Visitor<'a>>(visitor: &mut V, handler: &'a ExceptHandler) {
    let ExceptHandler::ExceptHandler(handler) = handler;
    if let Some(type_) = &handler.type_ {
        walk_expr(visitor, type_);
    }
    for stmt in &handler.body {
        walk_stmt(visitor, stmt);
    }
}

fn walk_pattern<'a, V: Visitor<'a>>(visitor: &mut V, pattern: &'a Pattern) {
    match pattern {
        Pattern::MatchValue(value) => {
            walk_expr(visitor, &value.value);
        }
        Pattern::MatchSequence(seq) => {
            for pattern in &seq.patterns {
                walk_pattern(visitor, pattern);
            }
        }
        Pattern::MatchMapping(mapping) => {
            for key in &mapping.keys {
                walk_expr(visitor, key);
            }
            for pattern in &mapping.patterns {
                walk_pattern(visitor, pattern);
            }
        }
        Pattern::MatchClass(class) => {
            walk_expr(visitor, &class.cls);
            for pattern in &class.patterns {
                walk_pattern(visitor, pattern);
            }
            for pattern in &class.kwd_patterns {
                walk_pattern(visitor, pattern);
            }
        }
        Pattern::MatchAs(as_pattern) => {
            if let Some(pattern) = &as_pattern.pattern {
                walk_pattern(visitor, pattern);
            }
        }
        Pattern::MatchOr(or_pattern) => {
            for pattern in &or_pattern.patterns {
                walk_pattern(visitor, pattern);
            }
        }
        // MatchSingleton and MatchStar carry no sub-expressions.
        _ => {}
    }
}
