use std::collections::HashSet;

use cohesion::attributes::{
    all_class_variable_names, method_variable_names, module_classes,
};
use cohesion::members::{
    class_methods, class_variables, is_bound, is_classmethod, is_staticmethod,
    BOUND_METHOD_ARGUMENT_NAME,
};
use cohesion::names::expr_name;
use cohesion::parse_module;

fn set(names: &[&str]) -> HashSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_instance_variables_exclude_method_calls() {
    let source = r#"
class Account:
    def update(self):
        self.x = 1
        self.y.append(2)
        self.helper()
"#;
    let ast = parse_module(source, "<test>").unwrap();
    let classes = module_classes(&ast);
    let methods = class_methods(classes[0]);

    let result = method_variable_names(methods[0], BOUND_METHOD_ARGUMENT_NAME);
    assert_eq!(result, set(&["x", "y"]));
}

#[test]
fn test_class_variables_with_chained_assignment() {
    let source = r#"
class Config:
    a = 1
    b = c = 2
"#;
    let ast = parse_module(source, "<test>").unwrap();
    let classes = module_classes(&ast);

    let names: HashSet<String> = class_variables(classes[0])
        .into_iter()
        .filter_map(expr_name)
        .map(str::to_owned)
        .collect();
    assert_eq!(names, set(&["a", "b", "c"]));
}

#[test]
fn test_class_nested_in_function_is_discovered() {
    let source = r#"
def build():
    class Product:
        def method(self):
            self.price = 1
    return Product
"#;
    let ast = parse_module(source, "<test>").unwrap();
    let classes = module_classes(&ast);

    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].name.as_str(), "Product");
}

#[test]
fn test_binding_classification() {
    let source = r#"
class Service:
    def bound(self):
        pass

    def renamed(this):
        pass

    @staticmethod
    def free():
        pass
"#;
    let ast = parse_module(source, "<test>").unwrap();
    let classes = module_classes(&ast);
    let methods = class_methods(classes[0]);

    assert!(is_bound(methods[0], "self"));
    assert!(!is_bound(methods[1], "self"));
    assert!(is_bound(methods[1], "this"));
    // Zero parameters is never bound, whatever the expected name.
    assert!(!is_bound(methods[2], "self"));
    assert!(!is_bound(methods[2], ""));
}

#[test]
fn test_decorator_classification_is_exclusive() {
    let source = r#"
class Service:
    @classmethod
    def of(cls):
        pass

    @staticmethod
    def helper():
        pass
"#;
    let ast = parse_module(source, "<test>").unwrap();
    let classes = module_classes(&ast);
    let methods = class_methods(classes[0]);

    assert!(is_classmethod(methods[0]) && !is_staticmethod(methods[0]));
    assert!(is_staticmethod(methods[1]) && !is_classmethod(methods[1]));
}

#[test]
fn test_class_wide_collection_spans_all_methods() {
    let source = r#"
class Tracker:
    limit = 10

    def start(self):
        self.count = 0

    def bump(self):
        self.count += 1
        self.last = self.stamp()
"#;
    let ast = parse_module(source, "<test>").unwrap();
    let classes = module_classes(&ast);

    // stamp is called, so it never counts as a variable; limit comes from
    // the declaration side, count and last from usage.
    let names = all_class_variable_names(classes[0], BOUND_METHOD_ARGUMENT_NAME);
    assert_eq!(names, set(&["limit", "count", "last"]));
}

#[test]
fn test_repeated_extraction_is_stable() {
    let source = r#"
class Stable:
    def method(self):
        self.a = self.b
        self.c()
"#;
    let ast = parse_module(source, "<test>").unwrap();
    let classes = module_classes(&ast);
    let methods = class_methods(classes[0]);

    let runs: Vec<HashSet<String>> = (0..3)
        .map(|_| method_variable_names(methods[0], BOUND_METHOD_ARGUMENT_NAME))
        .collect();

    assert_eq!(runs[0], set(&["a", "b"]));
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
}
