//! Cohesion scoring over the extracted fact sets
//!
//! A method's score is the share of the class's variables it touches; a
//! class's cohesion is the mean of its method scores. A class with no
//! variables scores every method at zero rather than dividing by zero,
//! matching how a structureless class should read: nothing to cohere around.

use rustpython_ast::StmtClassDef;

use crate::attributes::{all_class_variable_names, method_variable_names};
use crate::location::LineIndex;
use crate::members::{class_methods, is_bound, is_classmethod, is_staticmethod, Method};
use crate::models::{ClassReport, MethodReport};

/// Build the cohesion report for one class.
pub fn class_report(
    class: &StmtClassDef,
    bound_name: &str,
    index: &LineIndex<'_>,
) -> ClassReport {
    let variable_count = all_class_variable_names(class, bound_name).len();

    let methods: Vec<MethodReport> = class_methods(class)
        .into_iter()
        .map(|method| method_report(method, bound_name, variable_count, index))
        .collect();

    let cohesion = if methods.is_empty() {
        None
    } else {
        Some(methods.iter().map(|m| m.percentage).sum::<f64>() / methods.len() as f64)
    };

    ClassReport {
        name: class.name.to_string(),
        location: index.location(class.range.start().to_usize()),
        variable_count,
        methods,
        cohesion,
    }
}

fn method_report(
    method: Method<'_>,
    bound_name: &str,
    variable_count: usize,
    index: &LineIndex<'_>,
) -> MethodReport {
    let mut variables: Vec<String> = method_variable_names(method, bound_name)
        .into_iter()
        .collect();
    variables.sort();

    let percentage = if variable_count == 0 {
        0.0
    } else {
        variables.len() as f64 / variable_count as f64 * 100.0
    };

    MethodReport {
        name: method.name().to_string(),
        location: index.location(method.range().start().to_usize()),
        bound: is_bound(method, bound_name),
        classmethod: is_classmethod(method),
        staticmethod: is_staticmethod(method),
        variables,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::module_classes;
    use crate::members::BOUND_METHOD_ARGUMENT_NAME;
    use rustpython_ast::Mod;
    use rustpython_parser::{parse, Mode};

    fn report_for(source: &str) -> ClassReport {
        let ast: Mod = parse(source, Mode::Module, "<test>").unwrap();
        let index = LineIndex::new(source);
        let classes = module_classes(&ast);
        assert_eq!(classes.len(), 1);
        class_report(classes[0], BOUND_METHOD_ARGUMENT_NAME, &index)
    }

    #[test]
    fn test_partial_cohesion() {
        let report = report_for(
            r#"
class Widget:
    def touches_both(self):
        self.a = 1
        self.b = 2

    def touches_one(self):
        self.a = 3
"#,
        );

        assert_eq!(report.variable_count, 2);
        assert_eq!(report.methods[0].variables, vec!["a", "b"]);
        assert_eq!(report.methods[0].percentage, 100.0);
        assert_eq!(report.methods[1].variables, vec!["a"]);
        assert_eq!(report.methods[1].percentage, 50.0);
        assert_eq!(report.cohesion, Some(75.0));
    }

    #[test]
    fn test_class_without_methods_has_no_score() {
        let report = report_for("class Widget:\n    value = 1\n");

        assert_eq!(report.variable_count, 1);
        assert!(report.methods.is_empty());
        assert_eq!(report.cohesion, None);
    }

    #[test]
    fn test_class_without_variables_scores_zero() {
        let report = report_for(
            r#"
class Widget:
    def method(self):
        return 1
"#,
        );

        assert_eq!(report.variable_count, 0);
        assert_eq!(report.methods[0].percentage, 0.0);
        assert_eq!(report.cohesion, Some(0.0));
    }

    #[test]
    fn test_method_classification_flags() {
        let report = report_for(
            r#"
class Widget:
    @classmethod
    def build(cls):
        pass

    @staticmethod
    def helper():
        pass

    def regular(self):
        pass
"#,
        );

        let build = &report.methods[0];
        assert!(build.classmethod && !build.staticmethod && !build.bound);

        let helper = &report.methods[1];
        assert!(helper.staticmethod && !helper.classmethod && !helper.bound);

        let regular = &report.methods[2];
        assert!(regular.bound && !regular.classmethod && !regular.staticmethod);
    }

    #[test]
    fn test_report_locations_are_one_based() {
        let source = "class Widget:\n    def method(self):\n        pass\n";
        let report = report_for(source);

        assert_eq!(report.location.line, 1);
        assert_eq!(report.location.column, 1);
        assert_eq!(report.methods[0].location.line, 2);
        assert_eq!(report.methods[0].location.column, 5);
    }
}
