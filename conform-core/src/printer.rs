// Error printer: flattens an outcome tree into path-prefixed messages

use crate::{Container, Outcome};

fn marker(container: Option<Container>, key: &str, nested: bool) -> String {
    let at = if nested { "at" } else { "At" };
    match container {
        Some(Container::Array) => format!("{} item {}: ", at, key),
        Some(Container::Object) => format!("{} field \"{}\": ", at, key),
        None => String::new(),
    }
}

/// Flatten an outcome into an ordered list of display-ready messages.
///
/// Own messages come before nested ones, nested items follow definition
/// order, and each level contributes a path marker (`At field "a": ` at the
/// outermost level, `at item 0: ` below it). Uses an explicit worklist, so
/// depth is not limited by the call stack.
pub fn print_verbose(outcome: &Outcome) -> Vec<String> {
    let mut lines = Vec::new();
    // (outcome, accumulated path prefix, depth > 0)
    let mut stack: Vec<(&Outcome, String, bool)> = vec![(outcome, String::new(), false)];

    while let Some((current, prefix, nested)) = stack.pop() {
        let Outcome::Err(failure) = current else {
            continue;
        };

        lines.extend(failure.errors.iter().map(|e| format!("{}{}", prefix, e)));

        for (key, child) in failure.items.iter().rev() {
            let child_prefix = format!("{}{}", prefix, marker(failure.container, key, nested));
            stack.push((child, child_prefix, true));
        }
    }

    lines
}

/// Alias of [`print_verbose`].
pub fn get_errors(outcome: &Outcome) -> Vec<String> {
    print_verbose(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Failure, err, nested_err, ok};

    #[test]
    fn test_ok_prints_nothing() {
        assert!(print_verbose(&ok()).is_empty());
    }

    #[test]
    fn test_prints_own_errors() {
        assert_eq!(print_verbose(&err("error1")), vec!["error1"]);
    }

    #[test]
    fn test_prints_array_items() {
        let r = nested_err(
            Container::Array,
            [(0, err("error1")), (1, err(Vec::<String>::new())), (2, err("error2"))],
        );
        assert_eq!(print_verbose(&r), vec!["At item 0: error1", "At item 2: error2"]);
    }

    #[test]
    fn test_prints_object_fields() {
        let r = nested_err(
            Container::Object,
            [
                ("a", err("error1")),
                ("b", ok()),
                ("c", nested_err(Container::Object, [("d", err("error2"))])),
            ],
        );
        assert_eq!(
            print_verbose(&r),
            vec!["At field \"a\": error1", "At field \"c\": at field \"d\": error2"]
        );
    }

    #[test]
    fn test_prints_mixed_nesting() {
        let inner = nested_err(
            Container::Array,
            [
                (0, err("error1")),
                (1, nested_err(Container::Object, [("d", err("error2"))])),
            ],
        );
        let r = nested_err(
            Container::Object,
            [("a", nested_err(Container::Object, [("b", inner)]))],
        );
        assert_eq!(
            print_verbose(&r),
            vec![
                "At field \"a\": at field \"b\": at item 0: error1",
                "At field \"a\": at field \"b\": at item 1: at field \"d\": error2",
            ]
        );
    }

    #[test]
    fn test_own_errors_precede_nested() {
        let r = nested_err(Container::Object, [("x", err("inner"))]).merge(err("outer"));
        assert_eq!(print_verbose(&r), vec!["outer", "At field \"x\": inner"]);
    }

    #[test]
    fn test_untyped_container_has_no_marker() {
        let r = Outcome::Err(Failure {
            errors: Vec::new(),
            container: None,
            items: vec![("k".to_string(), err("bare"))],
        });
        assert_eq!(print_verbose(&r), vec!["bare"]);
    }

    #[test]
    fn test_deep_nesting() {
        let mut r = err("bottom");
        for _ in 0..5_000 {
            r = nested_err(Container::Array, [(0, r)]);
        }
        let lines = print_verbose(&r);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("At item 0: at item 0: "));
        assert!(lines[0].ends_with("at item 0: bottom"));
    }
}
