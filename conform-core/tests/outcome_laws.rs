//! Algebraic laws of the outcome type.

use conform_core::*;
use proptest::prelude::*;

fn message() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn tree(mixed_containers: bool) -> BoxedStrategy<Outcome> {
    let leaf = prop_oneof![
        Just(ok()),
        prop::collection::vec(message(), 0..3).prop_map(|msgs| err(msgs)),
    ];

    let container = if mixed_containers {
        prop_oneof![Just(Container::Object), Just(Container::Array)].boxed()
    } else {
        Just(Container::Object).boxed()
    };

    leaf.prop_recursive(3, 24, 3, move |inner| {
        (
            prop::collection::vec(message(), 0..2),
            container.clone(),
            prop::collection::vec(("[a-c]", inner), 0..3),
        )
            .prop_map(|(errors, container, items)| {
                err(errors).merge(nested_err(container, items))
            })
    })
    .boxed()
}

fn outcome() -> BoxedStrategy<Outcome> {
    tree(true)
}

proptest! {
    #[test]
    fn exactly_one_predicate_holds(r in outcome()) {
        prop_assert!(is_ok(&r) != is_err(&r));
    }

    #[test]
    fn ok_is_merge_identity(r in outcome()) {
        prop_assert_eq!(merge_results(ok(), r.clone()), r.clone());
        prop_assert_eq!(merge_results(r.clone(), ok()), r);
    }

    #[test]
    fn concat_is_associative(a in outcome(), b in outcome(), c in outcome()) {
        let left = concat_results([concat_results([a.clone(), b.clone()]), c.clone()]);
        let right = concat_results([a, concat_results([b, c])]);
        prop_assert_eq!(left, right);
    }

    #[test]
    fn merging_keeps_every_message(a in tree(false), b in tree(false)) {
        let mut expected = get_errors(&a);
        expected.extend(get_errors(&b));

        let merged = concat_results([a.clone(), b.clone()]);
        // Key-wise merging interleaves nested lines; the set of lines is kept
        let mut actual = get_errors(&merged);
        actual.sort();
        expected.sort();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prefix_reaches_every_message(r in outcome()) {
        let plain = get_errors(&r);
        let prefixed = get_errors(&prefix_errors(r, "!"));
        prop_assert_eq!(plain.len(), prefixed.len());
        prop_assert!(prefixed.iter().all(|line| line.contains('!')));
    }

    #[test]
    fn flattening_ok_is_empty_and_err_is_total(r in outcome()) {
        let lines = get_errors(&r);
        if r.is_ok() {
            prop_assert!(lines.is_empty());
        }
    }
}

#[test]
fn concat_of_nothing_is_ok() {
    assert_eq!(concat_results(Vec::new()), ok());
    assert!(get_errors(&ok()).is_empty());
}
