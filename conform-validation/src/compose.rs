// Validator combinators

use conform_core::{Messages, Outcome, Validator, concat_results, err, ok};

/// Runs every validator and merges every failure, in order.
///
/// Empty input passes.
pub fn all<I>(validators: I) -> Validator
where
    I: IntoIterator<Item = Validator>,
{
    let validators: Vec<Validator> = validators.into_iter().collect();
    Validator::new(move |value| concat_results(validators.iter().map(|v| v.validate(value))))
}

/// Passes as soon as one validator passes.
///
/// When every alternative fails the failures are merged, so the caller sees
/// why each one was rejected. Empty input fails with no messages.
pub fn some<I>(validators: I) -> Validator
where
    I: IntoIterator<Item = Validator>,
{
    let validators: Vec<Validator> = validators.into_iter().collect();
    Validator::new(move |value| {
        if validators.is_empty() {
            return err(Messages::none());
        }

        let mut failures = ok();
        for validator in &validators {
            match validator.validate(value) {
                Outcome::Ok => return ok(),
                failed => failures = failures.merge(failed),
            }
        }
        failures
    })
}

/// Runs validators left to right and stops at the first failure.
///
/// Later validators may rely on earlier ones having passed (an "is object"
/// check ahead of "has key"). Empty input passes.
pub fn all_while_ok<I>(validators: I) -> Validator
where
    I: IntoIterator<Item = Validator>,
{
    let validators: Vec<Validator> = validators.into_iter().collect();
    Validator::new(move |value| {
        validators
            .iter()
            .map(|v| v.validate(value))
            .find(Outcome::is_err)
            .unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{always_err, always_ok};
    use conform_core::{Value, get_errors};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(counter: &Arc<AtomicUsize>) -> Validator {
        let counter = Arc::clone(counter);
        Validator::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            ok()
        })
    }

    #[test]
    fn test_all_collects_every_failure() {
        let v = all([always_err("err1"), always_ok(), always_err("err2")]);
        assert_eq!(get_errors(&v.validate(&Value::Null)), vec!["err1", "err2"]);
        assert!(all([always_ok(), always_ok()]).validate(&Value::Null).is_ok());
        assert!(all(Vec::new()).validate(&Value::Null).is_ok());
    }

    #[test]
    fn test_all_runs_everything() {
        let counter = Arc::new(AtomicUsize::new(0));
        all([always_err("x"), counting(&counter), counting(&counter)]).validate(&Value::Null);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_some() {
        assert!(some([always_err("a"), always_ok()]).validate(&Value::Null).is_ok());
        assert!(some([always_ok(), always_err("a")]).validate(&Value::Null).is_ok());
        assert_eq!(
            get_errors(&some([always_err("a"), always_err("b")]).validate(&Value::Null)),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_some_stops_at_first_success() {
        let counter = Arc::new(AtomicUsize::new(0));
        some([always_ok(), counting(&counter)]).validate(&Value::Null);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_some_of_nothing_fails_silently() {
        let r = some(Vec::new()).validate(&Value::Null);
        assert!(r.is_err());
        assert!(get_errors(&r).is_empty());
    }

    #[test]
    fn test_all_while_ok_short_circuits() {
        let counter = Arc::new(AtomicUsize::new(0));
        let v = all_while_ok([always_err("first"), counting(&counter)]);
        assert_eq!(get_errors(&v.validate(&Value::Null)), vec!["first"]);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_all_while_ok_passes_through() {
        let counter = Arc::new(AtomicUsize::new(0));
        let v = all_while_ok([counting(&counter), counting(&counter)]);
        assert!(v.validate(&Value::Null).is_ok());
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert!(all_while_ok(Vec::new()).validate(&Value::Null).is_ok());
    }
}
