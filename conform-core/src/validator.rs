// Validator function values

use crate::{Outcome, Value};
use std::fmt;
use std::sync::Arc;

type ValidatorFn = Arc<dyn Fn(&Value) -> Outcome + Send + Sync>;

/// A pure, shareable validation function `Value -> Outcome`.
///
/// Cloning is cheap (reference counted). Validators hold no mutable state, so
/// one compiled validator can be run from many threads at once.
#[derive(Clone)]
pub struct Validator {
    check: ValidatorFn,
}

impl Validator {
    /// Wrap a validation function.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&Value) -> Outcome + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
        }
    }

    /// Run the validator against a value.
    pub fn validate(&self, value: &Value) -> Outcome {
        (self.check)(value)
    }

    /// Do both handles point at the same function?
    pub fn ptr_eq(&self, other: &Validator) -> bool {
        Arc::ptr_eq(&self.check, &other.check)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}
