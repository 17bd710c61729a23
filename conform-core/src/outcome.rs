// Validation outcome algebra

use crate::{ValidationErrors, printer};
use std::fmt;

/// Kind of container whose children failed.
///
/// Decides how nested keys are printed: `At item 3: ` for arrays,
/// `At field "name": ` for objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Object,
    Array,
}

impl Container {
    pub fn as_str(&self) -> &'static str {
        match self {
            Container::Object => "object",
            Container::Array => "array",
        }
    }
}

/// Outcome of running a validator.
///
/// `Err` carries its own messages plus, optionally, per-key nested outcomes.
/// An `Err` with no messages but failing items means the container only
/// failed because of its children.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Outcome {
    #[default]
    Ok,
    Err(Failure),
}

/// Payload of a failed [`Outcome`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Failure {
    /// Messages about the value itself, in order
    pub errors: Vec<String>,
    /// Container type, when the failure has nested items
    pub container: Option<Container>,
    /// Nested outcomes keyed by field name or item index, in definition order
    pub items: Vec<(String, Outcome)>,
}

impl Failure {
    /// Nested outcome for a key.
    pub fn item(&self, key: &str) -> Option<&Outcome> {
        self.items.iter().find(|(k, _)| k == key).map(|(_, r)| r)
    }

    // Merges into an existing entry so keys stay unique
    fn insert_item(&mut self, key: String, outcome: Outcome) {
        match self.items.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => {
                let merged = std::mem::take(existing).merge(outcome);
                *existing = merged;
            }
            None => self.items.push((key, outcome)),
        }
    }
}

/// Messages accepted by [`err`]: a single message or a list of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Messages(Vec<String>);

impl Messages {
    pub fn none() -> Self {
        Self::default()
    }
}

impl From<&str> for Messages {
    fn from(msg: &str) -> Self {
        Self(vec![msg.to_string()])
    }
}

impl From<String> for Messages {
    fn from(msg: String) -> Self {
        Self(vec![msg])
    }
}

impl From<Vec<String>> for Messages {
    fn from(msgs: Vec<String>) -> Self {
        Self(msgs)
    }
}

impl From<Vec<&str>> for Messages {
    fn from(msgs: Vec<&str>) -> Self {
        Self(msgs.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Messages {
    fn from(msgs: [&str; N]) -> Self {
        Self(msgs.iter().map(|m| m.to_string()).collect())
    }
}

impl From<&[String]> for Messages {
    fn from(msgs: &[String]) -> Self {
        Self(msgs.to_vec())
    }
}

// ============================================================================
// Constructors
// ============================================================================

/// Successful outcome.
pub fn ok() -> Outcome {
    Outcome::Ok
}

/// Failed outcome with the given messages (possibly none).
pub fn err(errors: impl Into<Messages>) -> Outcome {
    Outcome::Err(Failure {
        errors: errors.into().0,
        container: None,
        items: Vec::new(),
    })
}

/// Failed outcome for a container that fails only through its children.
///
/// `OK` children are dropped and repeated keys are merged, so every key
/// appears once.
pub fn nested_err<K, I>(container: Container, items: I) -> Outcome
where
    K: ToString,
    I: IntoIterator<Item = (K, Outcome)>,
{
    let mut failure = Failure {
        errors: Vec::new(),
        container: Some(container),
        items: Vec::new(),
    };

    for (key, outcome) in items {
        if outcome.is_err() {
            failure.insert_item(key.to_string(), outcome);
        }
    }

    Outcome::Err(failure)
}

/// `OK` for no messages, otherwise an `Err` carrying them.
pub fn to_result(errors: Vec<String>) -> Outcome {
    if errors.is_empty() { ok() } else { err(errors) }
}

// ============================================================================
// Predicates and transformations
// ============================================================================

pub fn is_ok(outcome: &Outcome) -> bool {
    outcome.is_ok()
}

pub fn is_err(outcome: &Outcome) -> bool {
    outcome.is_err()
}

/// Apply `f(message, index)` to every message at every depth.
pub fn map_errors<F>(outcome: Outcome, f: F) -> Outcome
where
    F: Fn(&str, usize) -> String,
{
    outcome.map_errors(&f)
}

/// Prefix every message at every depth.
pub fn prefix_errors(outcome: Outcome, prefix: &str) -> Outcome {
    outcome.prefix_errors(prefix)
}

/// Merge two outcomes; `OK` is the identity.
pub fn merge_results(r1: Outcome, r2: Outcome) -> Outcome {
    r1.merge(r2)
}

/// Left fold of [`merge_results`] seeded with `OK`.
pub fn concat_results<I>(results: I) -> Outcome
where
    I: IntoIterator<Item = Outcome>,
{
    results.into_iter().fold(ok(), Outcome::merge)
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok)
    }

    pub fn is_err(&self) -> bool {
        matches!(self, Outcome::Err(_))
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Ok => None,
            Outcome::Err(failure) => Some(failure),
        }
    }

    pub fn map_errors<F>(self, f: &F) -> Outcome
    where
        F: Fn(&str, usize) -> String,
    {
        match self {
            Outcome::Ok => Outcome::Ok,
            Outcome::Err(failure) => Outcome::Err(Failure {
                errors: failure
                    .errors
                    .iter()
                    .enumerate()
                    .map(|(i, e)| f(e, i))
                    .collect(),
                container: failure.container,
                items: failure
                    .items
                    .into_iter()
                    .map(|(k, r)| (k, r.map_errors(f)))
                    .collect(),
            }),
        }
    }

    pub fn prefix_errors(self, prefix: &str) -> Outcome {
        self.map_errors(&|e: &str, _: usize| format!("{}{}", prefix, e))
    }

    /// Concatenate messages (`self` first), keep the first defined container
    /// type, and deep-merge items key-wise.
    pub fn merge(self, other: Outcome) -> Outcome {
        match (self, other) {
            (Outcome::Ok, other) => other,
            (this, Outcome::Ok) => this,
            (Outcome::Err(mut left), Outcome::Err(right)) => {
                left.errors.extend(right.errors);
                left.container = left.container.or(right.container);

                for (key, theirs) in right.items {
                    left.insert_item(key, theirs);
                }

                Outcome::Err(left)
            }
        }
    }

    /// Flattened, path-prefixed messages.
    pub fn errors(&self) -> Vec<String> {
        printer::print_verbose(self)
    }

    /// Bridge into `std::result::Result` so callers can use `?`.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        match self {
            Outcome::Ok => Ok(()),
            failed => Err(ValidationErrors::new(failed.errors())),
        }
    }
}

impl FromIterator<Outcome> for Outcome {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        concat_results(iter)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ok => write!(f, "OK"),
            Outcome::Err(_) => write!(f, "{}", self.errors().join("\n")),
        }
    }
}
