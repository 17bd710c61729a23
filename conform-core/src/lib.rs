//! Core types for Conform
//!
//! Provides the untyped [`Value`] under validation, basic type classification,
//! the [`Outcome`] algebra that validators return, and the printer that turns a
//! nested outcome into path-qualified messages.
//!
//! # Examples
//!
//! ```
//! use conform_core::{Container, err, get_errors, nested_err, ok};
//!
//! let name = err("Missing required field \"first\"");
//! let tags = nested_err(Container::Array, [(1, err("1 failed to typecheck (expected string)"))]);
//! let outcome = nested_err(Container::Object, [("name", name), ("tags", tags)]).merge(ok());
//!
//! assert_eq!(
//!     get_errors(&outcome),
//!     vec![
//!         "At field \"name\": Missing required field \"first\"",
//!         "At field \"tags\": at item 1: 1 failed to typecheck (expected string)",
//!     ]
//! );
//! ```

mod errors;
mod outcome;
mod printer;
mod typecheck;
mod validator;
mod value;

pub use errors::*;
pub use outcome::*;
pub use printer::*;
pub use typecheck::*;
pub use validator::*;
pub use value::*;
