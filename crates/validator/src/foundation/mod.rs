//! Core types shared across the engine.
//!
//! - **Errors**: [`RuleError`] for malformed declarations, [`ValidationErrors`]
//!   for the per-field failure report, [`Invalid`] and [`Error`] for callers
//!   that prefer propagation.
//! - **Value helpers**: the *empty* predicate and canonical stringification
//!   that the skip logic and several checks depend on.

mod error;
pub(crate) mod value;

pub use error::{Error, Invalid, RuleError, ValidationErrors};
