//! Error types for the validation engine.
//!
//! Two distinct error classes live here:
//!
//! - [`RuleError`] — a malformed rule *declaration* (non-numeric threshold,
//!   unparseable regex, unknown rule name). These are programming errors in
//!   the declaration itself and surface fast, at parse/construction time.
//! - [`ValidationErrors`] — the per-field report of *data* failures. The
//!   engine never raises for bad data; it only fills this collection.
//!
//! [`Invalid`] wraps a non-empty [`ValidationErrors`] for callers that prefer
//! error propagation over report inspection, and [`Error`] is the umbrella
//! over both classes.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

// ============================================================================
// RULE ERROR (construction time)
// ============================================================================

/// A rule declaration that could not be turned into a canonical rule.
///
/// Raised by the DSL parser and the builder's `build()` step, never during
/// evaluation: by the time the engine walks data, every threshold is a number
/// and every pattern is compiled.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The rule name (after alias resolution) is not known.
    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    /// A rule that takes parameters was declared without any.
    #[error("rule `{rule}` requires a parameter")]
    MissingParameter {
        /// Canonical rule name.
        rule: &'static str,
    },

    /// A `min`/`max` threshold that does not parse as a number.
    #[error("rule `{rule}` requires a numeric threshold, got `{value}`")]
    InvalidThreshold {
        /// Canonical rule name.
        rule: &'static str,
        /// The offending parameter, verbatim.
        value: String,
    },

    /// A `regex` rule whose pattern does not compile.
    #[error("invalid pattern `{pattern}`")]
    InvalidPattern {
        /// The offending pattern, verbatim.
        pattern: String,
        /// Compilation failure from the regex engine.
        #[source]
        source: Box<regex::Error>,
    },

    /// A `date_format` rule whose strftime string is ill-formed.
    #[error("invalid date format `{0}`")]
    InvalidDateFormat(String),
}

// ============================================================================
// VALIDATION ERRORS (evaluation result)
// ============================================================================

/// Ordered, field-keyed collection of validation failure messages.
///
/// Field order is declaration order; message order within a field is rule
/// evaluation order. Fields without failures are never present — an empty
/// collection means the data passed.
///
/// # Examples
///
/// ```rust,ignore
/// let report = sift_validator::validate(&data, &rules)?;
/// if let Some(messages) = report.messages("email") {
///     eprintln!("email is invalid: {}", messages.join(", "));
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    entries: IndexMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure message for a field.
    ///
    /// Messages accumulate in insertion order; the first `add` for a field
    /// also fixes the field's position in the collection.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// True when no field recorded a failure (validation success).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields with at least one failure.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of messages across all fields.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// All messages recorded for a field, in evaluation order.
    #[must_use]
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.entries.get(field).map(Vec::as_slice)
    }

    /// The first message recorded for a field, if any.
    #[must_use]
    pub fn first(&self, field: &str) -> Option<&str> {
        self.entries
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// True when the field has at least one recorded failure.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    /// Iterates fields and their messages in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Names of the failing fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Converts the report into a `Result`, keeping the full structure on
    /// failure.
    pub fn into_result(self) -> Result<(), Invalid> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Invalid { errors: self })
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field(s) failed validation", self.len())?;
        for (field, messages) in &self.entries {
            write!(f, "; {}: [{}]", field, messages.join(", "))?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = (&'a str, &'a [String]);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a [String])> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

// ============================================================================
// FAILURE WRAPPER
// ============================================================================

/// Validation failure carrying the full per-field report.
///
/// Produced by [`ValidationErrors::into_result`] and [`crate::check`]; the
/// wrapped collection is exactly what [`crate::validate`] returned, message
/// order included.
#[derive(Debug, Clone, Error)]
#[error("validation failed: {errors}")]
pub struct Invalid {
    /// The complete error collection.
    pub errors: ValidationErrors,
}

/// Umbrella error for entry points that can hit either class: a malformed
/// declaration or failing data.
#[derive(Debug, Error)]
pub enum Error {
    /// The declaration itself was malformed.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// The data failed validation.
    #[error(transparent)]
    Invalid(#[from] Invalid),
}

// ============================================================================
// TESTS
// ============================================================================
