//! Value helpers shared by the engine and the per-kind checks.
//!
//! The *empty* predicate here is load-bearing: `null` and `""` are empty,
//! while `0`, `false`, and empty collections are not. Empty values fail
//! `required` and exempt every other rule from evaluation.

use serde_json::Value;
use std::borrow::Cow;

/// True when the value counts as empty for skip/required purposes.
///
/// A missing field (`None`) behaves identically to an explicit `null`.
#[must_use]
pub(crate) fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Canonical string form of a value, used by pattern, date, and JSON checks
/// and by the length branch of `min`/`max`.
///
/// Strings are taken verbatim (no added quotes); everything else renders in
/// its JSON form.
#[must_use]
pub(crate) fn stringify(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(serde_json::to_string(other).unwrap_or_default()),
    }
}

/// Character length of the stringified value (Unicode scalar values).
#[must_use]
pub(crate) fn char_length(value: &Value) -> usize {
    stringify(value).chars().count()
}
