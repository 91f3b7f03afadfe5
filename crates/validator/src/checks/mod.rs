//! Per-kind pass/fail predicates.
//!
//! Every function here receives a value that is already known to be
//! non-empty — the engine's skip-if-empty policy runs first — and returns a
//! plain `bool`. Nothing in this module can fail at evaluation time:
//! thresholds were parsed and patterns compiled when the declaration was
//! built.

pub(crate) mod datetime;
mod format;
mod types;

use serde_json::{Map, Value};

use crate::foundation::value;
use crate::rules::{BoundKind, FormatKind, RuleKind, SetKind, TypeKind};

/// Dispatches a non-`required` rule against a non-empty value.
#[must_use]
pub(crate) fn passes(kind: &RuleKind, value: &Value, data: &Map<String, Value>) -> bool {
    match kind {
        // `required` is evaluated by the engine against possibly-empty
        // values; a non-empty value trivially satisfies it. `confirmed` is
        // rewritten away by the normalizer before evaluation.
        RuleKind::Required | RuleKind::Confirmed => true,

        RuleKind::TypeOf(TypeKind::Int) => types::is_int(value),
        RuleKind::TypeOf(TypeKind::Decimal) => types::is_decimal(value),
        RuleKind::TypeOf(TypeKind::Boolean) => types::is_boolean(value),

        RuleKind::Format(FormatKind::Email) => format::is_email(&value::stringify(value)),
        RuleKind::Format(FormatKind::Url) => format::is_url(&value::stringify(value)),
        RuleKind::Format(FormatKind::Domain) => format::is_domain(&value::stringify(value)),
        RuleKind::Format(FormatKind::Ip) => format::is_ip(&value::stringify(value)),
        RuleKind::Format(FormatKind::Date) => datetime::is_date(&value::stringify(value)),
        RuleKind::Format(FormatKind::Json) => format::is_json(&value::stringify(value)),

        RuleKind::Bound { kind, threshold } => within_bound(*kind, *threshold, value),

        RuleKind::Matches { other } => value == data.get(other).unwrap_or(&Value::Null),

        RuleKind::Pattern(pattern) => pattern.is_match(&value::stringify(value)),

        RuleKind::Set {
            kind,
            values: candidates,
        } => {
            // Untyped-strict membership: only a string value can equal the
            // declared string candidates, no numeric coercion.
            let contained = matches!(
                value,
                Value::String(s) if candidates.iter().any(|candidate| candidate == s)
            );
            match kind {
                SetKind::In => contained,
                SetKind::NotIn => !contained,
            }
        }

        RuleKind::DateFormat(format) => {
            datetime::matches_format(&value::stringify(value), format)
        }

        RuleKind::Custom(callback) => callback.call(value, data),
    }
}

/// The min/max type branch: numeric values compare against the threshold
/// directly; every other value compares the character length of its
/// stringified form. Branching is on the value's *native* type — the string
/// `"2"` under a bare `min:3` is length-compared (length 1), not parsed.
fn within_bound(kind: BoundKind, threshold: f64, value: &Value) -> bool {
    let measure = match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        other => value::char_length(other) as f64,
    };
    match kind {
        BoundKind::Min => measure >= threshold,
        BoundKind::Max => measure <= threshold,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::CheckFn;
    use serde_json::json;

    fn no_data() -> Map<String, Value> {
        Map::new()
    }

    #[test]
    fn bound_branches_on_native_type() {
        let min3 = RuleKind::Bound {
            kind: BoundKind::Min,
            threshold: 3.0,
        };
        // numeric: compared as a number
        assert!(!passes(&min3, &json!(2), &no_data()));
        assert!(passes(&min3, &json!(3), &no_data()));
        // string: compared by character length, even when numeric-looking
        assert!(!passes(&min3, &json!("2"), &no_data()));
        assert!(!passes(&min3, &json!("Al"), &no_data()));
        assert!(passes(&min3, &json!("Ada"), &no_data()));
    }

    #[test]
    fn max_is_the_mirror_bound() {
        let max2 = RuleKind::Bound {
            kind: BoundKind::Max,
            threshold: 2.0,
        };
        assert!(passes(&max2, &json!(2), &no_data()));
        assert!(!passes(&max2, &json!(3), &no_data()));
        assert!(passes(&max2, &json!("hi"), &no_data()));
        assert!(!passes(&max2, &json!("hello"), &no_data()));
    }

    #[test]
    fn match_compares_strictly_against_the_other_field() {
        let rule = RuleKind::Matches {
            other: "confirm".into(),
        };
        let mut data = Map::new();
        data.insert("confirm".into(), json!("secret"));
        assert!(passes(&rule, &json!("secret"), &data));
        assert!(!passes(&rule, &json!("other"), &data));
        // missing other field compares against null
        assert!(!passes(&rule, &json!("secret"), &no_data()));
    }

    #[test]
    fn set_membership_is_untyped_strict() {
        let one_of = RuleKind::Set {
            kind: SetKind::In,
            values: vec!["1".into(), "2".into()],
        };
        assert!(passes(&one_of, &json!("1"), &no_data()));
        // the number 1 is not the string "1"
        assert!(!passes(&one_of, &json!(1), &no_data()));

        let not_one_of = RuleKind::Set {
            kind: SetKind::NotIn,
            values: vec!["admin".into()],
        };
        assert!(!passes(&not_one_of, &json!("admin"), &no_data()));
        assert!(passes(&not_one_of, &json!("guest"), &no_data()));
        assert!(passes(&not_one_of, &json!(1), &no_data()));
    }

    #[test]
    fn custom_predicate_sees_value_and_full_data() {
        let rule = RuleKind::Custom(CheckFn::new(|value, data| {
            value.as_i64().unwrap_or(0) > 0 && data.contains_key("other")
        }));
        let mut data = Map::new();
        data.insert("other".into(), json!(true));
        assert!(passes(&rule, &json!(5), &data));
        assert!(!passes(&rule, &json!(-5), &data));
        assert!(!passes(&rule, &json!(5), &no_data()));
    }

    #[test]
    fn pattern_matches_the_stringified_value() {
        let rule = RuleKind::Pattern(regex::Regex::new(r"^\d+$").unwrap());
        assert!(passes(&rule, &json!("123"), &no_data()));
        assert!(passes(&rule, &json!(123), &no_data()));
        assert!(!passes(&rule, &json!("12a"), &no_data()));
    }
}
