//! The evaluator.
//!
//! [`validate`] walks a data map against a declaration map and returns the
//! per-field error collection. It is a pure function of its inputs: no I/O,
//! no shared state between calls, safe to invoke concurrently. The `Err` arm
//! covers malformed declarations only — failing *data* is never an error
//! here, it is entries in the returned collection.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::checks;
use crate::foundation::{value, Error, RuleError, ValidationErrors};
use crate::rules::{normalize_confirmed, Declaration, RuleKind};

/// Field-keyed declaration map. Iteration order is declaration order and
/// determines field order in the error collection.
pub type Declarations = IndexMap<String, Declaration>;

/// Evaluates every declared field against the data map.
///
/// Per field, in declaration order:
///
/// 1. the declaration resolves to a canonical spec (parse or passthrough)
///    and the confirmation normalizer runs;
/// 2. a missing data key behaves exactly like an explicit `null`;
/// 3. `required` fails iff the value is empty (`null` or `""`) and does not
///    short-circuit the remaining rules;
/// 4. every other rule is skipped entirely while the value is empty,
///    otherwise its predicate runs and a failure records the rule's message
///    (override or default token) and evaluation continues.
///
/// Declarations present in the map but absent from `data` are still
/// evaluated (against `null`). Repeated calls with identical inputs yield
/// identical collections.
///
/// # Errors
///
/// Returns [`RuleError`] when a declaration itself is malformed (unknown
/// rule, non-numeric threshold, bad pattern or date format). First error
/// wins; nothing is partially evaluated in that case from the caller's
/// perspective, since the collection is not returned.
pub fn validate(
    data: &Map<String, Value>,
    declarations: &Declarations,
) -> Result<ValidationErrors, RuleError> {
    let mut errors = ValidationErrors::new();

    for (field, declaration) in declarations {
        let rules = normalize_confirmed(field, &declaration.to_rules()?);
        let current = data.get(field);

        for rule in &rules {
            let failed = match rule.kind() {
                RuleKind::Required => value::is_empty(current),
                kind => {
                    if value::is_empty(current) {
                        // Empty values are exempt from every non-required
                        // rule: no pass, no fail.
                        continue;
                    }
                    let Some(current) = current else { continue };
                    !checks::passes(kind, current, data)
                }
            };

            if failed {
                trace!(field = %field, rule = rule.kind().name(), "rule failed");
                errors.add(field, rule.failure_message());
            }
        }

        if errors.contains(field) {
            debug!(
                field = %field,
                messages = errors.messages(field).map_or(0, |m| m.len()),
                "field failed validation"
            );
        }
    }

    Ok(errors)
}

/// Propagating variant of [`validate`] for callers that prefer errors over
/// report inspection: returns `Ok(())` on success and [`Error::Invalid`]
/// carrying the full collection otherwise.
pub fn check(data: &Map<String, Value>, declarations: &Declarations) -> Result<(), Error> {
    validate(data, declarations)?.into_result()?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    fn declarations(pairs: &[(&str, &str)]) -> Declarations {
        pairs
            .iter()
            .map(|(field, line)| ((*field).to_string(), Declaration::from(*line)))
            .collect()
    }

    #[test]
    fn malformed_declaration_is_an_err_not_a_failure() {
        let result = validate(&data(&[]), &declarations(&[("age", "min:abc")]));
        assert!(matches!(result, Err(RuleError::InvalidThreshold { .. })));
    }

    #[test]
    fn check_wraps_the_collection() {
        let err = check(
            &data(&[("name", json!(""))]),
            &declarations(&[("name", "required")]),
        )
        .unwrap_err();
        let Error::Invalid(invalid) = err else {
            panic!("expected Invalid");
        };
        assert_eq!(invalid.errors.first("name"), Some("required"));
    }

    #[test]
    fn check_passes_clean_data_through() {
        assert!(check(
            &data(&[("name", json!("Ada"))]),
            &declarations(&[("name", "required|min:3")]),
        )
        .is_ok());
    }
}
